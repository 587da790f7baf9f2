use clap::Parser;
use sgphase::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{link, matrix, thread},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Link(_) => "link",
        Command::Matrix(_) => "matrix",
        Command::Thread(_) => "thread",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Link(args) => link::link(args)?,
        Command::Matrix(args) => matrix::matrix(args)?,
        Command::Thread(args) => thread::thread_families(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
