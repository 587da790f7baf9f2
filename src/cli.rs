use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="sgphase",
          version=&**FULL_VERSION,
          about="Read-to-paralog phasing of similar genes",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Group transcript alignments into locus families")]
    Link(LinkArgs),
    #[clap(about = "Extract read base matrices at informative variant positions")]
    Matrix(MatrixArgs),
    #[clap(about = "Assign reads to paralog copies")]
    Thread(ThreadArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("link")))]
#[command(arg_required_else_help(true))]
pub struct LinkArgs {
    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "gff")]
    #[clap(help = "GFF3 file with transcript alignments (mRNA and exon records)")]
    #[clap(value_name = "GFF")]
    #[arg(value_parser = check_file_exists)]
    pub gff_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'b')]
    #[clap(long = "regions")]
    #[clap(help = "BED file limiting output to families with a copy in these regions")]
    #[clap(value_name = "BED")]
    #[arg(value_parser = check_file_exists)]
    pub regions_path: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "min-overlap")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Minimum overlap score for two copies to be treated as the same locus")]
    #[clap(default_value = "0.5")]
    #[arg(value_parser = ensure_unit_float)]
    pub min_overlap: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "flank-len")]
    #[clap(value_name = "FLANK_LEN")]
    #[clap(help = "Length of flanking sequence added around each primary copy")]
    #[clap(default_value = "1000")]
    pub flank_len: u32,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "family-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help = "Prefix of the family identifiers")]
    #[clap(default_value = "sgp_region")]
    #[arg(value_parser = check_nonempty)]
    pub family_prefix: String,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("matrix")))]
#[command(arg_required_else_help(true))]
pub struct MatrixArgs {
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "reference-bam")]
    #[clap(help = "BAM file with the family's copies aligned to its padded primary")]
    #[clap(value_name = "BAM")]
    #[arg(value_parser = check_file_exists)]
    pub reference_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "reads-bam")]
    #[clap(help = "BAM file with reads aligned to the family's padded primary")]
    #[clap(value_name = "BAM")]
    #[arg(value_parser = check_file_exists)]
    pub reads_path: PathBuf,

    #[clap(required = true)]
    #[clap(long = "vcf")]
    #[clap(help = "VCF file with variant calls against the padded primary")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub vcf_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "ploidy")]
    #[clap(help = "Number of copies in the family")]
    #[clap(value_name = "PLOIDY")]
    #[arg(value_parser = ploidy_in_range)]
    pub ploidy: usize,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("thread")))]
#[command(arg_required_else_help(true))]
pub struct ThreadArgs {
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "manifest")]
    #[clap(help = "TSV listing family id, reference matrix and reads matrix per line")]
    #[clap(value_name = "MANIFEST")]
    #[arg(value_parser = check_file_exists)]
    pub manifest_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "max-iterations")]
    #[clap(value_name = "MAX_ITERATIONS")]
    #[clap(help = "Maximum clustering rounds per family (0 for no limit)")]
    #[clap(default_value = "1000")]
    pub max_iterations: usize,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn ploidy_in_range(s: &str) -> Result<usize> {
    let ploidy: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid ploidy", s))?;
    if ploidy >= 1 {
        Ok(ploidy)
    } else {
        Err("Ploidy must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Value cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}
