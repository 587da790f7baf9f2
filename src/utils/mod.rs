mod io_utils;
mod readers;
mod region;
mod report;

pub use io_utils::{create_writer, open_output};
pub use readers::open_text_reader;
pub use region::GenomicRegion;
pub use report::{LogReporter, Reporter};

#[cfg(test)]
pub use report::RecordingReporter;

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
