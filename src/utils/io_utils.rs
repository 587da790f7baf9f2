use crate::utils::Result;
use std::fs::File;
use std::io::BufWriter;

pub fn create_writer<T, F>(output_prefix: &str, output_suffix: &str, f: F) -> Result<T>
where
    F: FnOnce(&str) -> Result<T>,
{
    let output_path = format!("{}.{}", output_prefix, output_suffix);
    f(&output_path)
}

/// Creates `<prefix>.<suffix>` as a buffered file writer.
pub fn open_output(output_prefix: &str, output_suffix: &str) -> Result<BufWriter<File>> {
    create_writer(output_prefix, output_suffix, |path| {
        File::create(path)
            .map(BufWriter::new)
            .map_err(|e| format!("Failed to create {}: {}", path, e))
    })
}
