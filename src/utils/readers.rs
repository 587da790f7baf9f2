use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

/// Opens a plain or gzip-compressed text file (GFF3, BED, TSV) for line-wise reading.
pub fn open_text_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{BufRead, Write};

    #[test]
    fn reads_plain_and_gzipped_text() {
        let dir = tempfile::tempdir().unwrap();

        let plain_path = dir.path().join("limits.bed");
        std::fs::write(&plain_path, "chr1\t10\t20\n").unwrap();
        let lines: Vec<String> = open_text_reader(&plain_path)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["chr1\t10\t20"]);

        let gz_path = dir.path().join("limits.bed.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        encoder.write_all(b"chr2\t5\t9\n").unwrap();
        encoder.finish().unwrap();
        let lines: Vec<String> = open_text_reader(&gz_path)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["chr2\t5\t9"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_text_reader(&dir.path().join("absent.gff3")).is_err());
    }
}
