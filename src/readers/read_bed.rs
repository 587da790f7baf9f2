use crate::utils::{GenomicRegion, Result};
use std::io::BufRead;

/// Reads limit intervals from BED lines (`chrom start end ...`).
pub fn read_bed<R: BufRead>(reader: R) -> Result<Vec<GenomicRegion>> {
    let mut regions = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error at BED line {}: {}", line_number + 1, e))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let region = decode_bed_line(&line)
            .map_err(|e| format!("Error at BED line {}: {}", line_number + 1, e))?;
        regions.push(region);
    }
    Ok(regions)
}

fn decode_bed_line(line: &str) -> Result<GenomicRegion> {
    let split_line: Vec<&str> = line.split_whitespace().collect();
    match &split_line[..] {
        [chrom, start, end, ..] => {
            let start: u32 = start
                .parse()
                .map_err(|_| format!("Invalid start coordinate: {}", start))?;
            let end: u32 = end
                .parse()
                .map_err(|_| format!("Invalid end coordinate: {}", end))?;
            GenomicRegion::new(*chrom, start, end)
        }
        _ => Err(format!(
            "Expected at least 3 fields in the format 'chrom start end', found {}",
            split_line.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_intervals_and_skips_comments() {
        let bed = "# limits\nchr1\t100\t200\tname\t0\t+\n\nchr2 5 9\n";
        let regions = read_bed(Cursor::new(bed)).unwrap();
        assert_eq!(
            regions,
            vec![
                GenomicRegion::new("chr1", 100, 200).unwrap(),
                GenomicRegion::new("chr2", 5, 9).unwrap(),
            ]
        );
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let bed = "chr1\t100\t200\nchr1\t300\n";
        assert_eq!(
            read_bed(Cursor::new(bed)).unwrap_err(),
            "Error at BED line 2: Expected at least 3 fields in the format 'chrom start end', found 2"
        );
        assert!(read_bed(Cursor::new("chr1\t300\t100\n")).is_err());
        assert_eq!(
            read_bed(Cursor::new("chr1\t1e3\t2000\n")).unwrap_err(),
            "Error at BED line 1: Invalid start coordinate: 1e3"
        );
    }

    #[test]
    fn contig_names_keep_dashes_and_colons() {
        let bed = "chrUn-x\t10\t20\nHLA-A*01:01:01:01\t0\t3000\n";
        let regions = read_bed(Cursor::new(bed)).unwrap();
        assert_eq!(
            regions,
            vec![
                GenomicRegion::new("chrUn-x", 10, 20).unwrap(),
                GenomicRegion::new("HLA-A*01:01:01:01", 0, 3000).unwrap(),
            ]
        );
    }
}
