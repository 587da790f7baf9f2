use crate::regions::Region;
use crate::utils::Result;

/// A strand-agnostic, 0-based half-open interval used to limit which locus families are kept.
#[derive(Debug, PartialEq, Clone)]
pub struct GenomicRegion {
    pub contig: String,
    pub start: u32,
    pub end: u32,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }

        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        let elements: Vec<&str> = encoding.split(&[':', '-']).collect();

        if elements.len() != 3 {
            return Err(error_msg());
        }

        let start: u32 = elements[1].parse().map_err(|_| error_msg())?;
        let end: u32 = elements[2].parse().map_err(|_| error_msg())?;

        Self::new(elements[0].to_string(), start, end)
    }

    pub fn overlaps(&self, region: &Region) -> bool {
        self.contig == region.chrom && self.start < region.end && region.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::GenomicRegion;
    use crate::regions::{Region, Strand};

    #[test]
    fn init_region_from_valid_string_ok() {
        let region = GenomicRegion::from_string("chr1:100-200").unwrap();
        assert_eq!(region.contig, "chr1");
        assert_eq!(region.start, 100);
        assert_eq!(region.end, 200);
    }

    #[test]
    fn init_region_from_invalid_string_err() {
        assert_eq!(
            GenomicRegion::from_string("chr:1:100-200"),
            Err("Invalid region encoding: chr:1:100-200".to_string())
        );
    }

    #[test]
    fn init_region_from_invalid_interval_err() {
        assert_eq!(
            GenomicRegion::from_string("chr1:200-100"),
            Err("Invalid region: start 200 >= end 100".to_string())
        );
    }

    #[test]
    fn overlap_ignores_strand_and_respects_half_open_ends() {
        let limit = GenomicRegion::new("chr1", 100, 200).unwrap();
        let inside = Region::new("chr1", 150, 300, Strand::Reverse, "").unwrap();
        let abutting = Region::new("chr1", 200, 300, Strand::Forward, "").unwrap();
        let other_contig = Region::new("chr2", 150, 160, Strand::Forward, "").unwrap();
        assert!(limit.overlaps(&inside));
        assert!(!limit.overlaps(&abutting));
        assert!(!limit.overlaps(&other_contig));
    }
}
