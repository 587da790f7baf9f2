use crate::utils::Result;
use rust_htslib::bcf::{self, Read, Record};
use std::path::Path;

/// Variant positions whose allele balance separates the paralog copies.
///
/// A record qualifies when at least one ALT allele is a single base and every ALT allele
/// depth of the first sample lies strictly between `0.5 / ploidy` and `1 - 0.5 / ploidy`
/// of its total depth. Records with a single-base REF report their own 0-based position,
/// longer REF alleles the base after it.
pub fn read_alt_positions(vcf_path: &Path, ploidy: usize) -> Result<Vec<u32>> {
    if ploidy == 0 {
        return Err("Ploidy must be at least 1".to_string());
    }
    let mut reader = bcf::Reader::from_path(vcf_path)
        .map_err(|e| format!("Failed to open VCF file {}: {}", vcf_path.display(), e))?;

    let mut positions = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| format!("Error reading {}: {}", vcf_path.display(), e))?;
        let alleles = record.alleles();
        let Some((ref_allele, alt_alleles)) = alleles.split_first() else {
            continue;
        };
        if !alt_alleles.iter().any(|allele| allele.len() == 1) {
            continue;
        }
        let Some((alt_depths, depth)) = sample_depths(&record) else {
            log::debug!("Skipping record at {} without AD/DP", record.pos() + 1);
            continue;
        };
        if !is_balanced(&alt_depths, depth, ploidy) {
            continue;
        }

        let offset = if ref_allele.len() == 1 { 0 } else { 1 };
        let position = u32::try_from(record.pos() + offset)
            .map_err(|_| format!("Invalid VCF position: {}", record.pos() + 1))?;
        positions.push(position);
    }
    Ok(positions)
}

/// ALT allele depths and total depth of the first sample.
fn sample_depths(record: &Record) -> Option<(Vec<i32>, i32)> {
    let allele_depths = record.format(b"AD").integer().ok()?;
    let depth = record.format(b"DP").integer().ok()?;
    let alt_depths = allele_depths.first()?.iter().skip(1).copied().collect();
    let depth = *depth.first()?.first()?;
    Some((alt_depths, depth))
}

fn is_balanced(alt_depths: &[i32], depth: i32, ploidy: usize) -> bool {
    if depth <= 0 {
        return false;
    }
    let min_freq = 0.5 / ploidy as f64;
    let max_freq = 1.0 - min_freq;
    alt_depths.iter().all(|&alt_depth| {
        let freq = alt_depth as f64 / depth as f64;
        min_freq < freq && freq < max_freq
    })
}
