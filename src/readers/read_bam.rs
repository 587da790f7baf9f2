use crate::matrix::ReadBaseMatrix;
use crate::utils::Result;
use rust_htslib::bam::{self, Read};
use std::collections::HashMap;
use std::path::Path;

const MAX_PILEUP_DEPTH: u32 = 1_000_000;

/// Builds the read × position base matrix of an alignment file.
///
/// Every mapped record gets a row, in file order. Pileup columns at the requested
/// positions fill in the read base, or `-` where the read has a deletion, in the first row
/// carrying that read name. Positions are 0-based, compared regardless of contig, and
/// reported sorted.
pub fn extract_read_matrix(bam_path: &Path, positions: &[u32]) -> Result<ReadBaseMatrix> {
    let mut positions = positions.to_vec();
    positions.sort_unstable();
    positions.dedup();
    let columns: HashMap<u32, usize> = positions
        .iter()
        .enumerate()
        .map(|(column, &pos)| (pos, column))
        .collect();

    let mut matrix = ReadBaseMatrix::new(positions);
    let mut rows_by_name: HashMap<String, usize> = HashMap::new();

    let mut reader = open_bam(bam_path)?;
    for result in reader.records() {
        let record = result.map_err(|e| format!("Error reading {}: {}", bam_path.display(), e))?;
        if record.is_unmapped() {
            continue;
        }
        let name = String::from_utf8_lossy(record.qname()).to_string();
        rows_by_name.entry(name.clone()).or_insert(matrix.num_reads());
        matrix.push_row(name, vec![String::new(); columns.len()]);
    }

    let mut reader = open_bam(bam_path)?;
    let mut pileups = reader.pileup();
    pileups.set_max_depth(MAX_PILEUP_DEPTH);
    for pileup in pileups {
        let pileup = pileup.map_err(|e| format!("Pileup error in {}: {}", bam_path.display(), e))?;
        let Some(&column) = columns.get(&pileup.pos()) else {
            continue;
        };
        for alignment in pileup.alignments() {
            if alignment.is_refskip() {
                continue;
            }
            let record = alignment.record();
            let cell = if alignment.is_del() {
                "-".to_string()
            } else {
                match alignment.qpos() {
                    Some(qpos) if qpos < record.seq_len() => {
                        (record.seq()[qpos] as char).to_string()
                    }
                    Some(_) => {
                        log::debug!(
                            "Skipping read {} without stored sequence",
                            String::from_utf8_lossy(record.qname())
                        );
                        continue;
                    }
                    None => continue,
                }
            };
            let name = String::from_utf8_lossy(record.qname());
            let row = rows_by_name.get(name.as_ref()).ok_or_else(|| {
                format!("Read {} appears in pileup but not among records", name)
            })?;
            matrix.rows[*row][column] = cell;
        }
    }

    Ok(matrix)
}

fn open_bam(bam_path: &Path) -> Result<bam::Reader> {
    bam::Reader::from_path(bam_path)
        .map_err(|e| format!("Failed to open {}: {}", bam_path.display(), e))
}
