//! Per-family phasing output: one TSV of read assignments and one of copy consensus.

use crate::utils::{open_output, Result};
use crate::workflows::{FamilyOutcome, FamilyResult};
use std::fs::File;
use std::io::{BufWriter, Write};

const ASSIGNMENTS_HEADER: &str = "family\tread\tcluster\tregion_id";
const CONSENSUS_HEADER: &str = "family\tregion_id\tnum_reads\tconverged\tconsensus";
const MISSING: &str = ".";

pub struct FamilyWriter<W: Write> {
    assignments: W,
    consensus: W,
}

impl FamilyWriter<BufWriter<File>> {
    /// Creates `<prefix>.assignments.tsv` and `<prefix>.consensus.tsv`.
    pub fn create(output_prefix: &str) -> Result<Self> {
        let assignments = open_output(output_prefix, "assignments.tsv")?;
        let consensus = open_output(output_prefix, "consensus.tsv")?;
        FamilyWriter::new(assignments, consensus)
    }
}

impl<W: Write> FamilyWriter<W> {
    pub fn new(mut assignments: W, mut consensus: W) -> Result<Self> {
        writeln!(assignments, "{}", ASSIGNMENTS_HEADER).map_err(|e| e.to_string())?;
        writeln!(consensus, "{}", CONSENSUS_HEADER).map_err(|e| e.to_string())?;
        Ok(Self {
            assignments,
            consensus,
        })
    }

    pub fn write(&mut self, result: &FamilyResult) -> Result<()> {
        let family_id = &result.family_id;
        let phasing = match &result.outcome {
            FamilyOutcome::Phased(phasing) => phasing,
            FamilyOutcome::Unresolved => {
                for region_id in &result.region_ids {
                    writeln!(
                        self.consensus,
                        "{}\t{}\t0\t{}\t{}",
                        family_id, region_id, MISSING, MISSING
                    )
                    .map_err(|e| e.to_string())?;
                }
                return Ok(());
            }
        };

        for (read_id, &cluster) in phasing.read_ids.iter().zip(&phasing.assignments) {
            let region_id = result
                .region_ids
                .get(cluster)
                .map(String::as_str)
                .unwrap_or(MISSING);
            writeln!(
                self.assignments,
                "{}\t{}\t{}\t{}",
                family_id, read_id, cluster, region_id
            )
            .map_err(|e| e.to_string())?;
        }

        for ((region_id, num_reads), consensus) in result
            .region_ids
            .iter()
            .zip(&phasing.cluster_sizes)
            .zip(&phasing.consensus)
        {
            writeln!(
                self.consensus,
                "{}\t{}\t{}\t{}\t{}",
                family_id, region_id, num_reads, phasing.converged, consensus
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.assignments.flush().map_err(|e| e.to_string())?;
        self.consensus.flush().map_err(|e| e.to_string())
    }

    #[cfg(test)]
    fn into_inner(self) -> (W, W) {
        (self.assignments, self.consensus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::Phasing;

    fn written(result: &FamilyResult) -> (String, String) {
        let mut writer = FamilyWriter::new(Vec::new(), Vec::new()).unwrap();
        writer.write(result).unwrap();
        let (assignments, consensus) = writer.into_inner();
        (
            String::from_utf8(assignments).unwrap(),
            String::from_utf8(consensus).unwrap(),
        )
    }

    #[test]
    fn phased_family_rows() {
        let result = FamilyResult {
            family_id: "sgp_region0".to_string(),
            region_ids: vec!["sgp_region0.0".to_string(), "sgp_region0.1".to_string()],
            outcome: FamilyOutcome::Phased(Phasing {
                read_ids: vec!["r1".to_string(), "r3".to_string()],
                assignments: vec![1, 0],
                cluster_sizes: vec![1, 1],
                consensus: vec!["AC".to_string(), "GT".to_string()],
                iterations: 1,
                converged: true,
            }),
        };
        let (assignments, consensus) = written(&result);
        assert_eq!(
            assignments,
            "family\tread\tcluster\tregion_id\n\
             sgp_region0\tr1\t1\tsgp_region0.1\n\
             sgp_region0\tr3\t0\tsgp_region0.0\n"
        );
        assert_eq!(
            consensus,
            "family\tregion_id\tnum_reads\tconverged\tconsensus\n\
             sgp_region0\tsgp_region0.0\t1\ttrue\tAC\n\
             sgp_region0\tsgp_region0.1\t1\ttrue\tGT\n"
        );
    }

    #[test]
    fn unresolved_family_reports_every_copy() {
        let result = FamilyResult::unresolved(
            "sgp_region3".to_string(),
            vec!["sgp_region3.0".to_string(), "sgp_region3.1".to_string()],
        );
        let (assignments, consensus) = written(&result);
        assert_eq!(assignments, format!("{}\n", ASSIGNMENTS_HEADER));
        assert_eq!(
            consensus.lines().skip(1).collect::<Vec<_>>(),
            vec!["sgp_region3\tsgp_region3.0\t0\t.\t.", "sgp_region3\tsgp_region3.1\t0\t.\t."]
        );
    }
}
