use crate::matrix::ReadBaseMatrix;
use crate::threader::{onehot_decode, thread_haplotypes, ThreadingParams};
use crate::utils::Result;

/// Reference copies and sample reads of one locus family, at shared variant positions.
#[derive(Debug, Clone)]
pub struct FamilyInput {
    pub family_id: String,
    /// One row per paralog copy; its read ids name the copies.
    pub reference: ReadBaseMatrix,
    pub reads: ReadBaseMatrix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phasing {
    pub read_ids: Vec<String>,
    /// Copy index of each read, parallel to `read_ids`.
    pub assignments: Vec<usize>,
    pub cluster_sizes: Vec<usize>,
    /// Consensus genotype of each copy, one base per variant position.
    pub consensus: Vec<String>,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FamilyOutcome {
    Phased(Phasing),
    /// No informative positions; the family is reported without phasing.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyResult {
    pub family_id: String,
    pub region_ids: Vec<String>,
    pub outcome: FamilyOutcome,
}

impl FamilyResult {
    pub fn unresolved(family_id: String, region_ids: Vec<String>) -> Self {
        Self {
            family_id,
            region_ids,
            outcome: FamilyOutcome::Unresolved,
        }
    }
}

pub fn phase_family(input: FamilyInput, params: &ThreadingParams) -> Result<FamilyResult> {
    let FamilyInput {
        family_id,
        reference,
        mut reads,
    } = input;
    if reference.positions != reads.positions {
        return Err(format!(
            "{}: reference and reads matrices have different positions",
            family_id
        ));
    }

    if reference.num_positions() == 0 {
        log::debug!("{}: no variant positions, leaving unresolved", family_id);
        return Ok(FamilyResult::unresolved(family_id, reference.read_ids));
    }

    let num_reads = reads.num_reads();
    reads.remove_blank();
    log::debug!(
        "{}: {} of {} reads cover at least one variant position",
        family_id,
        reads.num_reads(),
        num_reads
    );

    let threading = thread_haplotypes(
        &reference.rows,
        &reads.rows,
        reference.num_positions(),
        params,
    )
    .map_err(|e| format!("{}: {}", family_id, e))?;

    if !threading.converged {
        log::warn!(
            "{}: clustering stopped after {} iterations without converging",
            family_id,
            threading.iterations
        );
    }

    let phasing = Phasing {
        read_ids: reads.read_ids,
        assignments: threading.assignments,
        cluster_sizes: threading.clusters.iter().map(Vec::len).collect(),
        consensus: onehot_decode(&threading.prototypes),
        iterations: threading.iterations,
        converged: threading.converged,
    };
    Ok(FamilyResult {
        family_id,
        region_ids: reference.read_ids,
        outcome: FamilyOutcome::Phased(phasing),
    })
}
