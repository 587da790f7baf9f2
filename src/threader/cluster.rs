use super::encode::{argmax, onehot_encode, BaseVector, EncodedRow, NUM_CHANNELS};
use crate::utils::Result;

/// Consensus of one cluster, one vector per variant position.
pub type Prototype = Vec<BaseVector>;

#[derive(Debug, Clone, Default)]
pub struct ThreadingParams {
    /// Upper bound on assignment/update rounds; `None` iterates until a fixed point.
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadingResult {
    /// Sample indices assigned to each cluster, in sample order.
    pub clusters: Vec<Vec<usize>>,
    /// Cluster index of each sample.
    pub assignments: Vec<usize>,
    pub prototypes: Vec<Prototype>,
    pub iterations: usize,
    pub converged: bool,
}

/// Threads sample reads through the paralog copies described by `ref_matrix`.
///
/// Each reference row seeds one cluster. Reads are assigned to the nearest prototype over
/// the positions they cover, prototypes are re-estimated from their members, and the two
/// steps repeat until the prototypes stop changing or the iteration cap is reached. At
/// least one round is always run.
pub fn thread_haplotypes(
    ref_matrix: &[Vec<String>],
    sample_matrix: &[Vec<String>],
    num_positions: usize,
    params: &ThreadingParams,
) -> Result<ThreadingResult> {
    if num_positions == 0 {
        return Err("Cannot thread haplotypes without variant positions".to_string());
    }
    if ref_matrix.is_empty() {
        return Err("Cannot thread haplotypes without reference rows".to_string());
    }
    check_row_widths("Reference", ref_matrix, num_positions)?;
    check_row_widths("Sample", sample_matrix, num_positions)?;

    let seeds = onehot_encode(ref_matrix, true)?
        .into_iter()
        .map(|row| row.vectors)
        .collect();
    let samples = onehot_encode(sample_matrix, false)?;
    Ok(iterate(seeds, &samples, num_positions, params.max_iterations))
}

fn check_row_widths(label: &str, rows: &[Vec<String>], num_positions: usize) -> Result<()> {
    match rows.iter().position(|row| row.len() != num_positions) {
        Some(index) => Err(format!(
            "{} row {} has {} columns, expected {}",
            label,
            index,
            rows[index].len(),
            num_positions
        )),
        None => Ok(()),
    }
}

fn iterate(
    seeds: Vec<Prototype>,
    samples: &[EncodedRow],
    num_positions: usize,
    max_iterations: Option<usize>,
) -> ThreadingResult {
    let mut prototypes = seeds;
    let mut iterations = 0;
    loop {
        let (clusters, assignments) = distance_cluster(&prototypes, samples);
        let updated = update_prototypes(&clusters, samples, &prototypes, num_positions);
        iterations += 1;

        let converged = updated == prototypes;
        prototypes = updated;
        let capped = max_iterations.is_some_and(|max| iterations >= max);
        if converged || capped {
            return ThreadingResult {
                clusters,
                assignments,
                prototypes,
                iterations,
                converged,
            };
        }
    }
}

/// Euclidean distance between a sample and a prototype over the sample's covered columns.
pub fn masked_distance(sample: &EncodedRow, prototype: &[BaseVector]) -> f32 {
    sample
        .indices
        .iter()
        .zip(&sample.vectors)
        .map(|(&column, vector)| {
            vector
                .iter()
                .zip(&prototype[column])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>()
        })
        .sum::<f32>()
        .sqrt()
}

/// Assigns every sample to its nearest prototype, lowest cluster index on ties.
///
/// Returns the members of each cluster and the cluster of each sample.
pub fn distance_cluster(
    prototypes: &[Prototype],
    samples: &[EncodedRow],
) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut clusters = vec![Vec::new(); prototypes.len()];
    let mut assignments = Vec::with_capacity(samples.len());
    for (sample_index, sample) in samples.iter().enumerate() {
        let mut best_cluster = 0;
        let mut best_distance = f32::INFINITY;
        for (cluster, prototype) in prototypes.iter().enumerate() {
            let distance = masked_distance(sample, prototype);
            if distance < best_distance {
                best_cluster = cluster;
                best_distance = distance;
            }
        }
        clusters[best_cluster].push(sample_index);
        assignments.push(best_cluster);
    }
    (clusters, assignments)
}

/// Re-estimates each prototype as the column-wise mean of its members, then hardmaxes it.
///
/// Columns no member covers keep the previous prototype's value.
pub fn update_prototypes(
    clusters: &[Vec<usize>],
    samples: &[EncodedRow],
    prototypes: &[Prototype],
    num_positions: usize,
) -> Vec<Prototype> {
    clusters
        .iter()
        .zip(prototypes)
        .map(|(members, previous)| {
            let mut sums: Vec<BaseVector> = vec![[0.0; NUM_CHANNELS]; num_positions];
            let mut counts = vec![0u32; num_positions];
            for &sample_index in members {
                let sample = &samples[sample_index];
                for (&column, vector) in sample.indices.iter().zip(&sample.vectors) {
                    counts[column] += 1;
                    for (sum, value) in sums[column].iter_mut().zip(vector) {
                        *sum += *value;
                    }
                }
            }
            let averaged: Prototype = sums
                .into_iter()
                .zip(counts)
                .enumerate()
                .map(|(column, (sum, count))| {
                    if count == 0 {
                        previous[column]
                    } else {
                        sum.map(|value| value / count as f32)
                    }
                })
                .collect();
            hardmax(&averaged)
        })
        .collect()
}

/// Projects every column onto the one-hot vector of its largest channel.
pub fn hardmax(prototype: &[BaseVector]) -> Prototype {
    prototype
        .iter()
        .map(|vector| {
            let mut projected = [0.0; NUM_CHANNELS];
            projected[argmax(vector)] = 1.0;
            projected
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threader::onehot_decode;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|b| b.to_string()).collect())
            .collect()
    }

    fn unbounded() -> ThreadingParams {
        ThreadingParams::default()
    }

    #[test]
    fn exact_copies_converge_in_one_round() {
        let reference = matrix(&[&["A", "C", "G"], &["T", "G", "-"]]);
        let samples = matrix(&[
            &["T", "G", "-"],
            &["A", "C", "G"],
            &["A", "", "G"],
            &["", "G", ""],
        ]);
        let result = thread_haplotypes(&reference, &samples, 3, &unbounded()).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(result.converged);
        assert_eq!(result.assignments, vec![1, 0, 0, 1]);
        assert_eq!(result.clusters, vec![vec![1, 2], vec![0, 3]]);
        assert_eq!(
            onehot_decode(&result.prototypes),
            vec!["ACG".to_string(), "TG-".to_string()]
        );
    }

    #[test]
    fn empty_sample_row_goes_to_first_cluster() {
        let reference = matrix(&[&["A", "C"], &["G", "T"]]);
        let samples = matrix(&[&["G", "T"], &["", ""]]);
        let result = thread_haplotypes(&reference, &samples, 2, &unbounded()).unwrap();
        assert_eq!(result.assignments, vec![1, 0]);
    }

    #[test]
    fn rerun_from_converged_prototypes_is_stable() {
        let reference = matrix(&[&["A", "C", "G", "T"], &["A", "G", "G", "A"]]);
        let samples = matrix(&[
            &["A", "G", "C", "A"],
            &["", "G", "C", "A"],
            &["A", "C", "G", ""],
            &["A", "C", "T", "T"],
            &["", "", "", "A"],
        ]);
        let first = thread_haplotypes(&reference, &samples, 4, &unbounded()).unwrap();
        assert!(first.converged);

        let consensus: Vec<Vec<String>> = onehot_decode(&first.prototypes)
            .iter()
            .map(|row| row.chars().map(String::from).collect())
            .collect();
        let second = thread_haplotypes(&consensus, &samples, 4, &unbounded()).unwrap();
        assert_eq!(second.iterations, 1);
        assert_eq!(second.assignments, first.assignments);
        assert_eq!(second.prototypes, first.prototypes);
    }

    #[test]
    fn uncovered_columns_keep_previous_value() {
        // the second copy has no reads, so its ambiguous seed is only hardmaxed
        let reference = matrix(&[&["A", "C"], &["G", "Y"]]);
        let samples = matrix(&[&["A", "C"]]);
        let result = thread_haplotypes(&reference, &samples, 2, &unbounded()).unwrap();
        assert_eq!(result.iterations, 2);
        assert!(result.converged);
        assert_eq!(result.clusters[1], Vec::<usize>::new());
        assert_eq!(
            onehot_decode(&result.prototypes),
            vec!["AC".to_string(), "GC".to_string()]
        );
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let reference = matrix(&[&["A", "C"], &["G", "Y"]]);
        let samples = matrix(&[&["A", "C"]]);
        let params = ThreadingParams {
            max_iterations: Some(1),
        };
        let result = thread_haplotypes(&reference, &samples, 2, &params).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
    }

    #[test]
    fn mean_of_members_decides_column() {
        let reference = matrix(&[&["A", "A"], &["T", "T"]]);
        let samples = matrix(&[&["A", "C"], &["A", "C"], &["A", "G"]]);
        let result = thread_haplotypes(&reference, &samples, 2, &unbounded()).unwrap();
        assert_eq!(result.assignments, vec![0, 0, 0]);
        assert_eq!(onehot_decode(&result.prototypes)[0], "AC");
    }

    #[test]
    fn hardmax_breaks_ties_toward_lowest_channel() {
        let projected = hardmax(&[[0.0, 0.0, 0.5, 0.5, 0.0], [0.0; NUM_CHANNELS]]);
        assert_eq!(
            projected,
            vec![[0.0, 0.0, 1.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn masked_distance_ignores_uncovered_columns() {
        let sample = EncodedRow {
            indices: vec![1],
            vectors: vec![[0.0, 1.0, 0.0, 0.0, 0.0]],
        };
        let prototype = vec![[0.0, 0.0, 0.0, 1.0, 0.0], [0.0, 1.0, 0.0, 0.0, 0.0]];
        assert_eq!(masked_distance(&sample, &prototype), 0.0);
        assert_eq!(masked_distance(&EncodedRow::default(), &prototype), 0.0);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let reference = matrix(&[&["A", "C"]]);
        assert!(thread_haplotypes(&reference, &[], 0, &unbounded()).is_err());
        assert!(thread_haplotypes(&[], &[], 2, &unbounded()).is_err());
        assert_eq!(
            thread_haplotypes(&reference, &matrix(&[&["A"]]), 2, &unbounded()).unwrap_err(),
            "Sample row 0 has 1 columns, expected 2"
        );
    }
}
