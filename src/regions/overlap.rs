use super::{LinkedRegion, Region};

/// Minimum overlap score for two copies to be considered the same locus.
pub const DEFAULT_MIN_OVERLAP: f64 = 0.5;

/// Symmetric overlap score between two regions in `[0, 1]`.
///
/// With `g1 = a.end - b.start` and `g2 = b.end - a.start`, the score is `min / max` of the
/// two when both are positive and zero otherwise, or when chromosome or strand differ.
pub fn coverage(a: &Region, b: &Region) -> f64 {
    if a.chrom != b.chrom || a.strand != b.strand {
        return 0.0;
    }
    let g1 = a.end as i64 - b.start as i64;
    let g2 = b.end as i64 - a.start as i64;
    if g1 > 0 && g2 > 0 {
        g1.min(g2) as f64 / g1.max(g2) as f64
    } else {
        0.0
    }
}

/// Whether either family's primary copy coincides with one of the other family's secondaries.
pub fn overlaps(first: &LinkedRegion, second: &LinkedRegion, threshold: f64) -> bool {
    second
        .secondary
        .iter()
        .any(|region| coverage(&first.primary, region) > threshold)
        || first
            .secondary
            .iter()
            .any(|region| coverage(&second.primary, region) > threshold)
}

/// Absorbs `other` into `target`.
///
/// Every copy of `other` is appended to `target.secondary` once for each copy of `target`
/// it overlaps above `threshold`, so repeated matches produce repeated entries. Appends
/// follow `other`'s flattened order and are applied after all comparisons.
pub fn merge<'a>(
    target: &'a mut LinkedRegion,
    other: &LinkedRegion,
    threshold: f64,
) -> &'a mut LinkedRegion {
    let mut absorbed = Vec::new();
    for candidate in other.flatten() {
        for existing in target.flatten() {
            if coverage(existing, candidate) > threshold {
                absorbed.push(candidate.clone());
            }
        }
    }
    for region in absorbed {
        target.append_secondary(region);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::Strand;

    fn region(chrom: &str, start: u32, end: u32, strand: Strand) -> Region {
        Region::new(chrom, start, end, strand, "").unwrap()
    }

    fn plus(chrom: &str, start: u32, end: u32) -> Region {
        region(chrom, start, end, Strand::Forward)
    }

    #[test]
    fn coverage_of_partial_overlap() {
        let a = plus("chr1", 100, 200);
        let b = plus("chr1", 150, 250);
        assert!((coverage(&a, &b) - 50.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn coverage_is_symmetric() {
        let pairs = [
            (plus("chr1", 100, 200), plus("chr1", 150, 250)),
            (plus("chr1", 100, 1000), plus("chr1", 400, 500)),
            (plus("chr1", 0, 10), plus("chr1", 10, 20)),
            (plus("chr1", 5, 6), plus("chr1", 0, 100)),
        ];
        for (a, b) in pairs.iter() {
            assert_eq!(coverage(a, b), coverage(b, a));
        }
    }

    #[test]
    fn coverage_of_identical_regions_is_one() {
        let a = plus("chr2", 7, 19);
        assert_eq!(coverage(&a, &a), 1.0);
    }

    #[test]
    fn coverage_requires_same_chrom_and_strand() {
        let a = plus("chr1", 100, 200);
        assert_eq!(coverage(&a, &plus("chr2", 100, 200)), 0.0);
        assert_eq!(coverage(&a, &region("chr1", 100, 200, Strand::Reverse)), 0.0);
    }

    #[test]
    fn coverage_of_disjoint_or_abutting_regions_is_zero() {
        let a = plus("chr1", 100, 200);
        assert_eq!(coverage(&a, &plus("chr1", 200, 300)), 0.0);
        assert_eq!(coverage(&a, &plus("chr1", 500, 600)), 0.0);
    }

    #[test]
    fn overlaps_compares_primaries_with_opposite_secondaries() {
        let mut first = LinkedRegion::new(plus("chr1", 100, 200));
        first.append_secondary(plus("chr2", 1000, 1100));
        let mut second = LinkedRegion::new(plus("chr2", 1010, 1100));
        second.append_secondary(plus("chr7", 0, 50));
        assert!(overlaps(&first, &second, DEFAULT_MIN_OVERLAP));
        assert!(overlaps(&second, &first, DEFAULT_MIN_OVERLAP));

        // primaries alone overlapping is not enough
        let lone_first = LinkedRegion::new(plus("chr1", 100, 200));
        let lone_second = LinkedRegion::new(plus("chr1", 100, 200));
        assert!(!overlaps(&lone_first, &lone_second, DEFAULT_MIN_OVERLAP));
    }

    #[test]
    fn merge_without_overlap_leaves_target_unchanged() {
        let mut target = LinkedRegion::new(plus("chr1", 100, 200));
        target.append_secondary(plus("chr2", 100, 200));
        let before = target.clone();
        let other = LinkedRegion::new(plus("chr1", 180, 400));
        merge(&mut target, &other, 0.5);
        assert_eq!(target, before);
    }

    #[test]
    fn merge_appends_once_per_matching_target_copy() {
        let mut target = LinkedRegion::new(plus("chr1", 100, 200));
        target.append_secondary(plus("chr1", 100, 200));
        let mut other = LinkedRegion::new(plus("chr1", 100, 190));
        other.append_secondary(plus("chr9", 0, 10));
        merge(&mut target, &other, 0.5);
        assert_eq!(target.secondary.len(), 3);
        assert_eq!(target.secondary[1], plus("chr1", 100, 190));
        assert_eq!(target.secondary[2], plus("chr1", 100, 190));
    }

    #[test]
    fn score_equal_to_threshold_does_not_count() {
        let half = plus("chr1", 50, 150);
        let above_half = plus("chr1", 33, 133);
        assert_eq!(coverage(&plus("chr1", 0, 100), &half), 0.5);
        assert!(coverage(&plus("chr1", 0, 100), &above_half) > 0.5);

        let first = LinkedRegion::new(plus("chr1", 0, 100));
        let mut at_threshold = LinkedRegion::new(plus("chr9", 0, 100));
        at_threshold.append_secondary(half.clone());
        assert!(!overlaps(&first, &at_threshold, 0.5));
        let mut past_threshold = LinkedRegion::new(plus("chr9", 0, 100));
        past_threshold.append_secondary(above_half.clone());
        assert!(overlaps(&first, &past_threshold, 0.5));

        let mut target = LinkedRegion::new(plus("chr1", 0, 100));
        merge(&mut target, &LinkedRegion::new(half), 0.5);
        assert!(target.secondary.is_empty());
        merge(&mut target, &LinkedRegion::new(above_half.clone()), 0.5);
        assert_eq!(target.secondary, vec![above_half]);
    }
}
