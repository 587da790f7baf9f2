use super::{merge, overlaps, LinkedRegion};
use crate::utils::Reporter;
use std::collections::HashSet;

/// Collapses candidate families that describe the same set of genomic copies.
///
/// Pairs `(i, j)` with `i < j` are visited in row-major order against the current,
/// already merged state of the groups. When a pair overlaps, group `i` absorbs group `j`,
/// unless `i` was itself absorbed earlier, in which case `j` absorbs `i` and carries the
/// merged identity forward. The outcome depends on input order.
///
/// Returned groups are the groups never absorbed, in input order, followed by absorbed
/// groups that later became absorbing groups, in the order they first did so.
pub fn reconcile_groups(
    groups: Vec<(String, LinkedRegion)>,
    threshold: f64,
    reporter: &dyn Reporter,
) -> Vec<(String, LinkedRegion)> {
    let (keys, mut families): (Vec<String>, Vec<LinkedRegion>) = groups.into_iter().unzip();
    let num_groups = families.len();

    let mut absorbed = HashSet::new();
    let mut merged_order = Vec::new();
    for i in 0..num_groups {
        for j in (i + 1)..num_groups {
            if !overlaps(&families[i], &families[j], threshold) {
                continue;
            }
            let (left, right) = families.split_at_mut(j);
            if absorbed.contains(&i) {
                merge(&mut right[0], &left[i], threshold);
                record_merged(j, &mut merged_order);
                reporter.info(&format!("{} merged into {}", keys[i], keys[j]));
            } else {
                merge(&mut left[i], &right[0], threshold);
                record_merged(i, &mut merged_order);
                absorbed.insert(j);
                reporter.info(&format!("{} merged into {}", keys[j], keys[i]));
            }
        }
    }

    let mut order: Vec<usize> = (0..num_groups).filter(|k| !absorbed.contains(k)).collect();
    order.extend(merged_order.iter().filter(|k| absorbed.contains(*k)));

    let mut slots: Vec<Option<(String, LinkedRegion)>> =
        keys.into_iter().zip(families).map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

fn record_merged(index: usize, merged_order: &mut Vec<usize>) {
    if !merged_order.contains(&index) {
        merged_order.push(index);
    }
}
