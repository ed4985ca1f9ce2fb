// Stratified train/test split.
//
// Test rows are allocated per class in proportion to class size, so an
// imbalanced hoax/non-hoax dataset keeps its ratio in both partitions.
// Everything is driven by one seeded RNG: same seed, same partitions.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::dataset::class_counts;
use crate::error::DataError;

/// Row indices of the two disjoint partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `labels` into stratified train/test row indices.
///
/// The test partition holds `ceil(test_fraction * n)` rows.
pub fn stratified_split(
    labels: &Array1<usize>,
    n_classes: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices, DataError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DataError::InvalidSplit(format!(
            "test fraction must be between 0 and 1, got {test_fraction}"
        )));
    }

    let n = labels.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    let counts = class_counts(labels, n_classes);
    if let Some((class, &count)) = counts.iter().enumerate().find(|(_, &c)| c < 2) {
        return Err(DataError::InvalidSplit(format!(
            "class {class} has {count} member(s); at least 2 are required"
        )));
    }
    if n_test < n_classes || n_train < n_classes {
        return Err(DataError::InvalidSplit(format!(
            "{n} rows give {n_train} train / {n_test} test, fewer than the {n_classes} classes"
        )));
    }

    let test_per_class = allocate(&counts, n_test, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);

    for (class, &take) in test_per_class.iter().enumerate() {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);
        test.extend_from_slice(&members[..take]);
        train.extend_from_slice(&members[take..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}

/// Largest-remainder allocation of `total` test rows across classes.
///
/// Each class gets floor(count * total / n); leftover rows go to the
/// largest fractional remainders, then to larger classes, then lower index.
fn allocate(counts: &[usize], total: usize, n: usize) -> Vec<usize> {
    let mut alloc: Vec<usize> = counts.iter().map(|&c| c * total / n).collect();
    let assigned: usize = alloc.iter().sum();

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = counts[a] * total % n;
        let rb = counts[b] * total % n;
        rb.cmp(&ra)
            .then_with(|| counts[b].cmp(&counts[a]))
            .then_with(|| a.cmp(&b))
    });

    for &class in order.iter().take(total - assigned) {
        alloc[class] += 1;
    }
    alloc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_exact_proportions() {
        assert_eq!(allocate(&[600, 400], 200, 1000), vec![120, 80]);
    }

    #[test]
    fn test_allocate_distributes_leftover() {
        // 7 * 3 / 10 = 2.1, 3 * 3 / 10 = 0.9 -> remainders favour class 1
        assert_eq!(allocate(&[7, 3], 3, 10), vec![2, 1]);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let labels = Array1::from(vec![0, 0, 1, 1]);
        assert!(stratified_split(&labels, 2, 0.0, 1).is_err());
        assert!(stratified_split(&labels, 2, 1.0, 1).is_err());
    }
}
