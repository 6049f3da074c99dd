//! Index math for tensor-product operations on a dense amplitude vector.
//!
//! A vector over `n` qubits is indexed with local position 0 as the most significant bit, so a
//! container holding `[a, b]` stores `a ⊗ b`. Fixing a sequence of `targets` splits the index into
//! a sub-index over the targets (again most significant first, in the order given) and a base
//! assignment of every other bit.

use crate::utils::{get_bit, set_bit};
use std::ops::MulAssign;

/// Get the sub-index over `targets` contained in `full_index` of an `n` qubit space.
///
/// # Example
/// ```
/// use qreg::index_translator::full_to_sub;
///
/// // Positions 2 and 0 of |abc> = |011>, read in that order: c=1, a=0.
/// assert_eq!(full_to_sub(3, &[2, 0], 0b011), 0b10);
/// ```
pub fn full_to_sub(n: usize, targets: &[usize], full_index: usize) -> usize {
    let k = targets.len();
    targets.iter().enumerate().fold(0, |acc, (j, indx)| {
        let bit = get_bit(full_index, n - 1 - *indx);
        set_bit(acc, k - 1 - j, bit)
    })
}

/// Write `sub_index` over `targets` into `base`, giving an index into the `n` qubit space.
///
/// # Example
/// ```
/// use qreg::index_translator::sub_to_full;
///
/// assert_eq!(sub_to_full(3, &[2, 0], 0b10, 0b000), 0b001);
/// assert_eq!(sub_to_full(3, &[2, 0], 0b01, 0b010), 0b110);
/// ```
pub fn sub_to_full(n: usize, targets: &[usize], sub_index: usize, base: usize) -> usize {
    let k = targets.len();
    targets.iter().enumerate().fold(base, |acc, (j, indx)| {
        let bit = get_bit(sub_index, k - 1 - j);
        set_bit(acc, n - 1 - *indx, bit)
    })
}

/// Positions of an `n` qubit space not named in `targets`, in ascending order.
pub fn complement(n: usize, targets: &[usize]) -> Vec<usize> {
    (0..n).filter(|p| !targets.contains(p)).collect()
}

/// For each assignment of the bits outside `targets`, the `2^k` full indices obtained by setting
/// the targets to each sub-value in turn. Entry `s` of a group is the full index whose sub-index
/// over `targets` is `s`. Groups are disjoint and together cover all `2^n` indices.
///
/// # Example
/// ```
/// use qreg::index_translator::translate_indices;
///
/// let groups = translate_indices(2, &[1]);
/// assert_eq!(groups, vec![vec![0b00, 0b01], vec![0b10, 0b11]]);
///
/// let groups = translate_indices(2, &[1, 0]);
/// assert_eq!(groups, vec![vec![0b00, 0b10, 0b01, 0b11]]);
/// ```
pub fn translate_indices(n: usize, targets: &[usize]) -> Vec<Vec<usize>> {
    let others = complement(n, targets);
    (0..1usize << others.len())
        .map(|rest| {
            let base = sub_to_full(n, &others, rest, 0);
            (0..1usize << targets.len())
                .map(|sub| sub_to_full(n, targets, sub, base))
                .collect()
        })
        .collect()
}

/// `amps[indices[s]] *= values[s]` for every `s`.
pub fn index_multiply_in<T>(amps: &mut [T], indices: &[usize], values: &[T])
where
    T: Clone + MulAssign,
{
    debug_assert_eq!(indices.len(), values.len());
    indices
        .iter()
        .zip(values.iter())
        .for_each(|(i, v)| amps[*i] *= v.clone());
}

/// `amps[indices[s]] = values[s]` for every `s`.
pub fn index_set<T: Clone>(amps: &mut [T], indices: &[usize], values: &[T]) {
    debug_assert_eq!(indices.len(), values.len());
    indices
        .iter()
        .zip(values.iter())
        .for_each(|(i, v)| amps[*i] = v.clone());
}

/// Collect `amps[indices[s]]` for every `s`.
pub fn index_gather<T: Clone>(amps: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|i| amps[*i].clone()).collect()
}

#[cfg(test)]
mod index_translator_tests {
    use super::*;

    #[test]
    fn test_round_trip_all_indices() {
        let n = 4;
        let targets = [3, 1];
        for full in 0..1 << n {
            let sub = full_to_sub(n, &targets, full);
            assert_eq!(sub_to_full(n, &targets, sub, full), full);
        }
    }

    #[test]
    fn test_groups_partition_space() {
        let n = 4;
        let groups = translate_indices(n, &[2, 0]);
        assert_eq!(groups.len(), 4);
        let mut seen: Vec<usize> = groups.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..1 << n).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_targets_is_permutation() {
        let groups = translate_indices(3, &[2, 1, 0]);
        assert_eq!(groups.len(), 1);
        // Reversing positions reverses the index bits.
        assert_eq!(groups[0], vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_multiply_in_builds_kron() {
        // [1, 2] ⊗ [3, 5]
        let mut amps = vec![1.0; 4];
        translate_indices(2, &[0])
            .iter()
            .for_each(|g| index_multiply_in(&mut amps, g, &[1.0, 2.0]));
        translate_indices(2, &[1])
            .iter()
            .for_each(|g| index_multiply_in(&mut amps, g, &[3.0, 5.0]));
        assert_eq!(amps, vec![3.0, 5.0, 6.0, 10.0]);
    }

    #[test]
    fn test_set_and_gather() {
        let mut amps = vec![0; 4];
        index_set(&mut amps, &[3, 0], &[7, 9]);
        assert_eq!(amps, vec![9, 0, 0, 7]);
        assert_eq!(index_gather(&amps, &[0, 3]), vec![9, 7]);
    }
}
