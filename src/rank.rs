use alloc::vec::Vec;

use crate::{
    NdArray, Real, Result, ValueError,
    helper::{argsort, count_as},
};

/// Computes the percentile rank of every element of a one-dimensional array
///
/// The rank of an element is the fraction of elements less than or equal to it,
/// so the maximum maps to `1.0` and every member of a tie group shares the
/// highest rank of the group. An empty array yields an empty array.
///
/// # Arguments
///
/// * `x` - A one-dimensional array
///
/// # Returns
///
/// * `Result<NdArray<T>>` - Ranks in `(0, 1]`, positionally aligned with `x`,
///   or [`ValueError::NotOneDimensional`] if `x` is not 1-D
///
/// # Examples
///
/// ```
/// # use tailblazer::{NdArray, percentile_rank_1d};
/// let x = NdArray::vector(vec![3.0, 1.0, 3.0, 2.0]);
/// let ranks = percentile_rank_1d(&x).unwrap();
/// assert_eq!(ranks.as_slice(), &[1.0, 0.25, 1.0, 0.5]);
/// ```
pub fn percentile_rank_1d<T: Real>(x: &NdArray<T>) -> Result<NdArray<T>> {
    if x.ndim() != 1 {
        return Err(ValueError::NotOneDimensional { ndim: x.ndim() }.into());
    }
    Ok(NdArray::vector(rank_lane(x.as_slice())))
}

/// Ranks a contiguous lane
pub(crate) fn rank_lane<T: Real>(xs: &[T]) -> Vec<T> {
    ranks_by_order(xs, &argsort(xs))
}

/// Ranks a lane given its ascending sort order
///
/// Walks the order from the largest value down with a position counter that
/// starts at `n`. A run of equal values keeps the rank of its first visited
/// member, which is the largest position of the run.
pub(crate) fn ranks_by_order<T: Real>(xs: &[T], order: &[usize]) -> Vec<T> {
    tracing::trace!(len = xs.len(), "ranking lane");

    let total = count_as::<T>(xs.len());
    let mut ranks = vec![T::zero(); xs.len()];
    let mut last: Option<(T, T)> = None;

    for (position, &i) in (1..=xs.len()).rev().zip(order.iter().rev()) {
        let value = xs[i];
        let rank = match last {
            Some((prev, rank)) if prev == value => rank,
            _ => count_as::<T>(position) / total,
        };
        last = Some((value, rank));
        ranks[i] = rank;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn increasing_input_ranks_linearly() {
        let x = NdArray::vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let ranks = percentile_rank_1d(&x).unwrap();
        assert_eq!(
            ranks.as_slice(),
            &[0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0]
        );
    }

    #[test]
    fn shuffled_input_ranks_by_value() {
        let x = NdArray::vector(vec![1.0, 8.0, 2.0, 3.0, 7.0, 4.0, 6.0, 5.0]);
        let ranks = percentile_rank_1d(&x).unwrap();
        assert_eq!(
            ranks.as_slice(),
            &[0.125, 1.0, 0.25, 0.375, 0.875, 0.5, 0.75, 0.625]
        );
    }

    #[test]
    fn ties_share_the_highest_rank_of_their_group() {
        let ranks = rank_lane(&[5.0, 1.0, 5.0, 1.0, 5.0]);
        assert_eq!(ranks, vec![1.0, 0.4, 1.0, 0.4, 1.0]);

        let ranks = rank_lane(&[2.0, 2.0, 2.0]);
        assert_eq!(ranks, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn negative_and_mixed_values() {
        let ranks = rank_lane(&[-3.5, 0.0, -10.0, 2.25]);
        assert_eq!(ranks, vec![0.5, 0.75, 0.25, 1.0]);
    }

    #[test]
    fn signed_zeros_tie() {
        let ranks = rank_lane(&[0.0_f64, -0.0, 1.0]);
        assert_eq!(ranks[0], ranks[1]);
        assert_approx_eq!(ranks[0], 2.0 / 3.0);
    }

    #[test]
    fn single_element_is_maximal() {
        assert_eq!(rank_lane(&[42.0]), vec![1.0]);
    }

    #[test]
    fn f32_lanes() {
        let ranks = rank_lane(&[4.0_f32, 3.0, 2.0, 1.0]);
        assert_eq!(ranks, vec![1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn empty_passes_through() {
        let x = NdArray::<f64>::vector(vec![]);
        let ranks = percentile_rank_1d(&x).unwrap();
        assert_eq!(ranks.shape(), &[0]);
    }

    #[test]
    fn rejects_scalar() {
        let err = percentile_rank_1d(&NdArray::scalar(1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::InputValue(ValueError::NotOneDimensional { ndim: 0 })
        );
    }

    #[test]
    fn rejects_two_dimensions() {
        let x = NdArray::from_shape_vec(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let err = percentile_rank_1d(&x).unwrap_err();
        assert_eq!(
            err,
            Error::InputValue(ValueError::NotOneDimensional { ndim: 2 })
        );
    }
}
