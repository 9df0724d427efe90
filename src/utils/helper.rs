use num_traits::{Float, NumCast};
use ordered_float::OrderedFloat;

use alloc::vec::Vec;

use crate::Real;

/// Returns the permutation of indices that sorts the slice in ascending order
///
/// Equal values keep their input order.
///
/// # Arguments
///
/// * `xs` - The slice to sort
///
/// # Returns
///
/// * `Vec<usize>` - Indices into `xs`, smallest value first
#[inline]
pub fn argsort<T: Real>(xs: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(xs[i]));
    order
}

/// Returns `true` if any element of the slice is NaN
#[inline]
pub fn has_nan<T: Real>(xs: &[T]) -> bool {
    xs.iter().any(|&x| Float::is_nan(x))
}

/// Converts an element count to `T`
///
/// Counts are always representable for `f32` and `f64`, NaN is only returned
/// for exotic float types that cannot hold them.
#[inline]
pub fn count_as<T: Real>(n: usize) -> T {
    <T as NumCast>::from(n).unwrap_or_else(<T as Float>::nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argsort_orders_ascending() {
        let xs = [3.0, -1.0, 2.5, 0.0];
        assert_eq!(argsort(&xs), vec![1, 3, 2, 0]);
    }

    #[test]
    fn argsort_keeps_ties_in_input_order() {
        let xs = [2.0, 1.0, 2.0, 1.0];
        assert_eq!(argsort(&xs), vec![1, 3, 0, 2]);
    }

    #[test]
    fn argsort_empty() {
        let xs: [f64; 0] = [];
        assert!(argsort(&xs).is_empty());
    }

    #[test]
    fn has_nan_detects_any_position() {
        assert!(!has_nan(&[1.0_f64, 2.0]));
        assert!(has_nan(&[1.0, f64::NAN]));
        assert!(has_nan(&[f32::NAN]));
        assert!(!has_nan::<f64>(&[]));
    }

    #[test]
    fn count_as_is_exact_for_small_counts() {
        assert_eq!(count_as::<f64>(8), 8.0);
        assert_eq!(count_as::<f32>(0), 0.0);
    }
}
