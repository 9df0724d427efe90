use num_traits::NumCast;

use alloc::vec::Vec;

use crate::{
    Kbn, NdArray, Real, Result, ValueError,
    helper::{argsort, count_as},
    rank::ranks_by_order,
};

/// A validated tail threshold in `[0.01, 0.99]`
///
/// For an element of rank `r`, the tail window holds every value seen so far
/// whose rank is at least `tail * r`. Smaller thresholds include a larger tail.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tail<T>(T);

impl<T: Real> Tail<T> {
    /// Smallest accepted threshold
    pub const MIN: f64 = 0.01;
    /// Largest accepted threshold
    pub const MAX: f64 = 0.99;
    /// Threshold used by [`Tail::default`]
    pub const DEFAULT: f64 = 0.95;

    /// Creates a tail threshold
    ///
    /// # Arguments
    ///
    /// * `value` - The threshold
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The threshold, or [`ValueError::TailOutOfRange`] if it
    ///   lies outside `[0.01, 0.99]` or is NaN
    pub fn new(value: T) -> Result<Self> {
        let lo = <T as NumCast>::from(Self::MIN).ok_or(ValueError::TailOutOfRange)?;
        let hi = <T as NumCast>::from(Self::MAX).ok_or(ValueError::TailOutOfRange)?;

        if !(lo..=hi).contains(&value) {
            return Err(ValueError::TailOutOfRange.into());
        }
        Ok(Self(value))
    }

    /// Returns the threshold
    pub const fn value(self) -> T {
        self.0
    }
}

impl<T: Real> Default for Tail<T> {
    fn default() -> Self {
        Self(<T as NumCast>::from(Self::DEFAULT).unwrap_or_else(T::one))
    }
}

/// Conversion of a tail selector into a validated [`Tail`]
pub trait IntoTail<T> {
    /// Converts `self` into a tail threshold
    fn into_tail(self) -> Result<Tail<T>>;
}

impl<T: Real> IntoTail<T> for Tail<T> {
    fn into_tail(self) -> Result<Tail<T>> {
        Ok(self)
    }
}

impl IntoTail<f64> for f64 {
    fn into_tail(self) -> Result<Tail<f64>> {
        Tail::new(self)
    }
}

impl IntoTail<f32> for f32 {
    fn into_tail(self) -> Result<Tail<f32>> {
        Tail::new(self)
    }
}

/// Computes the cumulative tail mean of every element of a one-dimensional array
///
/// Elements are visited in ascending order. Each output is the mean of the
/// values visited so far whose percentile rank is at least `tail` times the
/// rank of the current element. An empty array yields an empty array.
///
/// # Arguments
///
/// * `x` - A one-dimensional array
/// * `tail` - Tail threshold in `[0.01, 0.99]`
///
/// # Returns
///
/// * `Result<NdArray<T>>` - Tail means, positionally aligned with `x`, or
///   [`ValueError::TailOutOfRange`] / [`ValueError::NotOneDimensional`]
///
/// # Examples
///
/// ```
/// # use tailblazer::{NdArray, cumulative_tail_mean_1d};
/// let x = NdArray::vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// let means = cumulative_tail_mean_1d(&x, 0.5).unwrap();
/// assert_eq!(
///     means.as_slice(),
///     &[1.0, 1.5, 2.5, 3.0, 4.0, 4.5, 5.5, 6.0]
/// );
/// ```
pub fn cumulative_tail_mean_1d<T, U>(x: &NdArray<T>, tail: U) -> Result<NdArray<T>>
where
    T: Real,
    U: IntoTail<T>,
{
    let tail = tail.into_tail()?;
    if x.ndim() != 1 {
        return Err(ValueError::NotOneDimensional { ndim: x.ndim() }.into());
    }
    Ok(NdArray::vector(tail_mean_lane(x.as_slice(), tail)))
}

/// Computes tail means over a contiguous lane
///
/// A single ascending pass keeps a window `[floor, i]` over the sort order.
/// Thresholds never decrease along the order, so `floor` only advances and
/// trimming is linear after the sort. The window is never empty at the
/// division: the element just added has rank `r >= tail * r`.
pub(crate) fn tail_mean_lane<T: Real>(xs: &[T], tail: Tail<T>) -> Vec<T> {
    tracing::trace!(len = xs.len(), "computing tail means over lane");

    let order = argsort(xs);
    let ranks = ranks_by_order(xs, &order);

    let mut means = vec![T::zero(); xs.len()];
    let mut sum = Kbn::<T>::default();
    let mut count = 0_usize;
    let mut floor = 0_usize;

    for &i in &order {
        sum += xs[i];
        count += 1;

        let threshold = tail.value() * ranks[i];
        while ranks[order[floor]] < threshold {
            sum -= xs[order[floor]];
            count -= 1;
            floor += 1;
        }

        means[i] = sum.total() / count_as::<T>(count);
    }

    means
}
