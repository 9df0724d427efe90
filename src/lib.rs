#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

use num_traits::Float;
use ordered_float::PrimitiveFloat;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;

mod error;
pub use error::{Error, Result, TypeError, ValueError};

mod array;
pub use array::{IntoNdArray, NdArray};

#[cfg(feature = "json")]
mod json;

mod axis;
pub use axis::{Axis, IntoAxis};

mod rank;
pub use rank::percentile_rank_1d;

mod tail_mean;
pub use tail_mean::{IntoTail, Tail, cumulative_tail_mean_1d};

mod dispatch;
pub use dispatch::Dispatcher;

/// Floating point element types the transforms operate on
///
/// Implemented for `f32` and `f64`.
pub trait Real: Float + PrimitiveFloat + Default + Send + Sync {}

impl<T: Float + PrimitiveFloat + Default + Send + Sync> Real for T {}

/// Computes the percentile rank of every element along an axis
///
/// Each output element is the fraction of values in its row or column that are
/// less than or equal to it, so the largest value maps to `1.0` and equal values
/// share the highest rank of their group. A 1-D input ignores the axis beyond
/// validating it.
///
/// # Arguments
///
/// * `x` - Anything coercible to a numeric array of at most two dimensions
/// * `axis` - `0` ranks each column, `1` ranks each row
///
/// # Returns
///
/// * `Result<NdArray<T>>` - Ranks in `(0, 1]`, shaped like the coerced input
///
/// # Errors
///
/// * [`Error::InputType`] if `x` cannot be coerced
/// * [`Error::InputValue`] if `x` holds NaN, the axis is not 0 or 1, or `x` has
///   more than two dimensions
///
/// # Examples
///
/// ```
/// use tailblazer::percentile_rank;
///
/// let ranks = percentile_rank([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 0).unwrap();
/// assert_eq!(
///     ranks.as_slice(),
///     &[0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0]
/// );
///
/// let ranks = percentile_rank([[1.0, 2.0], [3.0, 4.0]], 1).unwrap();
/// assert_eq!(ranks.as_slice(), &[0.5, 1.0, 0.5, 1.0]);
/// ```
pub fn percentile_rank<T, X, A>(x: X, axis: A) -> Result<NdArray<T>>
where
    T: Real,
    X: IntoNdArray<T>,
    A: IntoAxis,
{
    Dispatcher::new(x, axis)?.apply(percentile_rank_1d)
}

/// Computes the cumulative tail mean of every element along an axis
///
/// Walking a row or column in ascending order, each output element is the mean
/// of the values seen so far whose percentile rank is at least `tail` times the
/// current element's rank. Smaller `tail` values average over a wider tail.
///
/// # Arguments
///
/// * `x` - Anything coercible to a numeric array of at most two dimensions
/// * `axis` - `0` processes each column, `1` processes each row
/// * `tail` - Tail threshold in `[0.01, 0.99]`, see [`Tail::default`] for the
///   conventional `0.95`
///
/// # Returns
///
/// * `Result<NdArray<T>>` - Tail means, shaped like the coerced input
///
/// # Errors
///
/// * [`Error::InputType`] if `x` cannot be coerced
/// * [`Error::InputValue`] if `x` holds NaN, the axis is not 0 or 1, `x` has
///   more than two dimensions, or `tail` is out of range
///
/// # Examples
///
/// ```
/// use tailblazer::cumulative_tail_mean;
///
/// let x = [[1.0, 2.0, 3.0, 4.0], [3.0, 4.0, 5.0, 6.0]];
///
/// let by_column = cumulative_tail_mean(x, 0, 0.5).unwrap();
/// assert_eq!(by_column.as_slice(), &[1.0, 2.0, 3.0, 4.0, 2.0, 3.0, 4.0, 5.0]);
///
/// let by_row = cumulative_tail_mean(x, 1, 0.5).unwrap();
/// assert_eq!(by_row.as_slice(), &[1.0, 1.5, 2.5, 3.0, 3.0, 3.5, 4.5, 5.0]);
/// ```
pub fn cumulative_tail_mean<T, X, A, U>(x: X, axis: A, tail: U) -> Result<NdArray<T>>
where
    T: Real,
    X: IntoNdArray<T>,
    A: IntoAxis,
    U: IntoTail<T>,
{
    let dispatcher = Dispatcher::new(x, axis)?;
    let tail = tail.into_tail()?;
    dispatcher.apply(|lane| cumulative_tail_mean_1d(lane, tail))
}
