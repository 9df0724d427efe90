use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    Axis, IntoAxis, IntoNdArray, NdArray, Real, Result, TypeError, ValueError, helper::has_nan,
};

/// A validated input ready to have a one-dimensional transform applied along
/// one of its axes.
///
/// Construction coerces and validates in a fixed order, failing on the first
/// problem found:
///
/// 1. coercion into an [`NdArray`] ([`crate::Error::InputType`])
/// 2. NaN elements ([`ValueError::ContainsNan`])
/// 3. the axis ([`ValueError::InvalidAxis`])
/// 4. more than two dimensions ([`ValueError::TooManyDimensions`])
///
/// # Examples
///
/// ```
/// # use tailblazer::{Dispatcher, percentile_rank_1d};
/// let ranks = Dispatcher::new(vec![vec![1.0, 4.0], vec![3.0, 2.0]], 0)
///     .and_then(|d| d.apply(percentile_rank_1d))
///     .unwrap();
/// assert_eq!(ranks.as_slice(), &[0.5, 1.0, 1.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    array: NdArray<T>,
    axis: Axis,
}

impl<T: Real> Dispatcher<T> {
    /// Coerces and validates an input
    ///
    /// # Arguments
    ///
    /// * `x` - Anything coercible to a numeric array
    /// * `axis` - `0` for columns, `1` for rows
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The validated input, or the first validation failure
    pub fn new<X, A>(x: X, axis: A) -> Result<Self>
    where
        X: IntoNdArray<T>,
        A: IntoAxis,
    {
        let array = x.into_ndarray()?;

        if has_nan(array.as_slice()) {
            tracing::debug!(shape = ?array.shape(), "rejecting input with nan values");
            return Err(ValueError::ContainsNan.into());
        }

        let axis = axis.into_axis()?;

        if array.ndim() > 2 {
            tracing::debug!(ndim = array.ndim(), "rejecting input with too many dimensions");
            return Err(ValueError::TooManyDimensions { ndim: array.ndim() }.into());
        }

        Ok(Self { array, axis })
    }

    /// Applies a one-dimensional transform along the axis
    ///
    /// Inputs with fewer than two dimensions are handed to `transform` whole, so
    /// its own dimension check decides what a scalar means. For a table, every
    /// column (axis 0) or row (axis 1) is transformed independently and the
    /// results are written back in place of their lane.
    ///
    /// # Arguments
    ///
    /// * `transform` - A 1-D transform returning one output per input element
    ///
    /// # Returns
    ///
    /// * `Result<NdArray<T>>` - Output shaped like the validated array, or
    ///   [`crate::TypeError::ShapeMismatch`] if `transform` returns a lane of the
    ///   wrong length
    pub fn apply<F>(self, transform: F) -> Result<NdArray<T>>
    where
        F: Fn(&NdArray<T>) -> Result<NdArray<T>> + Sync,
    {
        let &[rows, cols] = self.array.shape() else {
            tracing::debug!(ndim = self.array.ndim(), len = self.array.len(), "applying transform");
            return transform(&self.array);
        };

        let lanes = Lanes::new(rows, cols, self.axis);
        tracing::debug!(rows, cols, axis = self.axis.index(), lanes = lanes.count, "applying transform along axis");

        let data = self.array.as_slice();
        let apply_lane = |lane: usize| transform(&NdArray::vector(lanes.gather(data, lane)));

        #[cfg(feature = "rayon")]
        let outputs = (0..lanes.count)
            .into_par_iter()
            .map(apply_lane)
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "rayon"))]
        let outputs = (0..lanes.count)
            .map(apply_lane)
            .collect::<Result<Vec<_>>>()?;

        let mut out = vec![T::zero(); data.len()];
        for (lane, output) in outputs.iter().enumerate() {
            lanes.scatter(&mut out, lane, output.as_slice())?;
        }

        NdArray::from_shape_vec(vec![rows, cols], out)
    }
}

/// A row-major or column-major view of a row-major table, by index arithmetic
#[derive(Debug, Clone, Copy)]
struct Lanes {
    /// Number of lanes
    count: usize,
    /// Elements per lane
    len: usize,
    /// Flat distance between consecutive lanes
    lane_stride: usize,
    /// Flat distance between consecutive elements of a lane
    step: usize,
}

impl Lanes {
    const fn new(rows: usize, cols: usize, axis: Axis) -> Self {
        match axis {
            Axis::Columns => Self {
                count: cols,
                len: rows,
                lane_stride: 1,
                step: cols,
            },
            Axis::Rows => Self {
                count: rows,
                len: cols,
                lane_stride: cols,
                step: 1,
            },
        }
    }

    #[inline]
    const fn index(&self, lane: usize, offset: usize) -> usize {
        lane * self.lane_stride + offset * self.step
    }

    fn gather<T: Copy>(&self, data: &[T], lane: usize) -> Vec<T> {
        (0..self.len).map(|k| data[self.index(lane, k)]).collect()
    }

    fn scatter<T: Copy>(&self, out: &mut [T], lane: usize, values: &[T]) -> Result<()> {
        if values.len() != self.len {
            return Err(TypeError::ShapeMismatch {
                expected: self.len,
                found: values.len(),
            }
            .into());
        }
        for (k, &v) in values.iter().enumerate() {
            out[self.index(lane, k)] = v;
        }
        Ok(())
    }
}
