use alloc::vec::Vec;

use crate::{Real, Result, TypeError};

/// An owned, row-major array of up to any number of dimensions.
///
/// The transforms accept at most two dimensions, but coercion itself is
/// dimension-agnostic so that the dimension guard can report what it found.
/// A scalar is represented with an empty shape and a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T> {
    /// Extent of each dimension, outermost first
    shape: Vec<usize>,
    /// Elements in row-major order
    data: Vec<T>,
}

impl<T> NdArray<T> {
    /// Creates an array from a shape and a row-major buffer
    ///
    /// # Arguments
    ///
    /// * `shape` - Extent of each dimension, outermost first
    /// * `data` - Elements in row-major order
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The array, or [`TypeError::ShapeMismatch`] if the buffer
    ///   length differs from the product of the shape
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(TypeError::ShapeMismatch {
                expected,
                found: data.len(),
            }
            .into());
        }
        Ok(Self { shape, data })
    }

    /// Creates a one-dimensional array
    pub fn vector(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Creates a zero-dimensional array holding a single value
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// Extent of each dimension, outermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the array, returning its row-major buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the element at a multi-dimensional index
    ///
    /// # Arguments
    ///
    /// * `index` - One coordinate per dimension
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The element, or `None` if the index has the wrong number
    ///   of coordinates or any coordinate is out of bounds
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &extent) in index.iter().zip(&self.shape) {
            if i >= extent {
                return None;
            }
            flat = flat * extent + i;
        }
        self.data.get(flat)
    }

    /// Splits a two-dimensional array into its rows
    ///
    /// # Returns
    ///
    /// * `Option<Vec<Vec<T>>>` - The rows, or `None` if the array is not 2-D
    pub fn into_rows(self) -> Option<Vec<Vec<T>>> {
        let &[rows, cols] = self.shape.as_slice() else {
            return None;
        };
        let mut data = self.data.into_iter();
        Some(
            (0..rows)
                .map(|_| data.by_ref().take(cols).collect())
                .collect(),
        )
    }
}

/// Conversion into a rectangular numeric array
///
/// This is the coercion boundary of the crate: an implementation either yields
/// an [`NdArray`] or fails with [`crate::Error::InputType`].
pub trait IntoNdArray<T> {
    /// Coerces `self` into an array
    fn into_ndarray(self) -> Result<NdArray<T>>;
}

impl<T> IntoNdArray<T> for NdArray<T> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(self)
    }
}

impl<T: Clone> IntoNdArray<T> for &NdArray<T> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(self.clone())
    }
}

impl<T: Real> IntoNdArray<T> for Vec<T> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(NdArray::vector(self))
    }
}

impl<T: Real> IntoNdArray<T> for &Vec<T> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(NdArray::vector(self.clone()))
    }
}

impl<T: Real> IntoNdArray<T> for &[T] {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(NdArray::vector(self.to_vec()))
    }
}

impl<T: Real, const N: usize> IntoNdArray<T> for [T; N] {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        Ok(NdArray::vector(Vec::from(self)))
    }
}

impl<T: Real> IntoNdArray<T> for Vec<Vec<T>> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        let (shape, data) = stack(self.into_iter().map(|row| (vec![row.len()], row)))?;
        NdArray::from_shape_vec(shape, data)
    }
}

impl<T: Real> IntoNdArray<T> for &[Vec<T>] {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        IntoNdArray::<T>::into_ndarray(self.to_vec())
    }
}

impl<T: Real, const M: usize, const N: usize> IntoNdArray<T> for [[T; M]; N] {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        let data = self.into_iter().flatten().collect();
        NdArray::from_shape_vec(vec![N, M], data)
    }
}

impl<T: Real> IntoNdArray<T> for Vec<Vec<Vec<T>>> {
    fn into_ndarray(self) -> Result<NdArray<T>> {
        let planes = self
            .into_iter()
            .map(|plane| IntoNdArray::<T>::into_ndarray(plane).map(|a| (a.shape, a.data)))
            .collect::<Result<Vec<_>>>()?;
        let (shape, data) = stack(planes)?;
        NdArray::from_shape_vec(shape, data)
    }
}

// Stacks equally shaped sub-arrays along a new outer dimension
fn stack<T, I>(parts: I) -> Result<(Vec<usize>, Vec<T>)>
where
    I: IntoIterator<Item = (Vec<usize>, Vec<T>)>,
{
    let mut inner: Option<Vec<usize>> = None;
    let mut data = Vec::new();
    let mut count = 0;

    for (shape, part) in parts {
        match &inner {
            None => inner = Some(shape),
            Some(expected) if *expected != shape => return Err(TypeError::Ragged.into()),
            Some(_) => {}
        }
        data.extend(part);
        count += 1;
    }

    let mut shape = vec![count];
    // An empty outer sequence still has the dimensionality of its type
    shape.extend(inner.unwrap_or_else(|| vec![0]));
    Ok((shape, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn vector_has_one_dimension() {
        let a: NdArray<f64> = vec![1.0, 2.0, 3.0].into_ndarray().unwrap();
        assert_eq!(a.shape(), &[3]);
        assert_eq!(a.ndim(), 1);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn scalar_has_no_dimensions() {
        let a = NdArray::scalar(4.0);
        assert_eq!(a.ndim(), 0);
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(&[]), Some(&4.0));
    }

    #[test]
    fn nested_vecs_are_row_major() {
        let a: NdArray<f64> = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
            .into_ndarray()
            .unwrap();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.get(&[1, 0]), Some(&4.0));
        assert_eq!(a.get(&[0, 3]), None);
        assert_eq!(a.get(&[0]), None);
    }

    #[test]
    fn nested_arrays_are_row_major() {
        let a: NdArray<f64> = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].into_ndarray().unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a.get(&[2, 1]), Some(&6.0));
    }

    #[test]
    fn ragged_rows_are_a_type_error() {
        let err = IntoNdArray::<f64>::into_ndarray(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, Error::InputType(TypeError::Ragged));
    }

    #[test]
    fn ragged_planes_are_a_type_error() {
        let err = IntoNdArray::<f64>::into_ndarray(vec![vec![vec![1.0, 2.0]], vec![vec![3.0]]])
            .unwrap_err();
        assert_eq!(err, Error::InputType(TypeError::Ragged));
    }

    #[test]
    fn three_dimensions_coerce() {
        let a: NdArray<f64> = vec![vec![vec![1.0, 2.0]]].into_ndarray().unwrap();
        assert_eq!(a.shape(), &[1, 1, 2]);
    }

    #[test]
    fn empty_inputs_keep_their_dimensionality() {
        let a: NdArray<f64> = Vec::<f64>::new().into_ndarray().unwrap();
        assert_eq!(a.shape(), &[0]);

        let a: NdArray<f64> = Vec::<Vec<f64>>::new().into_ndarray().unwrap();
        assert_eq!(a.shape(), &[0, 0]);

        let a: NdArray<f64> = vec![Vec::<f64>::new()].into_ndarray().unwrap();
        assert_eq!(a.shape(), &[1, 0]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let err = NdArray::from_shape_vec(vec![2, 2], vec![1.0_f64, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::InputType(TypeError::ShapeMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn into_rows_splits_two_dimensions() {
        let a = NdArray::from_shape_vec(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.into_rows(), Some(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
        assert_eq!(NdArray::vector(vec![1.0]).into_rows(), None);
    }
}
