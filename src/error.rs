use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while validating input to the rank and tail-mean transforms.
///
/// Every error is a caller-input error: it is reported immediately, no partial
/// result is produced, and retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input could not be coerced into a numeric array
    #[error("input type error: {0}")]
    InputType(#[from] TypeError),
    /// The input was coerced but holds a value the transforms reject
    #[error("input value error: {0}")]
    InputValue(#[from] ValueError),
}

impl Error {
    /// Returns `true` if the input could not be coerced into a numeric array
    pub const fn is_input_type(&self) -> bool {
        matches!(self, Self::InputType(_))
    }

    /// Returns `true` if the input was coerced but failed a value check
    pub const fn is_input_value(&self) -> bool {
        matches!(self, Self::InputValue(_))
    }
}

/// Reasons an input could not be coerced into a rectangular numeric array
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Nested sequences of unequal length at the same depth
    #[error("`x` must be rectangular, found sequences of unequal length")]
    Ragged,
    /// A leaf value that has no numeric interpretation
    #[error("`x` must be numeric, found a non-numeric {found}")]
    NotNumeric {
        /// Kind of the offending value
        found: &'static str,
    },
    /// A value that is not a sequence or a scalar, such as a mapping
    #[error("`x` must be an array or coercible to an array, found {found}")]
    NotArrayLike {
        /// Kind of the offending value
        found: &'static str,
    },
    /// A flat buffer whose length does not match the requested shape
    #[error("shape holds {expected} elements but the buffer holds {found}")]
    ShapeMismatch {
        /// Number of elements implied by the shape
        expected: usize,
        /// Number of elements in the buffer
        found: usize,
    },
}

/// Reasons a coerced input is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// At least one element is NaN
    #[error("`x` cannot contain nan values")]
    ContainsNan,
    /// The axis is neither 0 nor 1
    #[error("`axis` must be 0 or 1")]
    InvalidAxis,
    /// The array has more than two dimensions
    #[error("only 1 and 2D arrays are supported, found {ndim} dimensions")]
    TooManyDimensions {
        /// Dimensions of the rejected array
        ndim: usize,
    },
    /// The tail threshold lies outside `[0.01, 0.99]`
    #[error("`tail` must be between 0.01 and 0.99")]
    TailOutOfRange,
    /// A 1-D engine received an array that is not one-dimensional
    #[error("only 1D arrays are supported, found {ndim} dimensions")]
    NotOneDimensional {
        /// Dimensions of the rejected array
        ndim: usize,
    },
}
