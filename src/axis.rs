use crate::{Result, ValueError};

/// Direction along which a two-dimensional table is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Axis `0`: each column is transformed independently
    #[default]
    Columns,
    /// Axis `1`: each row is transformed independently
    Rows,
}

impl Axis {
    /// Returns the numeric axis index, `0` or `1`
    pub const fn index(self) -> usize {
        match self {
            Self::Columns => 0,
            Self::Rows => 1,
        }
    }
}

/// Conversion of an axis selector into an [`Axis`]
///
/// Any value other than `0` or `1` fails with [`ValueError::InvalidAxis`],
/// including non-integral floats such as `0.5`.
pub trait IntoAxis {
    /// Converts `self` into an axis
    fn into_axis(self) -> Result<Axis>;
}

impl IntoAxis for Axis {
    fn into_axis(self) -> Result<Axis> {
        Ok(self)
    }
}

macro_rules! int_axis {
    ($($t:ty),*) => {
        $(
            impl IntoAxis for $t {
                fn into_axis(self) -> Result<Axis> {
                    match self {
                        0 => Ok(Axis::Columns),
                        1 => Ok(Axis::Rows),
                        _ => Err(ValueError::InvalidAxis.into()),
                    }
                }
            }
        )*
    };
}

int_axis!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

macro_rules! float_axis {
    ($($t:ty),*) => {
        $(
            impl IntoAxis for $t {
                fn into_axis(self) -> Result<Axis> {
                    if self == 0.0 {
                        Ok(Axis::Columns)
                    } else if self == 1.0 {
                        Ok(Axis::Rows)
                    } else {
                        Err(ValueError::InvalidAxis.into())
                    }
                }
            }
        )*
    };
}

float_axis!(f32, f64);
