use std::fmt;
use thiserror::Error;

/// Which index of a container an out-of-range access was made on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Element,
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Element => write!(f, "index"),
            Axis::Row => write!(f, "row index"),
            Axis::Column => write!(f, "column index"),
        }
    }
}

/// Failures raised by `GrowableArray` and `Grid`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("{axis} {index} is out of bounds for length {len}")]
    IndexOutOfBounds { axis: Axis, index: isize, len: usize },
    #[error("{value} is not a valid size, sizes cannot be negative")]
    NegativeSize { value: i64 },
    #[error("input is not a 2-dimensional sequence")]
    NotTwoDimensional,
    #[error("input is not rectangular: row {row} has {actual} items, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Convert a signed size from a dynamically typed boundary into a container size.
pub fn size_from_signed(value: i64) -> Result<usize, ContainerError> {
    usize::try_from(value).map_err(|_| ContainerError::NegativeSize { value })
}

/// Resolve a possibly negative index against `len`, counting negatives from the end.
pub(crate) fn resolve_index(axis: Axis, index: isize, len: usize) -> Result<usize, ContainerError> {
    let out_of_bounds = ContainerError::IndexOutOfBounds { axis, index, len };
    if index >= 0 {
        let index = index as usize;
        if index >= len {
            return Err(out_of_bounds);
        }
        Ok(index)
    } else {
        let back = index.unsigned_abs();
        if back > len {
            return Err(out_of_bounds);
        }
        Ok(len - back)
    }
}
