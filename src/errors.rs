use thiserror::Error;

/// Errors raised by fraction construction, arithmetic, float approximation and
/// matrix operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("incompatible dimensions: {lhs:?} and {rhs:?}")]
    IncompatibleDimensions {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("index ({row}, {column}) out of range for a {rows}x{columns} matrix")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("result does not fit in 64 bits")]
    Overflow,
}
