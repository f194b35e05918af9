//! Errors raised by calculator operations.

use thiserror::Error;

/// A failed calculator operation.
///
/// These never escape the state machine: they put it into the error state
/// and are logged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The operand is outside the domain of the operation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Binary division or reciprocal of zero.
    #[error("division by zero")]
    DivisionByZero,
}

pub type CalcResult<T> = Result<T, CalcError>;
