//! Calculator core: operand state, operators and display formatting
//!
//! Every input the core cannot act on is a silent no-op for the user.
//! The `try_*` operations report why through [`Rejection`].

pub mod format;
pub mod operator;
mod state;

pub use format::{format_for_display, DisplayFormat};
pub use operator::{Operator, ParseOperatorError};
pub use state::{CalculatorState, DisplaySnapshot, PendingOperation};

use thiserror::Error;

/// Result type for core operations
pub type Outcome<T = ()> = Result<T, Rejection>;

/// Why an input left the calculator state unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The current operand already contains a decimal point
    #[error("operand already has a decimal point")]
    DuplicateDecimalPoint,
    /// The token is neither a digit nor a decimal point
    #[error("not a digit: {0:?}")]
    InvalidDigit(char),
    /// Delete was pressed on the `0` placeholder
    #[error("nothing to delete")]
    PlaceholderDelete,
    /// An operator was chosen with no current operand
    #[error("no operand to apply the operator to")]
    EmptyOperand,
    /// Compute was requested with no pending operation
    #[error("no pending operation")]
    NothingPending,
    /// An operand could not be read as a decimal number
    #[error("operand is not a number: {0:?}")]
    UnparseableOperand(String),
    /// Division by zero attempted
    #[error("division by zero")]
    DivisionByZero,
    /// The result overflowed to infinity or was NaN
    #[error("result is not a finite number")]
    NonFiniteResult,
}
