//! Binary operators accepted by the calculator
//!
//! Only the four basic operations exist. There is no precedence: the
//! state machine holds at most one pending operator and collapses it
//! before a new one is queued.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Rejection;

/// Type-safe operator enum - the only operations the keypad can queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

/// Error returned when a token does not name an operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator token: {token:?}")]
pub struct ParseOperatorError {
    /// The rejected token
    pub token: String,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the glyph shown on the keypad and in the previous-operand line
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{00d7}",
            Self::Divide => "\u{00f7}",
        }
    }

    /// Returns the plain keyboard character for this operator
    #[must_use]
    pub const fn ascii(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps a single character to an operator.
    ///
    /// Both the ASCII hyphen and the Unicode minus sign select subtraction.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '\u{2212}' => Some(Self::Subtract),
            '*' | '\u{00d7}' | 'x' => Some(Self::Multiply),
            '/' | '\u{00f7}' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Parses an operator token as written on a button or typed on a keyboard
    pub fn from_token(token: &str) -> Result<Self, ParseOperatorError> {
        let mut chars = token.trim().chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        };
        parsed.ok_or_else(|| ParseOperatorError {
            token: token.to_string(),
        })
    }

    /// Applies the operator to two operands.
    ///
    /// Division by zero and non-finite results are rejected rather than
    /// producing `inf` or `NaN`.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, Rejection> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(Rejection::DivisionByZero);
                }
                lhs / rhs
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(Rejection::NonFiniteResult)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}
