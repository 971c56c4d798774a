//! Input commands and keyboard mapping
//!
//! Every adapter (terminal, page, browser) turns its events into a
//! [`Command`] and hands it to [`CalculatorState::apply`]. Key names follow
//! the browser `KeyboardEvent.key` values so the same table serves all of
//! them.

use tracing::trace;

use crate::core::{CalculatorState, Operator, Outcome};

/// One of the five calculator inputs, as data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append a digit or the decimal point
    AppendDigit(char),
    /// Queue an operator
    ChooseOperator(Operator),
    /// Resolve the pending operation
    Compute,
    /// Remove the last character
    DeleteLastChar,
    /// Reset everything
    Clear,
}

impl Command {
    /// Maps a key name to a command.
    ///
    /// ```
    /// use keypad_calc::core::Operator;
    /// use keypad_calc::keymap::Command;
    ///
    /// assert_eq!(Command::from_key("7"), Some(Command::AppendDigit('7')));
    /// assert_eq!(Command::from_key("*"), Some(Command::ChooseOperator(Operator::Multiply)));
    /// assert_eq!(Command::from_key("Enter"), Some(Command::Compute));
    /// assert_eq!(Command::from_key("Tab"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Compute),
            "Backspace" => Some(Self::DeleteLastChar),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Maps a typed character to a command (digits, `.`, `+ - * /`, `=`)
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' | '.' => Some(Self::AppendDigit(c)),
            '+' | '-' | '*' | '/' => Operator::from_char(c).map(Self::ChooseOperator),
            '=' => Some(Self::Compute),
            _ => None,
        }
    }

    /// Id of the on-screen button that performs this command
    #[must_use]
    pub fn button_id(&self) -> String {
        match self {
            Self::AppendDigit('.') => "btn-decimal".to_string(),
            Self::AppendDigit(d) => format!("btn-{d}"),
            Self::ChooseOperator(op) => format!("btn-{}", operator_name(*op)),
            Self::Compute => "btn-equals".to_string(),
            Self::DeleteLastChar => "btn-delete".to_string(),
            Self::Clear => "btn-clear".to_string(),
        }
    }

    /// Label printed on the button for this command
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::AppendDigit(d) => d.to_string(),
            Self::ChooseOperator(op) => op.symbol().to_string(),
            Self::Compute => "=".to_string(),
            Self::DeleteLastChar => "DEL".to_string(),
            Self::Clear => "AC".to_string(),
        }
    }
}

/// Keypad rows shared by the terminal and page adapters
/// ```text
/// [AC ] [DEL] [ ÷ ] [ × ]
/// [ 7 ] [ 8 ] [ 9 ] [ − ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
pub const KEYPAD_LAYOUT: [[Option<Command>; 4]; 5] = [
    [
        Some(Command::Clear),
        Some(Command::DeleteLastChar),
        Some(Command::ChooseOperator(Operator::Divide)),
        Some(Command::ChooseOperator(Operator::Multiply)),
    ],
    [
        Some(Command::AppendDigit('7')),
        Some(Command::AppendDigit('8')),
        Some(Command::AppendDigit('9')),
        Some(Command::ChooseOperator(Operator::Subtract)),
    ],
    [
        Some(Command::AppendDigit('4')),
        Some(Command::AppendDigit('5')),
        Some(Command::AppendDigit('6')),
        Some(Command::ChooseOperator(Operator::Add)),
    ],
    [
        Some(Command::AppendDigit('1')),
        Some(Command::AppendDigit('2')),
        Some(Command::AppendDigit('3')),
        Some(Command::Compute),
    ],
    [
        Some(Command::AppendDigit('0')),
        Some(Command::AppendDigit('.')),
        None,
        None,
    ],
];

/// Name used in element ids for an operator
#[must_use]
pub const fn operator_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "add",
        Operator::Subtract => "subtract",
        Operator::Multiply => "multiply",
        Operator::Divide => "divide",
    }
}

impl CalculatorState {
    /// Runs one command, swallowing rejections
    pub fn apply(&mut self, command: Command) {
        trace!(?command, "apply");
        match command {
            Command::AppendDigit(c) => self.append_digit(c),
            Command::ChooseOperator(op) => self.choose_operator(op),
            Command::Compute => self.compute(),
            Command::DeleteLastChar => self.delete_last_char(),
            Command::Clear => self.clear(),
        }
    }

    /// Runs one command, reporting whether it changed anything
    pub fn try_apply(&mut self, command: Command) -> Outcome {
        trace!(?command, "try_apply");
        match command {
            Command::AppendDigit(c) => self.try_append_digit(c),
            Command::ChooseOperator(op) => self.try_choose_operator(op),
            Command::Compute => self.try_compute().map(|_| ()),
            Command::DeleteLastChar => self.try_delete_last_char(),
            Command::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    /// Runs the command bound to a key name; unknown keys are ignored.
    ///
    /// Returns the command that ran, if any.
    pub fn press_key(&mut self, key: &str) -> Option<Command> {
        let command = Command::from_key(key)?;
        self.apply(command);
        Some(command)
    }
}
