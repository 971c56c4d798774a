//! keypad-calc - Four-Function Keypad Calculator
//!
//! A pocket-calculator state machine: one operand being typed, at most
//! one operation waiting for its right-hand side, and a two-line display
//! with digit grouping. Frontends stay thin; each turns its events into a
//! [`keymap::Command`].
//!
//! - [`core`]: operand entry, chaining, computing, display formatting
//! - [`keymap`]: keyboard names and keypad buttons to commands
//! - [`web`]: the page wiring over a mock DOM, plus browser bindings
//!   behind the `wasm` feature
//! - [`tui`]: terminal frontend behind the `tui` feature (default)
//! - [`driver`]: one behavioural suite run against every frontend
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut calc = CalculatorState::new();
//! for key in ["1", "2", "0", "0", "*", "3"] {
//!     calc.press_key(key);
//! }
//! assert_eq!(calc.previous_display_text(), "1,200 ×");
//!
//! calc.press_key("Enter");
//! assert_eq!(calc.current_display_text(), "3,600");
//! assert_eq!(calc.previous_display_text(), "");
//!
//! // Invalid input is ignored
//! calc.press_key("/");
//! calc.press_key("0");
//! calc.press_key("Enter");
//! assert_eq!(calc.previous_display_text(), "3,600 ÷");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod keymap;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Web module - always available for testing
/// (Mock DOM exercises the page wiring without a browser)
pub mod web;

pub use config::{CalcConfig, Verbosity};
pub use error::{CalcError, CalcResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalcConfig;
    pub use crate::core::{
        format_for_display, CalculatorState, DisplayFormat, DisplaySnapshot, Operator, Outcome,
        Rejection,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::keymap::Command;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::web::{CalculatorPage, DomElement, DomEvent, MockDom};
}
