//! TUI Frontend for Calculator
//!
//! Keypad, two-line display and key bindings in the terminal.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{compute_layout, render, CalculatorUI, UiLayout};
