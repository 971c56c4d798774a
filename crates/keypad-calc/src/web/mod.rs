//! Web frontend
//!
//! [`CalculatorPage`] reproduces the page wiring over a mock DOM so it can
//! be exercised natively. The `wasm` feature adds the real browser
//! bindings.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod page;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom};
pub use page::{CalculatorPage, CURRENT_OPERAND_ID, PRESSED_CLASS, PREVIOUS_OPERAND_ID};
