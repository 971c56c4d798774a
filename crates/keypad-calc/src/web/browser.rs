//! Browser bindings
//!
//! Exposes the core to page JavaScript. The page keeps its own button
//! listeners and animation; it calls into this type and writes
//! `previous_display` / `current_display` into its two output elements.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::core::{CalculatorState, DisplayFormat, Operator};
use crate::keymap::Command;

/// Calculator handle owned by the page
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    state: CalculatorState,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a cleared calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator grouping digits with `separator`
    #[wasm_bindgen(js_name = withSeparator)]
    pub fn with_separator(separator: &str) -> Self {
        Self {
            state: CalculatorState::with_format(DisplayFormat::new().with_separator(separator)),
        }
    }

    /// `data-number` button: digit or `.`
    #[wasm_bindgen(js_name = appendDigit)]
    pub fn append_digit(&mut self, token: char) {
        self.state.append_digit(token);
    }

    /// `data-operation` button: accepts `+ - − * × / ÷`; unknown tokens are ignored
    #[wasm_bindgen(js_name = chooseOperator)]
    pub fn choose_operator(&mut self, token: &str) -> bool {
        match Operator::from_token(token) {
            Ok(op) => {
                self.state.choose_operator(op);
                true
            }
            Err(_) => false,
        }
    }

    /// Equals button
    pub fn compute(&mut self) {
        self.state.compute();
    }

    /// Clear button
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Delete button
    pub fn delete(&mut self) {
        self.state.delete_last_char();
    }

    /// `keydown` listener; returns the id of the button to animate
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> Option<String> {
        self.state.press_key(key).map(|command: Command| command.button_id())
    }

    /// Text for the current-operand element
    #[wasm_bindgen(getter, js_name = currentDisplay)]
    pub fn current_display(&self) -> String {
        self.state.current_display_text()
    }

    /// Text for the previous-operand element
    #[wasm_bindgen(getter, js_name = previousDisplay)]
    pub fn previous_display(&self) -> String {
        self.state.previous_display_text()
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::debug_1(&"keypad-calc initialized".into());
}
