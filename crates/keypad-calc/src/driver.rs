//! Unified Calculator Driver
//!
//! Write the interaction once, run it against every frontend. Each
//! adapter implements [`CalculatorDriver`]; the `verify_*` functions are
//! the shared behavioural checks.

/// Interface implemented by every calculator frontend
pub trait CalculatorDriver {
    /// Sends a key by its `KeyboardEvent.key` name
    fn press_key(&mut self, key: &str);

    /// Presses an on-screen button by id (see [`crate::keymap::Command::button_id`])
    fn click_button(&mut self, button_id: &str);

    /// Text of the current-operand line
    fn current_display(&self) -> String;

    /// Text of the previous-operand line
    fn previous_display(&self) -> String;

    /// Returns the frontend to its initial state
    fn reset(&mut self);

    /// Sends each character of `keys` as a key press
    fn type_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.press_key(c.encode_utf8(&mut [0; 4]));
        }
    }
}

/// TUI Driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    use super::CalculatorDriver;
    use crate::tui::{compute_layout, CalculatorApp, InputHandler};

    /// Screen size the driver pretends to have for mouse clicks
    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    /// TUI-specific driver: keys go through the crossterm input handler,
    /// buttons are clicked by screen position
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
        input: InputHandler,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::with_app(CalculatorApp::new())
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                input: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Centre cell of a keypad button on the driver's screen
        fn button_cell(&self, button_id: &str) -> Option<(u16, u16)> {
            let keypad = self.app.keypad();
            let btn = keypad.buttons().find(|b| b.command.button_id() == button_id)?;
            let area = compute_layout(SCREEN).keypad;
            let (rows, cols) = keypad.dimensions();
            let btn_width = area.width.saturating_sub(2) / cols as u16;
            let btn_height = area.height.saturating_sub(2) / rows as u16;
            Some((
                area.x + 1 + btn.col as u16 * btn_width + btn_width / 2,
                area.y + 1 + btn.row as u16 * btn_height + btn_height / 2,
            ))
        }
    }

    /// Key name to crossterm key code
    fn key_code(key: &str) -> Option<KeyCode> {
        match key {
            "Enter" => Some(KeyCode::Enter),
            "Backspace" => Some(KeyCode::Backspace),
            "Delete" => Some(KeyCode::Delete),
            "Escape" => Some(KeyCode::Esc),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyCode::Char(c)),
                    _ => None,
                }
            }
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) {
            if let Some(code) = key_code(key) {
                let action = self.input.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
                self.app.handle_action(action, SCREEN, Instant::now());
            }
        }

        fn click_button(&mut self, button_id: &str) {
            if let Some((x, y)) = self.button_cell(button_id) {
                self.app.click_at(SCREEN, x, y, Instant::now());
            }
        }

        fn current_display(&self) -> String {
            self.app.state().current_display_text()
        }

        fn previous_display(&self) -> String {
            self.app.state().previous_display_text()
        }

        fn reset(&mut self) {
            self.app.reset();
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified Test Specifications =====
// These work with ANY CalculatorDriver implementation

/// Digits concatenate, leading zero replaced, second `.` ignored
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.current_display(), "0");
    assert_eq!(driver.previous_display(), "");

    driver.type_keys("0042");
    assert_eq!(driver.current_display(), "42");
    driver.reset();

    driver.type_keys("5..");
    assert_eq!(driver.current_display(), "5.");
    driver.reset();

    driver.type_keys(".25");
    assert_eq!(driver.current_display(), "0.25");
    driver.reset();
}

/// Operators chain left to right with one pending operation
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.type_keys("3+4+");
    assert_eq!(driver.previous_display(), "7 +");
    assert_eq!(driver.current_display(), "0");
    driver.type_keys("5");
    driver.press_key("Enter");
    assert_eq!(driver.current_display(), "12");
    assert_eq!(driver.previous_display(), "");
    driver.reset();

    driver.type_keys("2+3*4=");
    assert_eq!(driver.current_display(), "20");
    driver.reset();

    driver.click_button("btn-9");
    driver.click_button("btn-subtract");
    driver.click_button("btn-4");
    driver.click_button("btn-equals");
    assert_eq!(driver.current_display(), "5");
    driver.reset();
}

/// Division by zero leaves the display untouched
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.type_keys("9/0");
    driver.press_key("Enter");
    assert_eq!(driver.current_display(), "0");
    assert_eq!(driver.previous_display(), "9 ÷");
    driver.reset();
}

/// Backspace trims one character and never empties the display
pub fn verify_delete<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.type_keys("123");
    driver.press_key("Backspace");
    assert_eq!(driver.current_display(), "12");
    driver.click_button("btn-delete");
    driver.click_button("btn-delete");
    assert_eq!(driver.current_display(), "0");
    driver.press_key("Backspace");
    assert_eq!(driver.current_display(), "0");
    driver.reset();
}

/// Integer part grouped, fraction verbatim
pub fn verify_display_grouping<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.type_keys("1234.50");
    assert_eq!(driver.current_display(), "1,234.50");
    driver.press_key("*");
    assert_eq!(driver.previous_display(), "1,234.50 ×");
    driver.type_keys("1000=");
    assert_eq!(driver.current_display(), "1,234,500");
    driver.reset();
}

/// Escape and the AC button reset everything
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.type_keys("8-");
    driver.press_key("Escape");
    assert_eq!(driver.current_display(), "0");
    assert_eq!(driver.previous_display(), "");

    driver.type_keys("6/");
    driver.click_button("btn-clear");
    assert_eq!(driver.current_display(), "0");
    assert_eq!(driver.previous_display(), "");
}

/// Complete verification suite - runs every check above
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_chaining(driver);
    verify_division_by_zero(driver);
    verify_delete(driver);
    verify_display_grouping(driver);
    verify_clear(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalculatorState;
    use crate::keymap::{Command, KEYPAD_LAYOUT};

    /// Driver over the bare state, buttons resolved through the keypad layout
    #[derive(Debug, Default)]
    struct StateDriver {
        state: CalculatorState,
    }

    impl CalculatorDriver for StateDriver {
        fn press_key(&mut self, key: &str) {
            self.state.press_key(key);
        }

        fn click_button(&mut self, button_id: &str) {
            let command: Option<Command> = KEYPAD_LAYOUT
                .iter()
                .flatten()
                .flatten()
                .find(|c| c.button_id() == button_id)
                .copied();
            if let Some(command) = command {
                self.state.apply(command);
            }
        }

        fn current_display(&self) -> String {
            self.state.current_display_text()
        }

        fn previous_display(&self) -> String {
            self.state.previous_display_text()
        }

        fn reset(&mut self) {
            self.state.clear();
        }
    }

    #[test]
    fn test_state_driver_full_specification() {
        let mut driver = StateDriver::default();
        run_full_specification(&mut driver);
    }

    #[test]
    fn test_type_keys_default_method() {
        let mut driver = StateDriver::default();
        driver.type_keys("12+");
        assert_eq!(driver.previous_display(), "12 +");
    }

    #[test]
    fn test_unknown_button_ignored() {
        let mut driver = StateDriver::default();
        driver.click_button("btn-percent");
        assert_eq!(driver.current_display(), "0");
    }

    #[cfg(feature = "tui")]
    mod tui_driver_tests {
        use super::super::*;
        use crate::keymap::Command;

        #[test]
        fn test_tui_driver_full_specification() {
            let mut driver = TuiDriver::default();
            run_full_specification(&mut driver);
        }

        #[test]
        fn test_tui_driver_quit_key_sets_flag() {
            let mut driver = TuiDriver::new();
            driver.press_key("q");
            assert!(driver.app().should_quit());
        }

        #[test]
        fn test_tui_driver_delete_key() {
            let mut driver = TuiDriver::new();
            driver.type_keys("45");
            driver.press_key("Delete");
            assert_eq!(driver.current_display(), "4");
        }

        #[test]
        fn test_tui_driver_click_highlights() {
            let mut driver = TuiDriver::new();
            driver.click_button("btn-decimal");
            assert_eq!(driver.current_display(), "0.");
            assert_eq!(
                driver.app().pressed_command(),
                Some(Command::AppendDigit('.'))
            );
        }
    }
}
