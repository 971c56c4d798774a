//! Property-based tests across frontends
//!
//! Every frontend is a thin adapter over the same state, so any command
//! sequence must leave them all showing the same two lines.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use keypad_calc::core::{CalculatorState, Operator};
use keypad_calc::keymap::{Command, KEYPAD_LAYOUT};
use keypad_calc::web::{CalculatorPage, PRESSED_CLASS};
use proptest::prelude::*;

// ===== Strategy definitions =====

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

/// Any of the five inputs, digits weighted up so operands get long
fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => prop::char::range('0', '9').prop_map(Command::AppendDigit),
        1 => Just(Command::AppendDigit('.')),
        2 => operator_strategy().prop_map(Command::ChooseOperator),
        1 => Just(Command::Compute),
        1 => Just(Command::DeleteLastChar),
        1 => Just(Command::Clear),
    ]
}

fn key_name(command: Command) -> String {
    match command {
        Command::AppendDigit(c) => c.to_string(),
        Command::ChooseOperator(op) => op.ascii().to_string(),
        Command::Compute => "Enter".to_string(),
        Command::DeleteLastChar => "Backspace".to_string(),
        Command::Clear => "Escape".to_string(),
    }
}

proptest! {
    /// Clicking buttons and typing keys end in the same display
    #[test]
    fn prop_page_click_and_key_agree(commands in prop::collection::vec(command_strategy(), 0..40)) {
        let mut clicked = CalculatorPage::new();
        let mut typed = CalculatorPage::new();
        let mut state = CalculatorState::new();

        for command in &commands {
            clicked.click(&command.button_id());
            typed.key_down(&key_name(*command));
            state.apply(*command);
        }

        prop_assert_eq!(clicked.current_text(), typed.current_text());
        prop_assert_eq!(clicked.previous_text(), typed.previous_text());
        prop_assert_eq!(clicked.current_text(), state.current_display_text());
        prop_assert_eq!(clicked.previous_text(), state.previous_display_text());
    }

    /// The last pressed button carries the pressed class until its animation ends
    #[test]
    fn prop_last_button_is_pressed(commands in prop::collection::vec(command_strategy(), 1..20)) {
        let mut page = CalculatorPage::new();
        for command in &commands {
            page.click(&command.button_id());
        }
        let last = commands.last().unwrap().button_id();
        prop_assert!(page.dom().get_element(&last).unwrap().has_class(PRESSED_CLASS));

        page.animation_end(&last);
        prop_assert!(!page.dom().get_element(&last).unwrap().has_class(PRESSED_CLASS));
    }

    /// Each state's snapshot matches its display getters
    #[test]
    fn prop_snapshot_matches_getters(commands in prop::collection::vec(command_strategy(), 0..40)) {
        let mut state = CalculatorState::new();
        for command in commands {
            state.apply(command);
        }
        let snapshot = state.snapshot();
        prop_assert_eq!(snapshot.current, state.current_display_text());
        prop_assert_eq!(snapshot.previous, state.previous_display_text());
        prop_assert_eq!(snapshot.operand.as_str(), state.current_operand());
        prop_assert_eq!(snapshot.pending, state.pending_operator());
    }
}

#[cfg(feature = "tui")]
mod tui_properties {
    use super::*;
    use keypad_calc::driver::{CalculatorDriver, TuiDriver};
    use keypad_calc::tui::{compute_layout, Keypad};
    use ratatui::layout::Rect;

    proptest! {
        /// Terminal and page frontends show the same lines
        #[test]
        fn prop_tui_matches_page(commands in prop::collection::vec(command_strategy(), 0..40)) {
            let mut tui = TuiDriver::new();
            let mut page = CalculatorPage::new();
            for command in &commands {
                tui.click_button(&command.button_id());
                page.click(&command.button_id());
            }
            prop_assert_eq!(tui.current_display(), page.current_text());
            prop_assert_eq!(tui.previous_display(), page.previous_text());
        }

        /// A click anywhere inside the keypad hits the cell under it or nothing
        #[test]
        fn prop_hit_test_matches_grid(
            width in 60u16..200,
            height in 20u16..60,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let keypad = Keypad::new();
            let area = compute_layout(Rect::new(0, 0, width, height)).keypad;
            let x = area.x + (f64::from(area.width) * fx) as u16;
            let y = area.y + (f64::from(area.height) * fy) as u16;

            if let Some(index) = keypad.hit_test(area, x, y) {
                let button = keypad.get_button(index).unwrap();
                prop_assert_eq!(KEYPAD_LAYOUT[button.row][button.col], Some(button.command));
            }
        }
    }
}
