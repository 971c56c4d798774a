//! TUI Application State

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::trace;

use super::input::KeyAction;
use super::keypad::Keypad;
use super::ui::compute_layout;
use crate::config::CalcConfig;
use crate::core::CalculatorState;
use crate::keymap::Command;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// Calculator core
    state: CalculatorState,
    /// On-screen keypad, carries the press highlight
    keypad: Keypad,
    /// How long a pressed button stays lit
    highlight: Duration,
    /// When the lit button was pressed
    pressed_at: Option<Instant>,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CalcConfig::default())
    }

    /// Creates a calculator app from configuration
    #[must_use]
    pub fn from_config(config: &CalcConfig) -> Self {
        Self {
            state: CalculatorState::with_format(config.format.clone()),
            keypad: Keypad::new(),
            highlight: config.press_highlight(),
            pressed_at: None,
            should_quit: false,
        }
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the highlight duration
    #[must_use]
    pub fn highlight(&self) -> Duration {
        self.highlight
    }

    /// Command of the currently lit button
    #[must_use]
    pub fn pressed_command(&self) -> Option<Command> {
        self.keypad
            .pressed_index()
            .and_then(|i| self.keypad.get_button(i))
            .map(|b| b.command)
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Runs a command and lights its button
    pub fn execute(&mut self, command: Command, now: Instant) {
        self.state.apply(command);
        self.keypad.highlight(command);
        self.pressed_at = Some(now);
    }

    /// Presses the keypad button under a cell of a `terminal` sized screen
    pub fn click_at(&mut self, terminal: Rect, x: u16, y: u16, now: Instant) -> Option<Command> {
        let keypad_area = compute_layout(terminal).keypad;
        let command = self
            .keypad
            .hit_test(keypad_area, x, y)
            .and_then(|i| self.keypad.get_button(i))
            .map(|b| b.command)?;
        self.execute(command, now);
        Some(command)
    }

    /// Dispatches one input action
    pub fn handle_action(&mut self, action: KeyAction, terminal: Rect, now: Instant) {
        trace!(?action, "input");
        match action {
            KeyAction::Command(command) => self.execute(command, now),
            KeyAction::Click { x, y } => {
                self.click_at(terminal, x, y, now);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Releases the lit button once its highlight has expired
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.pressed_at {
            if now.saturating_duration_since(at) >= self.highlight {
                self.keypad.release_all();
                self.pressed_at = None;
            }
        }
    }

    /// Clears the calculator and the highlight
    pub fn reset(&mut self) {
        self.state.clear();
        self.keypad.release_all();
        self.pressed_at = None;
    }
}
