//! Calculator page wiring
//!
//! Reproduces the browser page over [`MockDom`]: buttons tagged with
//! `data-number`, `data-operation` or `data-action`, a document `keydown`
//! listener, and the two display elements. Every event runs one core
//! command, refreshes both lines, then restarts the press animation on
//! the matching button.

use tracing::trace;

use super::dom::{DomElement, DomEvent, MockDom};
use crate::core::{CalculatorState, DisplayFormat, Operator};
use crate::driver::CalculatorDriver;
use crate::keymap::{Command, KEYPAD_LAYOUT};

/// Element id of the previous-operand line
pub const PREVIOUS_OPERAND_ID: &str = "previous-operand";
/// Element id of the current-operand line
pub const CURRENT_OPERAND_ID: &str = "current-operand";
/// Class toggled to play the press animation
pub const PRESSED_CLASS: &str = "pressed";

/// The calculator page: core state plus its document
#[derive(Debug)]
pub struct CalculatorPage {
    state: CalculatorState,
    dom: MockDom,
}

impl Default for CalculatorPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorPage {
    /// Builds the page with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Builds the page with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        let mut page = Self {
            state: CalculatorState::with_format(format),
            dom: build_document(),
        };
        page.update_display();
        page
    }

    /// Returns the core state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the document
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Text currently shown on the current-operand line
    #[must_use]
    pub fn current_text(&self) -> &str {
        self.dom.get_element_text(CURRENT_OPERAND_ID).unwrap_or_default()
    }

    /// Text currently shown on the previous-operand line
    #[must_use]
    pub fn previous_text(&self) -> &str {
        self.dom.get_element_text(PREVIOUS_OPERAND_ID).unwrap_or_default()
    }

    /// Ids of buttons that are mid-animation
    #[must_use]
    pub fn pressed_buttons(&self) -> Vec<&str> {
        self.buttons()
            .filter(|e| e.has_class(PRESSED_CLASS))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Dispatches an event to the page
    pub fn dispatch(&mut self, event: DomEvent) -> Option<Command> {
        self.dom.record_event(event.clone());
        match event {
            DomEvent::Click { element_id } => self.on_click(&element_id),
            DomEvent::KeyDown { key } => self.on_key_down(&key),
            DomEvent::AnimationEnd { element_id } => {
                if let Some(button) = self.dom.get_element_mut(&element_id) {
                    button.remove_class(PRESSED_CLASS);
                }
                None
            }
        }
    }

    /// Clicks a button by id
    pub fn click(&mut self, element_id: &str) -> Option<Command> {
        self.dispatch(DomEvent::click(element_id))
    }

    /// Sends a document keydown
    pub fn key_down(&mut self, key: &str) -> Option<Command> {
        self.dispatch(DomEvent::key_down(key))
    }

    /// Ends the press animation on a button
    pub fn animation_end(&mut self, element_id: &str) {
        self.dispatch(DomEvent::animation_end(element_id));
    }

    fn on_click(&mut self, element_id: &str) -> Option<Command> {
        let command = self.dom.get_element(element_id).and_then(button_command)?;
        self.run(command, element_id.to_string());
        Some(command)
    }

    fn on_key_down(&mut self, key: &str) -> Option<Command> {
        let command = Command::from_key(key)?;
        let button_id = self.find_button(command).map(|e| e.id.clone());
        match button_id {
            Some(id) => self.run(command, id),
            None => {
                self.state.apply(command);
                self.update_display();
            }
        }
        Some(command)
    }

    fn run(&mut self, command: Command, button_id: String) {
        trace!(?command, button = %button_id, "page input");
        self.state.apply(command);
        self.update_display();
        self.animate_button(&button_id);
    }

    /// Writes both display lines
    fn update_display(&mut self) {
        let current = self.state.current_display_text();
        let previous = self.state.previous_display_text();
        self.dom.set_element_text(CURRENT_OPERAND_ID, &current);
        self.dom.set_element_text(PREVIOUS_OPERAND_ID, &previous);
    }

    /// Removes then re-adds the pressed class so a running animation restarts
    fn animate_button(&mut self, button_id: &str) {
        if let Some(button) = self.dom.get_element_mut(button_id) {
            button.remove_class(PRESSED_CLASS);
            button.add_class(PRESSED_CLASS);
        }
    }

    fn find_button(&self, command: Command) -> Option<&DomElement> {
        match command {
            Command::AppendDigit(c) => self
                .dom
                .query_attr_value("data-number", c.encode_utf8(&mut [0; 4])),
            Command::ChooseOperator(op) => self.dom.query_attr_value("data-operation", op.symbol()),
            Command::Compute => self.dom.query_attr_value("data-action", "equals"),
            Command::DeleteLastChar => self.dom.query_attr_value("data-action", "delete"),
            Command::Clear => self.dom.query_attr_value("data-action", "clear"),
        }
    }

    fn buttons(&self) -> impl Iterator<Item = &DomElement> {
        ["data-number", "data-operation", "data-action"]
            .into_iter()
            .flat_map(|attr| self.dom.query_by_attr(attr))
    }
}

/// Reads the command a button performs from its data attributes and label
fn button_command(button: &DomElement) -> Option<Command> {
    if button.has_attr("data-number") {
        let mut chars = button.text_content.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Command::AppendDigit(c)),
            _ => None,
        };
    }
    if button.has_attr("data-operation") {
        return Operator::from_token(&button.text_content)
            .ok()
            .map(Command::ChooseOperator);
    }
    match button.get_attr("data-action")? {
        "equals" => Some(Command::Compute),
        "delete" => Some(Command::DeleteLastChar),
        "clear" => Some(Command::Clear),
        _ => None,
    }
}

/// Builds the page markup: display lines then the keypad grid
fn build_document() -> MockDom {
    let mut dom = MockDom::new();
    dom.register_element(DomElement::new("div").with_id("calculator").with_class("calculator-grid"));

    dom.append_child(
        "calculator",
        DomElement::new("div").with_id("output").with_class("output"),
    );
    dom.append_child(
        "output",
        DomElement::new("div")
            .with_id(PREVIOUS_OPERAND_ID)
            .with_class("previous-operand"),
    );
    dom.append_child(
        "output",
        DomElement::new("div")
            .with_id(CURRENT_OPERAND_ID)
            .with_class("current-operand"),
    );

    for command in KEYPAD_LAYOUT.iter().flatten().flatten() {
        let label = command.label();
        let mut button = DomElement::new("button")
            .with_id(&command.button_id())
            .with_text(&label);
        button = match command {
            Command::AppendDigit(_) => button.with_attr("data-number", &label),
            Command::ChooseOperator(_) => button.with_attr("data-operation", &label),
            Command::Compute => button.with_attr("data-action", "equals").with_class("span-two"),
            Command::DeleteLastChar => button.with_attr("data-action", "delete"),
            Command::Clear => button.with_attr("data-action", "clear"),
        };
        dom.append_child("calculator", button);
    }

    dom
}

impl CalculatorDriver for CalculatorPage {
    fn press_key(&mut self, key: &str) {
        self.key_down(key);
    }

    fn click_button(&mut self, button_id: &str) {
        self.click(button_id);
    }

    fn current_display(&self) -> String {
        self.current_text().to_string()
    }

    fn previous_display(&self) -> String {
        self.previous_text().to_string()
    }

    fn reset(&mut self) {
        self.state.clear();
        self.update_display();
        self.dom.clear_event_history();
    }
}
