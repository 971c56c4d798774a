//! Calculator state machine
//!
//! Two coarse states: idle (nothing pending) and pending (an operator
//! plus the operand captured when it was chosen). Digits and deletes only
//! touch the current operand.

use serde::Serialize;
use tracing::debug;

use super::format::DisplayFormat;
use super::operator::Operator;
use super::{Outcome, Rejection};

const PLACEHOLDER: &str = "0";

/// An operator waiting for its right-hand operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingOperation {
    /// The operand captured when the operator was chosen
    pub operand: String,
    /// The queued operator
    pub operator: Operator,
}

/// Snapshot of what a display surface shows, plus the raw state behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    /// Previous-operand line (empty when idle)
    pub previous: String,
    /// Current-operand line
    pub current: String,
    /// Raw current operand text
    pub operand: String,
    /// Queued operator, if any
    pub pending: Option<Operator>,
}

/// The calculator: one current operand and at most one pending operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    current: String,
    pending: Option<PendingOperation>,
    format: DisplayFormat,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a cleared calculator with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Creates a cleared calculator with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            current: PLACEHOLDER.to_string(),
            pending: None,
            format,
        }
    }

    /// Returns the raw current operand
    #[must_use]
    pub fn current_operand(&self) -> &str {
        &self.current
    }

    /// Returns the raw previous operand, or `""` when nothing is pending
    #[must_use]
    pub fn previous_operand(&self) -> &str {
        self.pending.as_ref().map_or("", |p| p.operand.as_str())
    }

    /// Returns the queued operator
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    /// Returns the pending operation
    #[must_use]
    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Returns the display format in use
    #[must_use]
    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Replaces the display format; operands are untouched
    pub fn set_format(&mut self, format: DisplayFormat) {
        self.format = format;
    }

    /// Resets to `0` with nothing pending
    pub fn clear(&mut self) {
        self.current.clear();
        self.current.push_str(PLACEHOLDER);
        self.pending = None;
    }

    /// Removes the last character of the current operand
    pub fn delete_last_char(&mut self) {
        if let Err(rejection) = self.try_delete_last_char() {
            debug!(%rejection, "delete ignored");
        }
    }

    /// Removes the last character, reporting a delete on the placeholder
    pub fn try_delete_last_char(&mut self) -> Outcome {
        if self.current == PLACEHOLDER {
            return Err(Rejection::PlaceholderDelete);
        }

        self.current.pop();
        if self.current.is_empty() || self.current == "-" {
            self.clear_current();
        }
        Ok(())
    }

    /// Appends a digit or decimal point to the current operand
    pub fn append_digit(&mut self, token: char) {
        if let Err(rejection) = self.try_append_digit(token) {
            debug!(%rejection, token = %token, "digit ignored");
        }
    }

    /// Appends a digit or decimal point, reporting rejected tokens
    pub fn try_append_digit(&mut self, token: char) -> Outcome {
        match token {
            '.' if self.current.contains('.') => Err(Rejection::DuplicateDecimalPoint),
            '.' => {
                self.current.push('.');
                Ok(())
            }
            '0'..='9' => {
                if self.current == PLACEHOLDER {
                    self.current.clear();
                }
                self.current.push(token);
                Ok(())
            }
            other => Err(Rejection::InvalidDigit(other)),
        }
    }

    /// Queues an operator, collapsing any pending operation first
    pub fn choose_operator(&mut self, operator: Operator) {
        if let Err(rejection) = self.try_choose_operator(operator) {
            debug!(%rejection, %operator, "operator ignored");
        }
    }

    /// Queues an operator.
    ///
    /// A pending operation is computed first so `3 + 4 + 5` evaluates left
    /// to right. If that compute is rejected the operator is still queued
    /// against the current operand.
    pub fn try_choose_operator(&mut self, operator: Operator) -> Outcome {
        if self.current.is_empty() {
            return Err(Rejection::EmptyOperand);
        }

        if self.pending.is_some() {
            if let Err(rejection) = self.try_compute() {
                debug!(%rejection, "pending operation dropped by operator chain");
            }
        }

        let operand = std::mem::replace(&mut self.current, PLACEHOLDER.to_string());
        self.pending = Some(PendingOperation { operand, operator });
        Ok(())
    }

    /// Resolves the pending operation into the current operand
    pub fn compute(&mut self) {
        if let Err(rejection) = self.try_compute() {
            debug!(%rejection, "compute ignored");
        }
    }

    /// Resolves the pending operation, returning the numeric result
    pub fn try_compute(&mut self) -> Outcome<f64> {
        let pending = self.pending.as_ref().ok_or(Rejection::NothingPending)?;

        let lhs = parse_operand(&pending.operand)?;
        let rhs = parse_operand(&self.current)?;
        let result = pending.operator.apply(lhs, rhs)?;

        // -0 reads as 0 on a calculator
        let result = if result == 0.0 { 0.0 } else { result };

        self.current = result.to_string();
        self.pending = None;
        Ok(result)
    }

    /// Text for the current-operand line
    #[must_use]
    pub fn current_display_text(&self) -> String {
        self.format.format_for_display(&self.current)
    }

    /// Text for the previous-operand line: `""` when idle, else `"{operand} {symbol}"`
    #[must_use]
    pub fn previous_display_text(&self) -> String {
        match &self.pending {
            None => String::new(),
            Some(p) => format!(
                "{} {}",
                self.format.format_for_display(&p.operand),
                p.operator.symbol()
            ),
        }
    }

    /// Captures both display lines and the state behind them
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            previous: self.previous_display_text(),
            current: self.current_display_text(),
            operand: self.current.clone(),
            pending: self.pending_operator(),
        }
    }

    fn clear_current(&mut self) {
        self.current.clear();
        self.current.push_str(PLACEHOLDER);
    }
}

/// Reads operand text as a number; only sign, digits and `.` are accepted
fn parse_operand(text: &str) -> Outcome<f64> {
    let body = text.strip_prefix('-').unwrap_or(text);
    let well_formed = !body.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == '.');

    well_formed
        .then(|| body.parse::<f64>().ok())
        .flatten()
        .filter(|v| v.is_finite())
        .map(|v| if body.len() == text.len() { v } else { -v })
        .ok_or_else(|| Rejection::UnparseableOperand(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn type_keys(state: &mut CalculatorState, keys: &str) {
        for c in keys.chars() {
            match c {
                '=' => state.compute(),
                c => match Operator::from_char(c) {
                    Some(op) => state.choose_operator(op),
                    None => state.append_digit(c),
                },
            }
        }
    }

    fn assert_cleared(state: &CalculatorState) {
        assert_eq!(state.current_operand(), "0");
        assert_eq!(state.previous_operand(), "");
        assert_eq!(state.pending_operator(), None);
    }

    // ===== clear =====

    #[test]
    fn test_new_is_cleared() {
        assert_cleared(&CalculatorState::new());
        assert_cleared(&CalculatorState::default());
    }

    #[test]
    fn test_clear_discards_entry_and_pending() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "12+34");
        state.clear();
        assert_cleared(&state);
    }

    // ===== delete_last_char =====

    #[test]
    fn test_delete_on_placeholder_is_idempotent() {
        let mut state = CalculatorState::new();
        for _ in 0..3 {
            assert_eq!(
                state.try_delete_last_char(),
                Err(Rejection::PlaceholderDelete)
            );
            state.delete_last_char();
            assert_cleared(&state);
        }
    }

    #[test]
    fn test_delete_removes_last_char() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "123.4");
        state.delete_last_char();
        assert_eq!(state.current_operand(), "123.");
        state.delete_last_char();
        assert_eq!(state.current_operand(), "123");
    }

    #[test]
    fn test_delete_last_digit_restores_placeholder() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "7");
        assert_eq!(state.try_delete_last_char(), Ok(()));
        assert_eq!(state.current_operand(), "0");
    }

    #[test]
    fn test_delete_negative_result_to_placeholder() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "3-8=");
        assert_eq!(state.current_operand(), "-5");
        state.delete_last_char();
        assert_eq!(state.current_operand(), "0");
    }

    #[test]
    fn test_delete_keeps_pending_operation() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "9+12");
        state.delete_last_char();
        assert_eq!(state.current_operand(), "1");
        assert_eq!(state.previous_operand(), "9");
        assert_eq!(state.pending_operator(), Some(Operator::Add));
    }

    // ===== append_digit =====

    #[test]
    fn test_digit_replaces_placeholder() {
        let mut state = CalculatorState::new();
        state.append_digit('5');
        assert_eq!(state.current_operand(), "5");
    }

    #[test]
    fn test_zero_on_placeholder_stays_zero() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "000");
        assert_eq!(state.current_operand(), "0");
    }

    #[test]
    fn test_decimal_point_appends_to_placeholder() {
        let mut state = CalculatorState::new();
        state.append_digit('.');
        assert_eq!(state.current_operand(), "0.");
        state.append_digit('0');
        state.append_digit('5');
        assert_eq!(state.current_operand(), "0.05");
    }

    #[test]
    fn test_second_decimal_point_rejected() {
        let mut state = CalculatorState::new();
        state.append_digit('5');
        state.append_digit('.');
        assert_eq!(
            state.try_append_digit('.'),
            Err(Rejection::DuplicateDecimalPoint)
        );
        state.append_digit('.');
        assert_eq!(state.current_operand(), "5.");
    }

    #[test]
    fn test_invalid_digit_rejected() {
        let mut state = CalculatorState::new();
        assert_eq!(state.try_append_digit('a'), Err(Rejection::InvalidDigit('a')));
        state.append_digit('+');
        assert_cleared(&state);
    }

    #[test]
    fn test_digits_append_to_computed_result() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "3+4=");
        state.append_digit('8');
        assert_eq!(state.current_operand(), "78");
    }

    // ===== choose_operator =====

    #[test]
    fn test_choose_operator_moves_current_to_previous() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "42");
        assert_eq!(state.try_choose_operator(Operator::Multiply), Ok(()));
        assert_eq!(state.current_operand(), "0");
        assert_eq!(state.previous_operand(), "42");
        assert_eq!(state.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_choose_operator_on_untouched_placeholder() {
        let mut state = CalculatorState::new();
        state.choose_operator(Operator::Add);
        assert_eq!(state.previous_operand(), "0");
        type_keys(&mut state, "3+4=");
        assert_eq!(state.current_operand(), "7");
        assert_eq!(state.previous_operand(), "");
        assert_eq!(state.pending_operator(), None);
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "3+4+5=");
        assert_eq!(state.current_operand(), "12");

        state.clear();
        type_keys(&mut state, "2+3×4=");
        assert_eq!(state.current_operand(), "20");
    }

    #[test]
    fn test_chaining_shows_intermediate_result() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "3+4+");
        assert_eq!(state.previous_operand(), "7");
        assert_eq!(state.current_operand(), "0");
    }

    #[test]
    fn test_operator_replaces_pending_after_rejected_collapse() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "9÷0+");
        assert_eq!(state.previous_operand(), "0");
        assert_eq!(state.pending_operator(), Some(Operator::Add));
    }

    // ===== compute =====

    #[test]
    fn test_compute_all_operators() {
        let cases = [
            ("6+3=", "9"),
            ("6-3=", "3"),
            ("6−3=", "3"),
            ("6*3=", "18"),
            ("6/3=", "2"),
            ("1/4=", "0.25"),
            ("1.5*2=", "3"),
        ];
        for (keys, expected) in cases {
            let mut state = CalculatorState::new();
            type_keys(&mut state, keys);
            assert_eq!(state.current_operand(), expected, "keys {keys}");
        }
    }

    #[test]
    fn test_compute_returns_result() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "10/4");
        assert_eq!(state.try_compute(), Ok(2.5));
    }

    #[test]
    fn test_compute_with_nothing_pending() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "12");
        assert_eq!(state.try_compute(), Err(Rejection::NothingPending));
        assert_eq!(state.current_operand(), "12");
    }

    #[test]
    fn test_division_by_zero_is_noop() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "9/0");
        let before = state.clone();

        assert_eq!(state.try_compute(), Err(Rejection::DivisionByZero));
        state.compute();
        state.compute();

        assert_eq!(state, before);
        assert_eq!(state.current_operand(), "0");
        assert_eq!(state.previous_operand(), "9");
        assert_eq!(state.pending_operator(), Some(Operator::Divide));
    }

    #[test]
    fn test_division_by_zero_point_zero() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "9/0.0");
        assert_eq!(state.try_compute(), Err(Rejection::DivisionByZero));
    }

    #[test]
    fn test_trailing_decimal_point_parses() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "5.+1");
        assert_eq!(state.try_compute(), Ok(6.0));
    }

    #[test]
    fn test_negative_zero_normalised() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "0-3=*0=");
        assert_eq!(state.current_operand(), "0");
    }

    #[test]
    fn test_negative_result_chains() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "2-5=*3=");
        assert_eq!(state.current_operand(), "-9");
    }

    #[test]
    fn test_overflow_is_noop() {
        let mut state = CalculatorState::new();
        let big = "9".repeat(300);
        type_keys(&mut state, &format!("{big}*{big}"));
        assert_eq!(state.try_compute(), Err(Rejection::NonFiniteResult));
        assert_eq!(state.previous_operand(), big);
    }

    #[test]
    fn test_floating_point_result_text() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "0.1+0.2=");
        assert_eq!(state.current_operand(), "0.30000000000000004");
    }

    // ===== display projection =====

    #[test]
    fn test_display_idle() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "1234.50");
        assert_eq!(state.current_display_text(), "1,234.50");
        assert_eq!(state.previous_display_text(), "");
    }

    #[test]
    fn test_display_pending() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "12345-");
        assert_eq!(state.previous_display_text(), "12,345 −");
        assert_eq!(state.current_display_text(), "0");
    }

    #[test]
    fn test_display_uses_format() {
        let mut state =
            CalculatorState::with_format(DisplayFormat::new().with_separator("."));
        type_keys(&mut state, "1234567/");
        assert_eq!(state.previous_display_text(), "1.234.567 ÷");
    }

    #[test]
    fn test_set_format_keeps_operands() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "98765");
        state.set_format(DisplayFormat::new().with_separator(" "));
        assert_eq!(state.current_display_text(), "98 765");
        assert_eq!(state.format().group_separator, " ");
    }

    #[test]
    fn test_snapshot() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "1500×2");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.previous, "1,500 ×");
        assert_eq!(snapshot.current, "2");
        assert_eq!(snapshot.operand, "2");
        assert_eq!(snapshot.pending, Some(Operator::Multiply));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"pending\":\"multiply\""));
    }

    // ===== parse_operand =====

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("12"), Ok(12.0));
        assert_eq!(parse_operand("-2.5"), Ok(-2.5));
        assert_eq!(parse_operand("5."), Ok(5.0));
        assert!(parse_operand("").is_err());
        assert!(parse_operand(".").is_err());
        assert!(parse_operand("-").is_err());
        assert!(parse_operand("inf").is_err());
        assert!(parse_operand("NaN").is_err());
        assert!(parse_operand("1e5").is_err());
    }

    // ===== properties =====

    fn key_strategy() -> impl Strategy<Value = char> {
        prop::sample::select(vec![
            '0', '1', '2', '5', '9', '.', '+', '-', '*', '/', '=',
        ])
    }

    proptest! {
        #[test]
        fn prop_digits_concatenate(digits in "[1-9][0-9]{0,12}") {
            let mut state = CalculatorState::new();
            type_keys(&mut state, &digits);
            prop_assert_eq!(state.current_operand(), digits.as_str());
        }

        #[test]
        fn prop_only_first_decimal_point_kept(keys in "[0-9.]{1,16}") {
            let mut state = CalculatorState::new();
            type_keys(&mut state, &keys);
            let operand = state.current_operand();
            prop_assert!(operand.matches('.').count() <= 1);
            prop_assert!(!operand.is_empty());
            if operand.len() > 1 && !operand.starts_with("0.") {
                prop_assert!(!operand.starts_with('0'));
            }
        }

        #[test]
        fn prop_clear_is_total_reset(keys in prop::collection::vec(key_strategy(), 0..40)) {
            let mut state = CalculatorState::new();
            let keys: String = keys.into_iter().collect();
            type_keys(&mut state, &keys);
            state.clear();
            prop_assert_eq!(state.current_operand(), "0");
            prop_assert_eq!(state.previous_operand(), "");
            prop_assert_eq!(state.pending_operator(), None);
        }

        #[test]
        fn prop_current_never_empty(keys in prop::collection::vec(key_strategy(), 0..40)) {
            let mut state = CalculatorState::new();
            for key in keys {
                type_keys(&mut state, &key.to_string());
                state.delete_last_char();
                prop_assert!(!state.current_operand().is_empty());
                prop_assert_eq!(
                    state.pending_operator().is_some(),
                    !state.previous_operand().is_empty()
                );
            }
        }

        #[test]
        fn prop_rejected_compute_leaves_state(keys in prop::collection::vec(key_strategy(), 0..30)) {
            let mut state = CalculatorState::new();
            let keys: String = keys.into_iter().collect();
            type_keys(&mut state, &keys);
            let before = state.clone();
            if state.try_compute().is_err() {
                prop_assert_eq!(state, before);
            }
        }
    }
}
