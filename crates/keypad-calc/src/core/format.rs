//! Display formatting for operands
//!
//! The integer part is digit-grouped, the fractional part is shown
//! exactly as typed (no rounding, no padding).

use serde::{Deserialize, Serialize};

/// Digit grouping settings for the display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Separator inserted between digit groups
    pub group_separator: String,
    /// Digits per group (0 disables grouping)
    pub group_size: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            group_separator: ",".to_string(),
            group_size: 3,
        }
    }
}

impl DisplayFormat {
    /// Creates the default `1,234,567` format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the group separator
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// Sets the group size
    #[must_use]
    pub const fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    /// Formats an operand for display.
    ///
    /// The text after the first `.` is kept verbatim, so `"12."` shows as
    /// `"12."` while the user is still typing. An integer part that is not
    /// a number renders as the empty string.
    ///
    /// ```
    /// use keypad_calc::core::DisplayFormat;
    ///
    /// let format = DisplayFormat::default();
    /// assert_eq!(format.format_for_display("1234.5"), "1,234.5");
    /// assert_eq!(format.format_for_display("-1234567"), "-1,234,567");
    /// ```
    #[must_use]
    pub fn format_for_display(&self, operand: &str) -> String {
        let (integer, fraction) = match operand.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (operand, None),
        };

        let grouped = self.group_integer(integer).unwrap_or_default();

        match fraction {
            Some(fraction) => format!("{grouped}.{fraction}"),
            None => grouped,
        }
    }

    /// Groups an integer numeral, returning `None` if it is not one
    fn group_integer(&self, integer: &str) -> Option<String> {
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", integer),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = digits.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };

        if self.group_size == 0 || digits.len() <= self.group_size {
            return Some(format!("{sign}{digits}"));
        }

        let mut out = String::with_capacity(sign.len() + digits.len() * 2);
        out.push_str(sign);

        // Leading group holds the remainder so every later group is full
        let lead = match digits.len() % self.group_size {
            0 => self.group_size,
            n => n,
        };
        out.push_str(&digits[..lead]);

        let rest = digits[lead..].as_bytes();
        for chunk in rest.chunks(self.group_size) {
            out.push_str(&self.group_separator);
            // chunks of ASCII digits are always valid UTF-8
            out.extend(chunk.iter().map(|&b| char::from(b)));
        }

        Some(out)
    }
}

/// Formats an operand with the default grouping
#[must_use]
pub fn format_for_display(operand: &str) -> String {
    DisplayFormat::default().format_for_display(operand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_for_display("1234.5"), "1,234.5");
        assert_eq!(format_for_display("1234567"), "1,234,567");
        assert_eq!(format_for_display("123456"), "123,456");
    }

    #[test]
    fn test_short_numbers_unchanged() {
        assert_eq!(format_for_display("0"), "0");
        assert_eq!(format_for_display("7"), "7");
        assert_eq!(format_for_display("999"), "999");
    }

    #[test]
    fn test_fraction_kept_verbatim() {
        assert_eq!(format_for_display("0.000"), "0.000");
        assert_eq!(format_for_display("1000.1000"), "1,000.1000");
        assert_eq!(format_for_display("3.14159265358979"), "3.14159265358979");
    }

    #[test]
    fn test_trailing_decimal_point() {
        assert_eq!(format_for_display("0."), "0.");
        assert_eq!(format_for_display("5000."), "5,000.");
    }

    #[test]
    fn test_empty_integer_part_renders_empty() {
        assert_eq!(format_for_display(""), "");
        assert_eq!(format_for_display("."), ".");
        assert_eq!(format_for_display(".5"), ".5");
        assert_eq!(format_for_display("-"), "");
    }

    #[test]
    fn test_non_numeric_integer_part() {
        assert_eq!(format_for_display("abc"), "");
        assert_eq!(format_for_display("1e5"), "");
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(format_for_display("-1234"), "-1,234");
        assert_eq!(format_for_display("-0.5"), "-0.5");
        assert_eq!(format_for_display("-12.25"), "-12.25");
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(format_for_display("007"), "7");
        assert_eq!(format_for_display("000"), "0");
        assert_eq!(format_for_display("0001234"), "1,234");
    }

    #[test]
    fn test_large_integer_keeps_every_digit() {
        assert_eq!(
            format_for_display("12345678901234567890"),
            "12,345,678,901,234,567,890"
        );
    }

    #[test]
    fn test_custom_separator() {
        let format = DisplayFormat::new().with_separator(".");
        assert_eq!(format.format_for_display("1234567"), "1.234.567");

        let format = DisplayFormat::new().with_separator("\u{202f}");
        assert_eq!(format.format_for_display("12345"), "12\u{202f}345");
    }

    #[test]
    fn test_custom_group_size() {
        let format = DisplayFormat::new().with_group_size(4);
        assert_eq!(format.format_for_display("123456789"), "1,2345,6789");
    }

    #[test]
    fn test_grouping_disabled() {
        let format = DisplayFormat::new().with_group_size(0);
        assert_eq!(format.format_for_display("1234567.8"), "1234567.8");
    }

    #[test]
    fn test_deserialize_partial() {
        let format: DisplayFormat = serde_json::from_str(r#"{"group_separator":" "}"#).unwrap();
        assert_eq!(format.group_separator, " ");
        assert_eq!(format.group_size, 3);
    }

    proptest! {
        #[test]
        fn prop_removing_separators_restores_digits(n in 1u64..u64::MAX) {
            let text = n.to_string();
            let shown = format_for_display(&text);
            prop_assert_eq!(shown.replace(',', ""), text);
        }

        #[test]
        fn prop_groups_are_full_after_the_first(n in 1000u64..u64::MAX) {
            let shown = format_for_display(&n.to_string());
            let groups: Vec<&str> = shown.split(',').collect();
            prop_assert!(groups[0].len() <= 3);
            for group in &groups[1..] {
                prop_assert_eq!(group.len(), 3);
            }
        }

        #[test]
        fn prop_fraction_is_verbatim(int in 0u32..1_000_000, frac in "[0-9]{0,8}") {
            let operand = format!("{int}.{frac}");
            let shown = format_for_display(&operand);
            let expected_suffix = format!(".{frac}");
            prop_assert!(shown.ends_with(&expected_suffix));
        }
    }
}
