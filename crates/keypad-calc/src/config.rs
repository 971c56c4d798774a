//! Application configuration
//!
//! Loaded from an optional YAML file, then overridden by command-line
//! flags through the `with_*` builders.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DisplayFormat;
use crate::error::{CalcError, CalcResult};

/// Default press highlight in milliseconds
pub const DEFAULT_PRESS_HIGHLIGHT_MS: u64 = 150;

/// Log verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Info and debug events
    Verbose,
    /// Everything, including per-command traces
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Log verbosity
    pub verbosity: Verbosity,
    /// Display digit grouping
    pub format: DisplayFormat,
    /// How long a pressed keypad button stays lit
    pub press_highlight_ms: u64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            format: DisplayFormat::default(),
            press_highlight_ms: DEFAULT_PRESS_HIGHLIGHT_MS,
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates YAML configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or fails [`Self::validate`].
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: &Path) -> CalcResult<Self> {
        debug!(path = %path.display(), "loading configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Loads `path` if given, the defaults otherwise
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_or_default(path: Option<&Path>) -> CalcResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Checks that the display format can be read back unambiguously
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Config`] if the group separator contains a
    /// digit, `.` or `-`.
    pub fn validate(&self) -> CalcResult<()> {
        let separator = &self.format.group_separator;
        if separator
            .chars()
            .any(|c| c.is_ascii_digit() || c == '.' || c == '-')
        {
            return Err(CalcError::config(format!(
                "group_separator {separator:?} must not contain digits, '.' or '-'"
            )));
        }
        Ok(())
    }

    /// Serializes the configuration as YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set display format
    #[must_use]
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Set group separator
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.format.group_separator = separator.into();
        self
    }

    /// Set press highlight duration
    #[must_use]
    pub const fn with_press_highlight_ms(mut self, ms: u64) -> Self {
        self.press_highlight_ms = ms;
        self
    }

    /// Press highlight as a [`Duration`]
    #[must_use]
    pub const fn press_highlight(&self) -> Duration {
        Duration::from_millis(self.press_highlight_ms)
    }
}
