//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{CalcConfig, Verbosity};
use crate::core::CalculatorState;
use crate::error::{CalcError, CalcResult};
use crate::keymap::Command;

/// keypad-calc: four-function calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "KEYPAD_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Digit group separator for the display (e.g. "," or " ")
    #[arg(long, global = true)]
    pub separator: Option<String>,

    /// Write logs to this file (the terminal UI never logs to the screen)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to the terminal UI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive calculator
    Tui,

    /// Feed keys to a fresh calculator and print the display
    Eval(EvalArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Key names (Enter, Escape, Backspace) or runs of keys such as `12+3=`
    #[arg(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
    pub keys: Vec<String>,

    /// Print the display as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Verbosity from `-q` / `-v`
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Loads the configuration file, then applies flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// result is invalid.
    pub fn build_config(&self) -> CalcResult<CalcConfig> {
        let mut config = CalcConfig::load_or_default(self.config.as_deref())?;
        if self.quiet || self.verbose > 0 {
            config = config.with_verbosity(self.verbosity());
        }
        if let Some(separator) = &self.separator {
            config = config.with_separator(separator.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Expands key arguments into commands.
///
/// An argument is either one key name understood by
/// [`Command::from_key`] or a run of single-character keys.
///
/// # Errors
///
/// Returns [`CalcError::InvalidArgument`] for any character or name with
/// no binding.
pub fn expand_keys<S: AsRef<str>>(args: &[S]) -> CalcResult<Vec<Command>> {
    let mut commands = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        if let Some(command) = Command::from_key(arg) {
            commands.push(command);
            continue;
        }
        if arg.is_empty() {
            return Err(CalcError::invalid_argument("empty key"));
        }
        for c in arg.chars() {
            let command = Command::from_char(c).ok_or_else(|| {
                CalcError::invalid_argument(format!("no key bound to {c:?} in {arg:?}"))
            })?;
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Runs `eval`: applies the keys to a fresh calculator and renders the
/// display, either as two lines or as JSON
///
/// # Errors
///
/// Returns an error if a key is unknown or JSON serialization fails.
pub fn run_eval(config: &CalcConfig, args: &EvalArgs) -> CalcResult<String> {
    let commands = expand_keys(&args.keys)?;
    let mut state = CalculatorState::with_format(config.format.clone());
    for command in &commands {
        state.apply(*command);
    }
    info!(keys = commands.len(), current = state.current_operand(), "eval finished");

    if args.json {
        Ok(serde_json::to_string(&state.snapshot())?)
    } else {
        Ok(format!(
            "{}\n{}",
            state.previous_display_text(),
            state.current_display_text()
        ))
    }
}
