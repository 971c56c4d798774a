//! keypad-calc: four-function calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc                       # Interactive terminal calculator
//! keypad-calc eval 12+3=            # Prints the two display lines
//! keypad-calc eval --json 9/0 Enter # Display and state as JSON
//! ```

use std::process::ExitCode;

use clap::Parser;
use keypad_calc::{
    cli::{run_eval, Cli, Commands},
    logging::{self, LogTarget},
    CalcConfig, CalcResult,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CalcResult<()> {
    let cli = Cli::parse();
    let config = cli.build_config()?;

    match &cli.command {
        Some(Commands::Eval(args)) => {
            logging::init(config.verbosity, LogTarget::Stderr)?;
            println!("{}", run_eval(&config, args)?);
            Ok(())
        }
        Some(Commands::Tui) | None => {
            let target = cli
                .log_file
                .as_deref()
                .map_or(LogTarget::Disabled, LogTarget::File);
            logging::init(config.verbosity, target)?;
            run_tui(&config)
        }
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: &CalcConfig) -> CalcResult<()> {
    use std::io;

    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use tracing::info;

    info!("starting terminal session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("terminal session ended");
    result
}

#[cfg(feature = "tui")]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut ratatui::Terminal<B>,
    config: &CalcConfig,
) -> CalcResult<()> {
    use std::time::{Duration, Instant};

    use crossterm::event::{self, Event};
    use keypad_calc::tui::{render, CalculatorApp, InputHandler, KeyAction};

    const POLL_INTERVAL: Duration = Duration::from_millis(25);

    let mut app = CalculatorApp::from_config(config);
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        let area = terminal.draw(|f| render(&app, f))?.area;

        if event::poll(POLL_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) => input_handler.handle_key(key),
                Event::Mouse(mouse) => input_handler.handle_mouse(mouse),
                _ => KeyAction::None,
            };
            app.handle_action(action, area, Instant::now());
        }

        app.tick(Instant::now());
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &CalcConfig) -> CalcResult<()> {
    Err(keypad_calc::CalcError::invalid_argument(
        "built without the `tui` feature; use `eval`",
    ))
}
