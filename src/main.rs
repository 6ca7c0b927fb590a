use std::io::{self, stdout, Stdout};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use anagramator::api::{HttpWordSource, WordSource};
use anagramator::app::LogicThread;
use anagramator::config::Config;
use anagramator::log::LogLevel;
use anagramator::render::{self, RenderState};
use anagramator::sanitize::sanitize;
use anagramator::tea::{outcome_state, UiState};
use anagramator::{ui, zlog, zlog_warn, Error, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Anagramator - find every Polish word you can build from a set of letters
#[derive(Parser, Debug)]
#[command(name = "anagramator")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    ANAGRAMATOR_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.anagramator/anagramator.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Word lookup endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Settle period before a query is sent, in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Ignore replies that belong to a superseded query
    #[arg(short = 'g', long)]
    pub guard_stale: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Look up words once and print them (no TUI)
    Find {
        /// Letters to build words from
        letters: String,

        /// Print the raw service response as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    anagramator::log::init_with_debug(cli.debug);

    let config = apply_overrides(Config::load()?, &cli);
    config.validate()?;
    if let Some(level) = config.log_level.as_deref().and_then(LogLevel::parse) {
        if !anagramator::log::is_debug() {
            anagramator::log::set_level(level);
        }
    }

    if let Some(Command::Find { letters, json }) = cli.command {
        return run_find(&config, &letters, json);
    }

    if anagramator::log::is_debug() {
        zlog!("Anagramator starting (debug mode enabled)");
    } else {
        zlog!("Anagramator starting");
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle
        .join()
        .unwrap_or_else(|_| Err(Error::Validation("logic thread panicked".to_string())));
    restore_terminal(&mut terminal)?;
    result.and(logic_result)?;
    Ok(ExitCode::SUCCESS)
}

/// Command-line flags win over the config file.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(url) = &cli.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(ms) = cli.delay_ms {
        config.debounce_ms = Some(ms);
    }
    if cli.guard_stale {
        config.stale_guard = true;
    }
    config
}

/// Exit status for a finished `find`.
fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// One lookup without debouncing; prints the rendered region.
fn run_find(config: &Config, raw: &str, json: bool) -> Result<ExitCode> {
    let letters = sanitize(raw);
    if letters.is_empty() {
        return Err(Error::Validation(format!(
            "'{}' contains no usable letters",
            raw
        )));
    }
    zlog!("Find command: letters={} json={}", letters, json);

    let source = HttpWordSource::new(config.effective_api_url(), config.request_timeout())?;
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(source.lookup(&letters));

    if json {
        let reply = result?;
        println!("{}", serde_json::to_string_pretty(&reply.body)?);
        return Ok(exit_code(!reply.ok));
    }

    let result = result.map_err(|e| {
        zlog_warn!("Find lookup failed: {}", e);
        eprintln!("{}", e);
        e.to_string()
    });
    let state = outcome_state(result);
    println!("{}", render::render(&state).to_plain_text());
    Ok(exit_code(find_failed(&state)))
}

/// `find` fails when the lookup ended in one of the error states.
fn find_failed(state: &UiState) -> bool {
    matches!(state, UiState::Error(_))
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
