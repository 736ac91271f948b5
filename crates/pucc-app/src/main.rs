//! PUCC desktop entry point.
//!
//! Runs the power console in the current tty: raw-mode line editing, the
//! built-in commands plus `new` and `fetch` demos. Ctrl+D exits.
//!
//! The config file comes from the first CLI argument or `PUCC_CONFIG`.

mod commands;
mod input;
mod terminal;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event;

use input::HostInput;
use pucc_terminal::TerminalSession;
use pucc_types::config::ShellConfig;
use terminal::{RawModeGuard, StdoutDisplay};

fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config)?;
    log::info!("Starting PUCC v{}", env!("CARGO_PKG_VERSION"));

    // Async command completions run here while the input loop blocks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _rt = runtime.enter();

    let display = pucc_terminal::display::shared(StdoutDisplay::default());
    let mut session = TerminalSession::from_config(&config, display)?;
    commands::register_demo_commands(session.shell_mut())?;
    log::info!(
        "Registered {} commands",
        session.shell().commands().count()
    );

    let _raw = RawModeGuard::new()?;
    session.start()?;

    loop {
        match input::translate(event::read()?) {
            HostInput::Data(data) => session.handle_input(&data)?,
            HostInput::Resize => session.fit()?,
            HostInput::Quit => break,
            HostInput::Ignore => {},
        }
    }

    session.writeln("")?;
    log::info!("PUCC exiting");
    Ok(())
}

fn load_config() -> Result<ShellConfig> {
    let Some(path) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PUCC_CONFIG").ok())
        .map(PathBuf::from)
    else {
        return Ok(ShellConfig::default());
    };

    if path.extension().is_some_and(|ext| ext == "json") {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(ShellConfig::from_json_or_default(&text));
    }
    ShellConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

/// `RUST_LOG` wins over the configured filter. Lines end in `\r\n` so they
/// stay readable while the tty is in raw mode.
fn init_logging(config: &ShellConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    );
    builder.format(|buf, record| {
        write!(
            buf,
            "[{} {}] {}\r\n",
            record.level(),
            record.target(),
            record.args()
        )
    });
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
