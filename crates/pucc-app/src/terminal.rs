//! Raw-mode stdout display for the desktop host.

use std::io::{self, Stdout, Write};
use std::panic::{self, PanicHookInfo};

use crossterm::cursor::MoveTo;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use pucc_terminal::TerminalDisplay;
use pucc_types::error::Result;

/// Writes straight to stdout; the tty does the rendering.
pub struct StdoutDisplay {
    out: Stdout,
}

impl Default for StdoutDisplay {
    fn default() -> Self {
        Self { out: io::stdout() }
    }
}

impl TerminalDisplay for StdoutDisplay {
    fn write(&mut self, data: &str) -> Result<()> {
        let mut out = self.out.lock();
        out.write_all(data.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// A panic hook that hands the formatted report to `sink` instead of stderr.
fn quiet_hook<F>(sink: F) -> PanicHook
where
    F: Fn(String) + Send + Sync + 'static,
{
    Box::new(move |info| sink(info.to_string()))
}

/// Puts the tty in raw mode with bracketed paste; restores it on drop.
///
/// While held, panic reports go to the log instead of stderr, which shares
/// the raw-mode screen. Handler panics are caught by the shell, so this only
/// keeps them off the display.
pub struct RawModeGuard {
    previous_hook: Option<PanicHook>,
}

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnableBracketedPaste)?;
        let previous_hook = panic::take_hook();
        panic::set_hook(quiet_hook(|report| log::error!("{report}")));
        log::debug!("Raw mode enabled");
        Ok(Self {
            previous_hook: Some(previous_hook),
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableBracketedPaste);
        let _ = terminal::disable_raw_mode();
        // set_hook panics while panicking; the quiet hook stays in that case.
        if std::thread::panicking() {
            return;
        }
        if let Some(hook) = self.previous_hook.take() {
            panic::set_hook(hook);
        }
    }
}
