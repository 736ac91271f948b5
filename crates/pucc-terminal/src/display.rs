//! The terminal display the shell renders into.
//!
//! The display is owned by the host (a raw-mode tty, an embedded widget, a
//! test double). The session writes prompts and render deltas to it, and the
//! [`TerminalLogger`](crate::logger::TerminalLogger) writes command output to
//! the same display, possibly from asynchronous handler work.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pucc_types::error::Result;

/// A character-cell terminal that accepts text and ANSI control sequences.
pub trait TerminalDisplay: Send {
    /// Write raw text (may contain control sequences).
    fn write(&mut self, data: &str) -> Result<()>;

    /// Write text followed by `\r\n`.
    fn writeln(&mut self, data: &str) -> Result<()> {
        self.write(data)?;
        self.write("\r\n")
    }

    /// Clear the screen.
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    /// Give the display input focus.
    fn focus(&mut self) -> Result<()> {
        Ok(())
    }

    /// Re-fit the display to its container (after a resize).
    fn fit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A display shared between the session and its loggers.
pub type SharedDisplay = Arc<Mutex<dyn TerminalDisplay>>;

/// Wrap a display for sharing.
pub fn shared<D: TerminalDisplay + 'static>(display: D) -> SharedDisplay {
    Arc::new(Mutex::new(display))
}

/// Lock a shared display. A writer that panicked mid-write leaves the
/// display usable.
pub fn lock(display: &SharedDisplay) -> MutexGuard<'_, dyn TerminalDisplay + 'static> {
    display.lock().unwrap_or_else(PoisonError::into_inner)
}
