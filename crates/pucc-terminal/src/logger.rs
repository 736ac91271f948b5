//! Structured output sink handed to commands.

use std::sync::Arc;

use crossterm::style::Stylize;

use crate::display::{self, SharedDisplay};

/// Where commands send their user-visible output.
///
/// Only `write` and `writeln` are required; the leveled methods colour the
/// text and end the line.
pub trait Logger: Send + Sync {
    fn write(&self, text: &str);

    fn writeln(&self, text: &str);

    fn info(&self, text: &str) {
        self.writeln(text);
    }

    fn warn(&self, text: &str) {
        self.writeln(&text.yellow().to_string());
    }

    fn error(&self, text: &str) {
        self.writeln(&text.red().to_string());
    }

    fn success(&self, text: &str) {
        self.writeln(&text.green().to_string());
    }
}

/// A logger shared between the shell and in-flight async handlers.
pub type SharedLogger = Arc<dyn Logger>;

/// Logger that writes into a [`TerminalDisplay`](crate::display::TerminalDisplay).
pub struct TerminalLogger {
    display: SharedDisplay,
}

impl TerminalLogger {
    pub fn new(display: SharedDisplay) -> Self {
        Self { display }
    }
}

impl Logger for TerminalLogger {
    fn write(&self, text: &str) {
        if let Err(e) = display::lock(&self.display).write(text) {
            log::warn!("terminal write failed: {e}");
        }
    }

    fn writeln(&self, text: &str) {
        if let Err(e) = display::lock(&self.display).writeln(text) {
            log::warn!("terminal write failed: {e}");
        }
    }
}
