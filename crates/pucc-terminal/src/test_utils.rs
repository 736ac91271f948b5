//! Shared test utilities for pucc-terminal tests.
//!
//! Provides a [`MockDisplay`] that records everything written to it and a
//! [`RecordingLogger`] that keeps each logged line with its level.

use std::sync::{Arc, Mutex};

use pucc_types::error::{PuccError, Result};

use crate::display::{SharedDisplay, TerminalDisplay};
use crate::logger::Logger;

/// A display that appends every write to `output`.
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub output: String,
    pub clears: usize,
    pub fits: usize,
    pub focused: bool,
    /// Make every write fail with an I/O error.
    pub fail_writes: bool,
}

impl TerminalDisplay for MockDisplay {
    fn write(&mut self, data: &str) -> Result<()> {
        if self.fail_writes {
            return Err(PuccError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "display closed",
            )));
        }
        self.output.push_str(data);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.output.clear();
        self.clears += 1;
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        self.focused = true;
        Ok(())
    }

    fn fit(&mut self) -> Result<()> {
        self.fits += 1;
        Ok(())
    }
}

/// Share a mock display, keeping a typed handle for assertions.
pub fn mock_display(display: MockDisplay) -> (SharedDisplay, Arc<Mutex<MockDisplay>>) {
    let typed = Arc::new(Mutex::new(display));
    let shared: SharedDisplay = Arc::<Mutex<MockDisplay>>::clone(&typed);
    (shared, typed)
}

/// Level tag for a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Write,
    Line,
    Info,
    Warn,
    Error,
    Success,
}

/// A logger that records each call.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    pub entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, level: Level, text: &str) {
        self.entries.lock().unwrap().push((level, text.to_string()));
    }

    /// All recorded text concatenated.
    pub fn text(&self) -> String {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| t.as_str())
            .collect()
    }

    /// Text of every `error` call.
    pub fn errors(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Logger for RecordingLogger {
    fn write(&self, text: &str) {
        self.push(Level::Write, text);
    }

    fn writeln(&self, text: &str) {
        self.push(Level::Line, text);
    }

    fn info(&self, text: &str) {
        self.push(Level::Info, text);
    }

    fn warn(&self, text: &str) {
        self.push(Level::Warn, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }

    fn success(&self, text: &str) {
        self.push(Level::Success, text);
    }
}
