//! Interactive terminal session.
//!
//! Glues a [`LineEditor`] and a [`Shell`] to a display: raw input goes in,
//! render deltas and command output come out.

use std::sync::Arc;

use crossterm::style::Stylize;
use pucc_types::config::{DEFAULT_PROMPT, ShellConfig};
use pucc_types::error::Result;

use crate::display::{self, SharedDisplay};
use crate::editor::{Effect, LineEditor};
use crate::interpreter::{Outcome, Shell, ShellOptions};
use crate::logger::{SharedLogger, TerminalLogger};

/// Echoed when the line is discarded with Ctrl+C.
pub const INTERRUPT_MARKER: &str = "^C\r\n";

const BANNER_TITLE: &str = "Pucc Terminal";
const BANNER_HINT: &str = "Press Ctrl+D to exit; type `help` for available commands";

type CommandObserver = Box<dyn FnMut(&str)>;

pub struct TerminalSession {
    shell: Shell,
    editor: LineEditor,
    display: SharedDisplay,
    logger: SharedLogger,
    prompt: String,
    initial_content: Option<String>,
    observers: Vec<CommandObserver>,
}

impl TerminalSession {
    /// Attach `shell` to `display`. The session's logger becomes the shell's
    /// persistent logger.
    pub fn new(shell: Shell, display: SharedDisplay) -> Self {
        let logger: SharedLogger = Arc::new(TerminalLogger::new(Arc::clone(&display)));
        shell.set_logger(Some(Arc::clone(&logger)));
        Self {
            shell,
            editor: LineEditor::new(),
            display,
            logger,
            prompt: DEFAULT_PROMPT.to_string(),
            initial_content: None,
            observers: Vec::new(),
        }
    }

    /// Build the shell and session from a config.
    pub fn from_config(config: &ShellConfig, display: SharedDisplay) -> Result<Self> {
        config.validate()?;
        let shell = Shell::new(ShellOptions::from_config(config))?;
        let mut session = Self::new(shell, display);
        session.set_prompt(&config.prompt);
        session.initial_content = config.initial_content.clone();
        Ok(session)
    }

    /// Replace the default banner shown by [`start`](Self::start).
    pub fn set_initial_content(&mut self, content: Option<String>) {
        self.initial_content = content;
    }

    /// Clear the screen, show the banner and the first prompt.
    pub fn start(&mut self) -> Result<()> {
        self.shell.initialize();
        {
            let mut screen = display::lock(&self.display);
            screen.clear()?;
            screen.fit()?;
            match &self.initial_content {
                Some(content) => {
                    for line in content.split('\n') {
                        screen.writeln(line)?;
                    }
                },
                None => {
                    screen.writeln(&BANNER_TITLE.cyan().bold().to_string())?;
                    screen.writeln(&BANNER_HINT.dark_grey().to_string())?;
                },
            }
        }
        self.write_prompt()?;
        display::lock(&self.display).focus()
    }

    /// Feed one chunk of raw input data.
    pub fn handle_input(&mut self, data: &str) -> Result<()> {
        match self.editor.handle(data) {
            Effect::None => Ok(()),
            Effect::Render(delta) => self.write(&delta),
            Effect::Submit(line) => {
                self.run_line(&line);
                self.write("\r\n")?;
                self.write_prompt()
            },
            Effect::Interrupt => {
                self.write(INTERRUPT_MARKER)?;
                self.write_prompt()
            },
        }
    }

    fn run_line(&mut self, line: &str) -> Outcome {
        if line.is_empty() {
            return Outcome::Empty;
        }
        for observer in &mut self.observers {
            observer(line);
        }
        self.shell.execute_line(line, Some(Arc::clone(&self.logger)))
    }

    /// Call `observer` with every non-empty submitted line, before it runs.
    pub fn on_command<F: FnMut(&str) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    /// Write raw text to the display.
    pub fn write(&self, text: &str) -> Result<()> {
        display::lock(&self.display).write(text)
    }

    /// Write text followed by `\r\n`.
    pub fn writeln(&self, text: &str) -> Result<()> {
        display::lock(&self.display).writeln(text)
    }

    /// Clear the screen and the edit buffer, then re-prompt.
    pub fn clear(&mut self) -> Result<()> {
        display::lock(&self.display).clear()?;
        self.editor.clear();
        self.write_prompt()
    }

    /// Re-fit the display after its container changed size.
    pub fn fit(&self) -> Result<()> {
        display::lock(&self.display).fit()
    }

    fn write_prompt(&self) -> Result<()> {
        self.write(&self.prompt.as_str().green().to_string())
    }

    /// Prompt written before each input line.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// An empty prompt falls back to the default.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = if prompt.is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            prompt.to_string()
        };
    }

    /// The shell that runs submitted lines.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Mutable shell access, for registering commands.
    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    /// The line editor holding the current buffer and history.
    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// The display-backed logger handed to commands.
    pub fn logger(&self) -> SharedLogger {
        Arc::clone(&self.logger)
    }
}
