//! Command shell and line editor.
//!
//! Commands are closures or [`CommandHandler`] values registered by name on a
//! [`Shell`]. A [`TerminalSession`] feeds raw terminal input through the
//! [`LineEditor`] and dispatches each submitted line.

mod commands;
pub mod display;
pub mod editor;
pub mod history;
mod interpreter;
pub mod logger;
pub mod parser;
pub mod registrar;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

/// A character-cell display shared between the session and its loggers.
pub use display::{SharedDisplay, TerminalDisplay};
/// Input state machine producing render deltas.
pub use editor::{Effect, LineEditor};
/// Bounded submitted-line history.
pub use history::History;
/// Registry, dispatcher and the handler contract.
pub use interpreter::{
    Command, CommandDef, CommandHandler, Completion, Outcome, Shell, ShellOptions, Spawner,
    TokioSpawner,
};
/// Output sinks handed to commands.
pub use logger::{Logger, SharedLogger, TerminalLogger};
/// Argument parsing.
pub use parser::{ArgValue, ParsedArgs, parse};
/// Host hook for global command bindings.
pub use registrar::GlobalRegistrar;
/// Interactive session over a display.
pub use session::TerminalSession;
