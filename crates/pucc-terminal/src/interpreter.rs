//! Command registry and dispatch.
//!
//! The [`Shell`] owns the commands, the command prefix and the active logger.
//! Dispatch parses the argument text, invokes the handler and converts every
//! failure (an `Err`, a panic, or a failed async completion) into a reported
//! message. Nothing a command does can end the input loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use futures::future::BoxFuture;
use pucc_types::config::{DEFAULT_PREFIX, ShellConfig};
use pucc_types::error::{PuccError, Result};

use crate::logger::{Logger, SharedLogger};
use crate::parser::{self, ParsedArgs};
use crate::registrar::GlobalRegistrar;

/// Description stored when a command is registered without one.
const NO_DESCRIPTION: &str = "No description provided";

/// Asynchronous remainder of a command.
pub type PendingFuture = BoxFuture<'static, Result<()>>;

/// What a handler returns when it did not fail synchronously.
pub enum Completion {
    /// All work finished during the call.
    Done,
    /// Work continues in the background; a failure is reported when it resolves.
    Pending(PendingFuture),
}

impl Completion {
    /// Wrap a future as a pending completion.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => f.write_str("Done"),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// The callable bound to a command name.
pub trait CommandHandler {
    /// Run the command with its parsed arguments.
    fn call(&self, args: &ParsedArgs, shell: &Shell) -> Result<Completion>;
}

impl<F> CommandHandler for F
where
    F: Fn(&ParsedArgs, &Shell) -> Result<Completion>,
{
    fn call(&self, args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
        self(args, shell)
    }
}

/// A registered command.
pub struct Command {
    name: String,
    description: String,
    handler: Box<dyn CommandHandler>,
}

impl Command {
    /// Name the command is invoked by, without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line summary shown by `help`.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// An unchecked command definition, e.g. from a list of initial commands.
pub struct CommandDef {
    pub name: String,
    pub description: String,
    pub handler: Option<Box<dyn CommandHandler>>,
}

impl CommandDef {
    /// A definition with no handler yet.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            handler: None,
        }
    }

    /// Attach a closure handler.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ParsedArgs, &Shell) -> Result<Completion> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }
}

/// Runs pending completions.
pub trait Spawner {
    /// Start `task` in the background without waiting for it.
    fn spawn(&self, task: BoxFuture<'static, ()>) -> Result<()>;
}

/// Spawns onto whichever tokio runtime is current at dispatch time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) -> Result<()> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| PuccError::Command(format!("no async runtime available: {e}")))?;
        handle.spawn(task);
        Ok(())
    }
}

impl Spawner for tokio::runtime::Handle {
    fn spawn(&self, task: BoxFuture<'static, ()>) -> Result<()> {
        tokio::runtime::Handle::spawn(self, task);
        Ok(())
    }
}

/// Result of one dispatch. Failures have already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The line was blank.
    Empty,
    /// The handler finished.
    Done,
    /// The handler's async work was spawned.
    Pending,
    /// No command with that name.
    NotFound,
    /// The handler failed synchronously.
    Failed,
}

/// Construction options for a [`Shell`].
pub struct ShellOptions {
    pub command_prefix: String,
    pub enable_global_registrations: bool,
    /// Replaces the built-in `help` handler.
    pub custom_help: Option<Box<dyn CommandHandler>>,
    /// Registered after the built-ins, in order.
    pub initial_commands: Vec<CommandDef>,
    pub registrar: Option<Box<dyn GlobalRegistrar>>,
    pub spawner: Box<dyn Spawner>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_PREFIX.to_string(),
            enable_global_registrations: true,
            custom_help: None,
            initial_commands: Vec::new(),
            registrar: None,
            spawner: Box::new(TokioSpawner),
        }
    }
}

impl ShellOptions {
    /// Options carrying the shell-related settings of a config.
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            enable_global_registrations: config.enable_global_registrations,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.command_prefix = prefix.to_string();
        self
    }

    pub fn with_help<H: CommandHandler + 'static>(mut self, help: H) -> Self {
        self.custom_help = Some(Box::new(help));
        self
    }

    pub fn with_command(mut self, def: CommandDef) -> Self {
        self.initial_commands.push(def);
        self
    }

    pub fn with_registrar<R: GlobalRegistrar + 'static>(mut self, registrar: R) -> Self {
        self.registrar = Some(Box::new(registrar));
        self
    }

    pub fn with_spawner<S: Spawner + 'static>(mut self, spawner: S) -> Self {
        self.spawner = Box::new(spawner);
        self
    }
}

/// Command registry and dispatcher.
///
/// Handlers receive `&Shell` and can list, inspect and execute other
/// commands through it.
pub struct Shell {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
    prefix: String,
    logger: RefCell<Option<SharedLogger>>,
    global_registrations: bool,
    registrar: Option<Box<dyn GlobalRegistrar>>,
    spawner: Box<dyn Spawner>,
    initialized: bool,
}

impl Shell {
    /// Validate the prefix and register the built-ins and initial commands.
    pub fn new(options: ShellOptions) -> Result<Self> {
        validate_prefix(&options.command_prefix)?;
        let mut shell = Self {
            commands: Vec::new(),
            index: HashMap::new(),
            prefix: options.command_prefix,
            logger: RefCell::new(None),
            global_registrations: options.enable_global_registrations,
            registrar: options.registrar,
            spawner: options.spawner,
            initialized: false,
        };
        crate::commands::register_builtins(&mut shell, options.custom_help)?;
        for def in options.initial_commands {
            shell.add_command_def(def)?;
        }
        Ok(shell)
    }

    /// Register a closure as a command.
    pub fn add_command<F>(&mut self, name: &str, handler: F, description: &str) -> Result<()>
    where
        F: Fn(&ParsedArgs, &Shell) -> Result<Completion> + 'static,
    {
        self.register(name, Box::new(handler), description)
    }

    /// Register an unchecked definition.
    pub fn add_command_def(&mut self, def: CommandDef) -> Result<()> {
        let CommandDef {
            name,
            description,
            handler,
        } = def;
        validate_name(&name, &self.prefix)?;
        let handler = handler.ok_or_else(|| PuccError::InvalidHandler(name.clone()))?;
        self.register(&name, handler, &description)
    }

    /// Register a command. Re-registering a name replaces it in place.
    pub fn register(
        &mut self,
        name: &str,
        handler: Box<dyn CommandHandler>,
        description: &str,
    ) -> Result<()> {
        validate_name(name, &self.prefix)?;
        let description = if description.is_empty() {
            NO_DESCRIPTION
        } else {
            description
        };
        let command = Command {
            name: name.to_string(),
            description: description.to_string(),
            handler,
        };
        let existing = self.index.get(name).copied();
        match existing {
            Some(pos) => {
                log::warn!("Command \"{name}\" already exists. Overwriting...");
                self.commands[pos] = command;
            },
            None => {
                self.index.insert(name.to_string(), self.commands.len());
                self.commands.push(command);
            },
        }
        if self.global_registrations {
            self.attach_global(name);
        }
        Ok(())
    }

    /// Attach every registered command to the global registrar, once.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        if self.global_registrations {
            for command in &self.commands {
                self.attach_global(&command.name);
            }
        }
        self.initialized = true;
    }

    fn attach_global(&self, name: &str) {
        let Some(registrar) = &self.registrar else {
            return;
        };
        registrar.bind(&format!("{}{name}", self.prefix), name);
        if !registrar.is_bound(name) {
            registrar.bind(name, name);
        }
    }

    /// All commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Exact-match lookup.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&pos| &self.commands[pos])
    }

    /// Prefix accepted in front of command names (`$` by default).
    pub fn command_prefix(&self) -> &str {
        &self.prefix
    }

    /// The active logger (a per-call override while a command runs).
    pub fn logger(&self) -> Option<SharedLogger> {
        self.logger.borrow().clone()
    }

    /// Replace the persistent logger; `None` leaves only the `log` facade.
    pub fn set_logger(&self, logger: Option<SharedLogger>) {
        self.logger.replace(logger);
    }

    /// Execute `name` with raw argument text.
    ///
    /// `logger`, when given, replaces the active logger for the duration of
    /// the call only.
    pub fn execute(&self, name: &str, input: &str, logger: Option<SharedLogger>) -> Outcome {
        let _scope = logger.map(|l| LoggerScope::enter(&self.logger, l));

        let Some(command) = self.command(name) else {
            self.report(&PuccError::CommandNotFound {
                name: name.to_string(),
                prefix: self.prefix.clone(),
            });
            return Outcome::NotFound;
        };

        let args = parser::parse(input);
        log::debug!("dispatch {name}: {args:?}");

        let result = panic::catch_unwind(AssertUnwindSafe(|| command.handler.call(&args, self)));
        match result {
            Ok(Ok(Completion::Done)) => Outcome::Done,
            Ok(Ok(Completion::Pending(future))) => self.spawn_pending(name, future),
            Ok(Err(e)) => {
                self.report_handler_error(name, &e.to_string());
                Outcome::Failed
            },
            Err(payload) => {
                self.report_handler_error(name, &panic_message(payload.as_ref()));
                Outcome::Failed
            },
        }
    }

    /// Execute a full input line: `[prefix]name rest...`.
    pub fn execute_line(&self, line: &str, logger: Option<SharedLogger>) -> Outcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Outcome::Empty;
        }
        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let name = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
        self.execute(name, rest, logger)
    }

    /// Invoke a command the way a global binding does: arguments joined by
    /// single spaces.
    pub fn call(&self, name: &str, args: &[&str]) -> Outcome {
        self.execute(name, &args.join(" "), None)
    }

    fn spawn_pending(&self, name: &str, future: PendingFuture) -> Outcome {
        let logger = self.logger();
        let command = name.to_string();
        let task = async move {
            let message = match AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            let err = PuccError::Handler {
                name: command,
                message,
            };
            report_to(&err, logger.as_deref());
        };
        match self.spawner.spawn(Box::pin(task)) {
            Ok(()) => Outcome::Pending,
            Err(e) => {
                self.report_handler_error(name, &e.to_string());
                Outcome::Failed
            },
        }
    }

    fn report_handler_error(&self, name: &str, message: &str) {
        self.report(&PuccError::Handler {
            name: name.to_string(),
            message: message.to_string(),
        });
    }

    fn report(&self, err: &PuccError) {
        let logger = self.logger();
        report_to(err, logger.as_deref());
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("prefix", &self.prefix)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}

/// Send a dispatch error to the console sink and the logger, if any.
fn report_to(err: &PuccError, logger: Option<&dyn Logger>) {
    log::error!("{err}");
    if let Some(logger) = logger {
        logger.error(&format!("\r\n{err}"));
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Restores the previous logger when dropped, including during unwinding.
struct LoggerScope<'a> {
    slot: &'a RefCell<Option<SharedLogger>>,
    previous: Option<SharedLogger>,
}

impl<'a> LoggerScope<'a> {
    fn enter(slot: &'a RefCell<Option<SharedLogger>>, logger: SharedLogger) -> Self {
        let previous = slot.replace(Some(logger));
        Self { slot, previous }
    }
}

impl Drop for LoggerScope<'_> {
    fn drop(&mut self) {
        self.slot.replace(self.previous.take());
    }
}

/// `^[A-Za-z_$][A-Za-z0-9_$]*$`
fn validate_prefix(prefix: &str) -> Result<()> {
    let mut chars = prefix.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        },
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(PuccError::InvalidPrefix(prefix.to_string()))
    }
}

fn validate_name(name: &str, prefix: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(PuccError::InvalidName(name.to_string()));
    }
    if name.starts_with(prefix) {
        return Err(PuccError::ReservedPrefix {
            name: name.to_string(),
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}
