//! Built-in commands: `help`, `about`, `echo`.
//!
//! Each built-in writes to the shell's active logger when one is set and
//! mirrors its output to the `log` facade.

use crossterm::style::Stylize;
use pucc_types::error::Result;

use crate::interpreter::{CommandHandler, Completion, Shell};
use crate::parser::ParsedArgs;

const SEPARATOR_WIDTH: usize = 50;

fn separator() -> String {
    "─".repeat(SEPARATOR_WIDTH)
}

/// Register the built-ins. `help` is replaced by `custom_help` when given.
pub fn register_builtins(
    shell: &mut Shell,
    custom_help: Option<Box<dyn CommandHandler>>,
) -> Result<()> {
    let help = custom_help.unwrap_or_else(|| Box::new(HelpCmd));
    shell.register("help", help, "Display all available commands")?;
    shell.register("about", Box::new(AboutCmd), "Show library information")?;
    shell.register("echo", Box::new(EchoCmd), "Echo text")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl CommandHandler for HelpCmd {
    fn call(&self, _args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
        let logger = shell.logger();
        let total = shell.commands().count();
        if total == 0 {
            let msg = "No commands registered.";
            log::info!("{msg}");
            if let Some(logger) = &logger {
                logger.info(msg);
            }
            return Ok(Completion::Done);
        }

        let title = "\r\n\r\nAvailable Commands:".cyan().bold().to_string();
        let rule = separator().dark_grey().to_string();
        let prefix = shell.command_prefix();

        log::info!("Available Commands:");
        let mut lines = vec![title, rule.clone()];
        for cmd in shell.commands() {
            log::info!("{prefix}{}(...args) - {}", cmd.name(), cmd.description());
            lines.push(format!(
                "{} - {}",
                cmd.name().green().bold(),
                cmd.description().dark_grey()
            ));
        }
        let footer = format!("Total: {total} command(s)");
        log::info!("{footer}");
        lines.push(rule);
        lines.push(footer.dim().to_string());

        if let Some(logger) = &logger {
            for line in &lines {
                logger.writeln(line);
            }
        }
        Ok(Completion::Done)
    }
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd;
impl CommandHandler for AboutCmd {
    fn call(&self, _args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
        let prefix = shell.command_prefix();
        let version = format!("Version: {}", env!("CARGO_PKG_VERSION"));
        let description = "Power User Console Component - A terminal command system library";
        log::info!("Pucc {version}");

        let Some(logger) = shell.logger() else {
            return Ok(Completion::Done);
        };
        let rule = separator().dark_grey().to_string();
        logger.writeln(&format!("\r\n{}", "Pucc".blue().bold()));
        logger.writeln(&rule);
        logger.writeln(&version.cyan().to_string());
        logger.writeln(description);
        logger.writeln(&rule);
        logger.writeln(&format!(
            "Use {} to see available commands",
            format!("{prefix}help").green().bold()
        ));
        Ok(Completion::Done)
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl CommandHandler for EchoCmd {
    fn call(&self, args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
        let text = if args.positional.is_empty() {
            "No text provided".to_string()
        } else {
            args.positional.join(" ")
        };
        log::info!("{text}");
        if let Some(logger) = shell.logger() {
            logger.write("\r\n");
            logger.writeln(&text);
        }
        Ok(Completion::Done)
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{Outcome, ShellOptions};
    use crate::test_utils::{Level, RecordingLogger};

    use super::*;

    fn shell() -> Shell {
        Shell::new(ShellOptions::default()).unwrap()
    }

    #[test]
    fn echo_joins_positionals() {
        let shell = shell();
        let logger = RecordingLogger::shared();
        shell.execute("echo", "hello   world", Some(logger.clone()));
        let entries = logger.entries.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec![
                (Level::Write, "\r\n".to_string()),
                (Level::Line, "hello world".to_string()),
            ]
        );
    }

    #[test]
    fn echo_ignores_named_args() {
        let shell = shell();
        let logger = RecordingLogger::shared();
        shell.execute("echo", "a key=value b", Some(logger.clone()));
        assert_eq!(logger.text(), "\r\na b");
    }

    #[test]
    fn echo_without_text() {
        let shell = shell();
        let logger = RecordingLogger::shared();
        shell.execute("echo", "", Some(logger.clone()));
        assert!(logger.text().contains("No text provided"));
    }

    #[test]
    fn echo_without_logger_still_succeeds() {
        assert_eq!(shell().execute("echo", "quiet", None), Outcome::Done);
    }

    #[test]
    fn help_lists_every_command() {
        let mut shell = shell();
        shell
            .add_command(
                "deploy",
                |_: &ParsedArgs, _: &Shell| Ok(Completion::Done),
                "Ship it",
            )
            .unwrap();
        let logger = RecordingLogger::shared();
        assert_eq!(
            shell.execute("help", "", Some(logger.clone())),
            Outcome::Done
        );
        let text = logger.text();
        assert!(text.contains("Available Commands:"));
        for (name, desc) in [
            ("help", "Display all available commands"),
            ("about", "Show library information"),
            ("echo", "Echo text"),
            ("deploy", "Ship it"),
        ] {
            assert!(text.contains(name), "missing {name}");
            assert!(text.contains(desc), "missing {desc}");
        }
        assert!(text.contains("Total: 4 command(s)"));
        assert!(text.contains(&"─".repeat(50)));
    }

    #[test]
    fn help_lists_in_registration_order() {
        let shell = shell();
        let logger = RecordingLogger::shared();
        shell.execute("help", "", Some(logger.clone()));
        let text = logger.text();
        let help = text.find("Display all").unwrap();
        let about = text.find("Show library").unwrap();
        let echo = text.find("Echo text").unwrap();
        assert!(help < about && about < echo);
    }

    #[test]
    fn about_mentions_prefix_and_version() {
        let shell = Shell::new(ShellOptions::default().with_prefix("pc")).unwrap();
        let logger = RecordingLogger::shared();
        shell.execute("about", "", Some(logger.clone()));
        let text = logger.text();
        assert!(text.contains("Pucc"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("pchelp"));
        assert!(text.contains("Power User Console Component"));
    }
}
