//! Demo commands registered by the desktop host.
//!
//! `new` builds a record from named arguments; `fetch` simulates a slow
//! request that completes (or fails) in the background.

use std::time::Duration;

use pucc_terminal::{ArgValue, Completion, ParsedArgs, Shell};
use pucc_types::error::{PuccError, Result};

/// Default simulated latency for `fetch`.
const FETCH_DELAY_MS: i64 = 500;

pub fn register_demo_commands(shell: &mut Shell) -> Result<()> {
    shell.add_command("new", new_record, "Create a record: new <kind> key=value ...")?;
    shell.add_command(
        "fetch",
        fetch,
        "Simulate a slow request: fetch [url] [ms=500] [fail=true]",
    )?;
    Ok(())
}

fn new_record(args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
    let kind = args
        .positional
        .first()
        .ok_or_else(|| PuccError::Command("usage: new <kind> key=value ...".to_string()))?;

    let mut fields: Vec<_> = args.named.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    log::info!("created {kind} with {} field(s)", fields.len());
    if let Some(logger) = shell.logger() {
        logger.write("\r\n");
        logger.success(&format!("Created {kind}"));
        for (key, value) in fields {
            logger.writeln(&format!("  {key} = {value} ({})", type_name(value)));
        }
    }
    Ok(Completion::Done)
}

fn type_name(value: &ArgValue) -> &'static str {
    match value {
        ArgValue::Str(_) => "string",
        ArgValue::Int(_) => "integer",
        ArgValue::Float(_) => "float",
        ArgValue::Bool(_) => "boolean",
    }
}

fn fetch(args: &ParsedArgs, shell: &Shell) -> Result<Completion> {
    let url = args
        .positional
        .first()
        .cloned()
        .unwrap_or_else(|| "https://example.com".to_string());
    let ms = match args.get("ms") {
        None => FETCH_DELAY_MS,
        Some(value) => value
            .as_int()
            .filter(|ms| *ms >= 0)
            .ok_or_else(|| PuccError::Command(format!("ms must be a non-negative integer, got {value}")))?,
    };
    let fail = args.get("fail").and_then(ArgValue::as_bool).unwrap_or(false);
    let logger = shell.logger();

    if let Some(logger) = &logger {
        logger.write("\r\n");
        logger.info(&format!("Fetching {url} ..."));
    }

    Ok(Completion::pending(async move {
        tokio::time::sleep(Duration::from_millis(ms.unsigned_abs())).await;
        if fail {
            return Err(PuccError::Command(format!("request to {url} failed")));
        }
        log::info!("fetched {url} in {ms}ms");
        if let Some(logger) = logger {
            logger.success(&format!("\r\nFetched {url} ({ms}ms)"));
        }
        Ok(())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pucc_terminal::{Logger, Outcome, SharedLogger, ShellOptions};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture(Mutex<String>);

    impl Logger for Capture {
        fn write(&self, text: &str) {
            self.0.lock().unwrap().push_str(text);
        }

        fn writeln(&self, text: &str) {
            let mut out = self.0.lock().unwrap();
            out.push_str(text);
            out.push_str("\r\n");
        }
    }

    fn shell() -> (Shell, Arc<Capture>) {
        let mut shell = Shell::new(ShellOptions::default()).unwrap();
        register_demo_commands(&mut shell).unwrap();
        let capture = Arc::new(Capture::default());
        let logger: SharedLogger = Arc::<Capture>::clone(&capture);
        shell.set_logger(Some(logger));
        (shell, capture)
    }

    #[test]
    fn new_lists_typed_fields() {
        let (shell, out) = shell();
        let outcome = shell.execute_line("$new customer name=\"Jane Doe\" balance=540", None);
        assert_eq!(outcome, Outcome::Done);
        let text = out.0.lock().unwrap().clone();
        assert!(text.contains("Created customer"));
        assert!(text.contains("balance = 540 (integer)"));
        assert!(text.contains("name = Jane Doe (string)"));
        assert!(text.find("balance").unwrap() < text.find("name").unwrap());
    }

    #[test]
    fn new_without_kind_fails() {
        let (shell, out) = shell();
        assert_eq!(shell.execute_line("new", None), Outcome::Failed);
        assert!(out.0.lock().unwrap().contains("usage: new <kind>"));
    }

    #[test]
    fn fetch_rejects_bad_delay() {
        let (shell, out) = shell();
        assert_eq!(shell.execute_line("fetch ms=-5", None), Outcome::Failed);
        assert!(out.0.lock().unwrap().contains("ms must be a non-negative integer"));
    }

    #[tokio::test]
    async fn fetch_completes_in_background() {
        let (shell, out) = shell();
        assert_eq!(shell.execute_line("fetch site ms=0", None), Outcome::Pending);
        for _ in 0..50 {
            if out.0.lock().unwrap().contains("Fetched site") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(out.0.lock().unwrap().contains("Fetched site (0ms)"));
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let (shell, out) = shell();
        assert_eq!(
            shell.execute_line("fetch site ms=0 fail=true", None),
            Outcome::Pending
        );
        for _ in 0..50 {
            if out.0.lock().unwrap().contains("failed") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let text = out.0.lock().unwrap().clone();
        assert!(text.contains("Error executing command \"fetch\""));
        assert!(text.contains("request to site failed"));
    }
}
