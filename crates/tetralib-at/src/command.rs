//! The single in-flight AT command and its terminator classification.
//!
//! A command accumulates every line that is neither a recognised indication
//! starter nor a terminator. Terminators are matched case-insensitively on
//! the trimmed line:
//!
//! | Trimmed, upper-cased prefix | Disposition |
//! |---|---|
//! | `OK` (exact) | success, yields the accumulated lines |
//! | `ERROR...` | error, message = original line |
//! | `+CME ERROR:...` | error, message = original line |
//! | `+CMS ERROR...` | error, message = original line |

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use tetralib_core::{Error, Result};

/// A command submitted by a caller, waiting to be picked up by the loop.
pub(crate) struct QueuedCommand {
    /// The outbound request text, without line terminator.
    pub request: String,
    /// The caller's cancellation token; the loop observes it to drop a stale
    /// in-flight command.
    pub token: CancellationToken,
    /// Single-shot completion signal back to the caller.
    pub respond: oneshot::Sender<Result<Vec<String>>>,
}

/// The at-most-one command currently awaiting its terminator.
pub(crate) struct ActiveCommand {
    lines: Vec<String>,
    pub token: CancellationToken,
    respond: Option<oneshot::Sender<Result<Vec<String>>>>,
}

impl ActiveCommand {
    pub fn new(queued: QueuedCommand) -> Self {
        ActiveCommand {
            lines: Vec::new(),
            token: queued.token,
            respond: Some(queued.respond),
        }
    }

    /// Feed a received line into this command.
    ///
    /// A terminator resolves the command (the disposition is delivered to the
    /// caller) and returns `true`; any other line joins the buffer.
    pub fn add_line(&mut self, line: &str) -> bool {
        let disposition = match classify_terminator(line) {
            Some(Terminator::Ok) => Ok(std::mem::take(&mut self.lines)),
            Some(Terminator::Error) => Err(Error::Command(line.to_string())),
            None => {
                self.lines.push(line.to_string());
                return false;
            }
        };

        if let Some(respond) = self.respond.take() {
            let _ = respond.send(disposition);
        }
        true
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Terminator {
    Ok,
    Error,
}

fn classify_terminator(line: &str) -> Option<Terminator> {
    let sanitized = line.trim().to_uppercase();
    if sanitized == "OK" {
        Some(Terminator::Ok)
    } else if sanitized.starts_with("ERROR")
        || sanitized.starts_with("+CME ERROR:")
        || sanitized.starts_with("+CMS ERROR")
    {
        Some(Terminator::Error)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> (ActiveCommand, oneshot::Receiver<Result<Vec<String>>>) {
        let (tx, rx) = oneshot::channel();
        let queued = QueuedCommand {
            request: "AT".to_string(),
            token: CancellationToken::new(),
            respond: tx,
        };
        (ActiveCommand::new(queued), rx)
    }

    #[test]
    fn classify_ok_is_case_insensitive_and_trimmed() {
        assert_eq!(classify_terminator("OK"), Some(Terminator::Ok));
        assert_eq!(classify_terminator("  ok "), Some(Terminator::Ok));
        assert_eq!(classify_terminator("OKAY"), None);
    }

    #[test]
    fn classify_error_variants() {
        assert_eq!(classify_terminator("ERROR"), Some(Terminator::Error));
        assert_eq!(classify_terminator("Error at last"), Some(Terminator::Error));
        assert_eq!(classify_terminator("+CME Error: 35"), Some(Terminator::Error));
        assert_eq!(classify_terminator("+CMS ERROR 301"), Some(Terminator::Error));
        assert_eq!(classify_terminator("+CME"), None);
    }

    #[test]
    fn data_lines_accumulate_until_ok() {
        let (mut cmd, mut rx) = command();
        assert!(!cmd.add_line("message1"));
        assert!(!cmd.add_line("message2"));
        assert!(cmd.add_line("OK"));

        let result = rx.try_recv().unwrap().unwrap();
        assert_eq!(result, vec!["message1", "message2"]);
    }

    #[test]
    fn error_line_is_delivered_verbatim() {
        let (mut cmd, mut rx) = command();
        assert!(!cmd.add_line("first line"));
        assert!(cmd.add_line("+CME Error: 35"));

        let err = rx.try_recv().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "+CME Error: 35");
    }

    #[test]
    fn ok_with_no_data_yields_empty_response() {
        let (mut cmd, mut rx) = command();
        assert!(cmd.add_line("OK"));
        assert!(rx.try_recv().unwrap().unwrap().is_empty());
    }
}
