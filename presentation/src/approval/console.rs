//! Interactive approval channel on the terminal.
//!
//! Prints each notification and, when a reply is requested, reads one
//! line from the input and hands it back to the approval gate inline.
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   APPROVAL REQUIRED  [URGENT]
//! ═══════════════════════════════════════════════════════════════
//! ID: 3f9a1c2e
//! ...
//! Reply: APPROVE / REJECT
//!
//! approval>
//! ```

use async_trait::async_trait;
use colored::Colorize;
use council_application::ports::notification::{Notification, NotificationError, NotificationHub};
use council_domain::Priority;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

/// Terminal-based [`NotificationHub`] that collects replies inline
pub struct ConsoleApprovalNotifier {
    input: SharedInput,
    input_closed: Arc<Notify>,
}

impl ConsoleApprovalNotifier {
    /// Read replies from stdin
    pub fn new() -> Self {
        Self::with_reader(BufReader::new(io::stdin()))
    }

    /// Read replies from any line source
    pub fn with_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            input: Arc::new(Mutex::new(Box::new(reader))),
            input_closed: Arc::new(Notify::new()),
        }
    }

    /// Completes once the input has hit end-of-file while a reply was expected.
    ///
    /// Callers use this to stop waiting on a reply that can no longer come.
    pub async fn input_closed(&self) {
        self.input_closed.notified().await;
    }

    fn display(notification: &Notification) {
        let rule = "═══════════════════════════════════════════════════════════════";
        let (rule, title) = match notification.priority {
            Priority::Critical | Priority::Urgent => (
                rule.red().bold(),
                format!("  {}  [{:?}]", notification.event_type, notification.priority)
                    .red()
                    .bold(),
            ),
            _ => (
                rule.cyan().bold(),
                format!("  {}  [{:?}]", notification.event_type, notification.priority)
                    .cyan()
                    .bold(),
            ),
        };

        println!();
        println!("{}", rule);
        println!("{}", title);
        println!("{}", rule);
        println!("{}", notification.message);
        println!();
    }

    /// Read one non-empty line; `None` at end of input
    async fn read_reply(&self) -> Result<Option<String>, NotificationError> {
        loop {
            print!("{} ", "approval>".magenta().bold());
            io::stdout()
                .flush()
                .map_err(|e| NotificationError::IoError(format!("Failed to flush stdout: {}", e)))?;

            let input = Arc::clone(&self.input);
            let line = tokio::task::spawn_blocking(move || {
                let mut line = String::new();
                let mut reader = input
                    .lock()
                    .map_err(|_| NotificationError::IoError("input lock poisoned".to_string()))?;
                let read = reader.read_line(&mut line).map_err(|e| {
                    NotificationError::IoError(format!("Failed to read input: {}", e))
                })?;
                Ok::<_, NotificationError>((read > 0).then_some(line))
            })
            .await
            .map_err(|e| NotificationError::IoError(e.to_string()))??;

            match line {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(line.trim().to_string())),
            }
        }
    }
}

impl Default for ConsoleApprovalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationHub for ConsoleApprovalNotifier {
    async fn send(&self, notification: Notification) -> Result<Option<String>, NotificationError> {
        Self::display(&notification);

        if !notification.require_response {
            return Ok(None);
        }

        match self.read_reply().await? {
            Some(reply) => Ok(Some(reply)),
            None => {
                self.input_closed.notify_one();
                Err(NotificationError::IoError(
                    "input closed before a reply was given".to_string(),
                ))
            }
        }
    }
}
