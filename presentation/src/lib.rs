//! Presentation layer for council-gate
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive approval channel.

pub mod approval;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use approval::ConsoleApprovalNotifier;
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
