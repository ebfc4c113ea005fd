//! Human approval channels

mod console;

pub use console::ConsoleApprovalNotifier;
