//! Deliberation progress reporting

pub mod reporter;
