//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod collect_opinions;
pub mod deliberate;
pub mod make_decision;
pub mod request_approval;
pub mod wait_registry;
