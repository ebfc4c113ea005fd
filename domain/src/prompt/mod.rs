//! Prompt domain
//!
//! Templates for the queries sent to council members.

mod template;

pub use template::{CouncilPromptTemplate, MEMBER_MAX_TOKENS, MEMBER_TEMPERATURE};
