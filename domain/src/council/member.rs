//! Council member value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role given to members configured only by model id.
pub const DEFAULT_ROLE: &str = "Advisor";

/// Identity of one voter on the council (Value Object)
///
/// The member list is fixed configuration: members are built once at
/// startup and never mutated afterwards.
///
/// # Example
///
/// ```
/// use council_domain::council::CouncilMember;
///
/// let chairman = CouncilMember::new("x-ai/grok-3", "Chairman").with_weight(1.5);
/// assert_eq!(chairman.weight(), 1.5);
/// assert_eq!(chairman.short_model_name(), "grok-3");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilMember {
    model: String,
    role: String,
    weight: f64,
}

impl CouncilMember {
    /// Create a member with the default weight of 1.0
    pub fn new(model: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            role: role.into(),
            weight: 1.0,
        }
    }

    /// Create an "Advisor" member from a bare model id
    pub fn advisor(model: impl Into<String>) -> Self {
        Self::new(model, DEFAULT_ROLE)
    }

    /// Set the voting weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Check that the member can take part in a weighted vote.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.trim().is_empty() {
            return Err(DomainError::InvalidMember(
                "model id cannot be empty".to_string(),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(DomainError::InvalidMember(format!(
                "{}: weight must be positive, got {}",
                self.model, self.weight
            )));
        }
        Ok(())
    }

    /// Opaque model identifier passed to the LLM gateway
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Role label used in the system prompt and in synthesized reasoning
    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Model name without the provider prefix
    ///
    /// E.g., "anthropic/claude-sonnet-4" -> "claude-sonnet-4"
    pub fn short_model_name(&self) -> &str {
        self.model.rsplit('/').next().unwrap_or(&self.model)
    }

    /// The council used when none is configured.
    ///
    /// Three equal-weight specialists plus a Chairman carrying 1.5x weight
    /// as tie-breaker.
    pub fn default_council() -> Vec<CouncilMember> {
        vec![
            CouncilMember::new("anthropic/claude-sonnet-4", "Risk Analyst"),
            CouncilMember::new("openai/gpt-4o", "Strategy Director"),
            CouncilMember::new("google/gemini-2.5-pro", "Finance Officer"),
            CouncilMember::new("x-ai/grok-3", "Chairman").with_weight(1.5),
        ]
    }
}

impl std::fmt::Display for CouncilMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.role, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_creation() {
        let member = CouncilMember::new("test/model", "Test Role").with_weight(1.5);
        assert_eq!(member.model(), "test/model");
        assert_eq!(member.role(), "Test Role");
        assert_eq!(member.weight(), 1.5);
    }

    #[test]
    fn test_advisor_defaults() {
        let member = CouncilMember::advisor("openai/gpt-4o");
        assert_eq!(member.role(), "Advisor");
        assert_eq!(member.weight(), 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        assert!(CouncilMember::advisor("m").with_weight(0.0).validate().is_err());
        assert!(CouncilMember::advisor("m").with_weight(-1.0).validate().is_err());
        assert!(
            CouncilMember::advisor("m")
                .with_weight(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(CouncilMember::advisor("m").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let err = CouncilMember::advisor("  ").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidMember(_)));
    }

    #[test]
    fn test_default_council_has_weighted_chairman() {
        let council = CouncilMember::default_council();
        assert_eq!(council.len(), 4);
        let chairman = council.iter().find(|m| m.role() == "Chairman").unwrap();
        assert_eq!(chairman.weight(), 1.5);
        assert!(council.iter().all(|m| m.validate().is_ok()));
    }

    #[test]
    fn test_short_model_name() {
        let member = CouncilMember::advisor("anthropic/claude-sonnet-4");
        assert_eq!(member.short_model_name(), "claude-sonnet-4");
        assert_eq!(CouncilMember::advisor("local").short_model_name(), "local");
    }
}
