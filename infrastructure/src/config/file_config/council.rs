//! Council configuration (`[council]` section)

use council_domain::CouncilMember;
use serde::{Deserialize, Serialize};

/// One configured member: either a bare model id or a full table
///
/// ```toml
/// [council]
/// members = [
///     "openai/gpt-4o",
///     { model = "x-ai/grok-3", role = "Chairman", weight = 1.5 },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileMemberConfig {
    Model(String),
    Detailed {
        model: String,
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        weight: Option<f64>,
    },
}

impl FileMemberConfig {
    pub fn model(&self) -> &str {
        match self {
            FileMemberConfig::Model(model) => model,
            FileMemberConfig::Detailed { model, .. } => model,
        }
    }

    /// Convert to a domain member; missing role and weight fall back to
    /// "Advisor" and 1.0.
    pub fn to_member(&self) -> CouncilMember {
        match self {
            FileMemberConfig::Model(model) => CouncilMember::advisor(model.trim()),
            FileMemberConfig::Detailed {
                model,
                role,
                weight,
            } => {
                let member = match role {
                    Some(role) => CouncilMember::new(model.trim(), role.as_str()),
                    None => CouncilMember::advisor(model.trim()),
                };
                match weight {
                    Some(weight) => member.with_weight(*weight),
                    None => member,
                }
            }
        }
    }
}

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub members: Vec<FileMemberConfig>,
    /// Fall back to the built-in four-member council when `members` is empty
    pub use_default_council: bool,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            use_default_council: true,
        }
    }
}

impl FileCouncilConfig {
    pub fn to_members(&self) -> Vec<CouncilMember> {
        self.members.iter().map(FileMemberConfig::to_member).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        council: FileCouncilConfig,
    }

    #[test]
    fn test_mixed_member_forms() {
        let toml_str = r#"
[council]
members = [
    "openai/gpt-4o",
    { model = "x-ai/grok-3", role = "Chairman", weight = 1.5 },
    { model = "google/gemini-2.5-pro" },
]
"#;
        let wrapper: Wrapper = toml::from_str(toml_str).unwrap();
        let members = wrapper.council.to_members();

        assert_eq!(members.len(), 3);
        assert_eq!(members[0].role(), "Advisor");
        assert_eq!(members[0].weight(), 1.0);
        assert_eq!(members[1].role(), "Chairman");
        assert_eq!(members[1].weight(), 1.5);
        assert_eq!(members[2].model(), "google/gemini-2.5-pro");
        assert_eq!(members[2].role(), "Advisor");
        assert!(wrapper.council.use_default_council);
    }
}
