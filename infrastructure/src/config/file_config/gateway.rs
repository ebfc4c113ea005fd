//! Gateway configuration (`[gateway]` section)

use council_domain::prompt::{MEMBER_MAX_TOKENS, MEMBER_TEMPERATURE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Raw chat-completion gateway configuration from TOML
///
/// # Example
///
/// ```toml
/// [gateway]
/// base_url = "https://openrouter.ai/api/v1"
/// api_key = "sk-or-v1-..."
/// temperature = 0.7
/// max_tokens = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// OpenAI-compatible API root, without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer token; usually supplied as `COUNCIL_GATE_GATEWAY__API_KEY`
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            temperature: MEMBER_TEMPERATURE,
            max_tokens: MEMBER_MAX_TOKENS,
        }
    }
}

impl FileGatewayConfig {
    /// The API key, if one is set and is not the sample placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("sk-or-v1-XXXX"))
    }
}
