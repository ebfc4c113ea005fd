//! OpenAI-compatible chat-completion gateway
//!
//! Works against any endpoint that speaks the `/chat/completions` protocol
//! (OpenRouter, OpenAI, local proxies). One request per council member,
//! single turn, no streaming.

use crate::config::FileGatewayConfig;
use async_trait::async_trait;
use council_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// LLM gateway that POSTs to `{base_url}/chat/completions` with a bearer key
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleGateway {
    /// Create a gateway; fails when no usable API key is configured
    pub fn new(config: &FileGatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config.usable_api_key().ok_or_else(|| {
            GatewayError::AuthenticationFailed(
                "gateway.api_key is not configured (set COUNCIL_GATE_GATEWAY__API_KEY)"
                    .to_string(),
            )
        })?;

        Ok(Self::with_client(
            reqwest::Client::new(),
            &config.base_url,
            api_key,
        ))
    }

    /// Create a gateway with an existing HTTP client
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_request(request: &CompletionRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: &request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: &request.user_message,
            },
        ],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        stream: false,
    }
}

/// Extract the first choice's text from a response body
fn parse_response(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))
}

fn status_error(status: StatusCode, model: &str, body: &str) -> GatewayError {
    let message = format!("HTTP {}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(format!("{} ({})", model, message)),
        _ => GatewayError::RequestFailed(message),
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        debug!("POST {} model={}", self.endpoint(), request.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&chat_request(&request))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &request.model, &body));
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "openai/gpt-4o".to_string(),
            system_prompt: "You are a board member".to_string(),
            user_message: "Decision Question: Should we: ship?".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = FileGatewayConfig::default();
        assert!(matches!(
            OpenAiCompatibleGateway::new(&config),
            Err(GatewayError::AuthenticationFailed(_))
        ));

        let config = FileGatewayConfig {
            api_key: Some("sk-test".to_string()),
            ..FileGatewayConfig::default()
        };
        assert!(OpenAiCompatibleGateway::new(&config).is_ok());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let gateway = OpenAiCompatibleGateway::with_client(
            reqwest::Client::new(),
            "http://localhost:8080/v1/",
            "k",
        );
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let request = request();
        let body = serde_json::to_value(chat_request(&request)).unwrap();

        assert_eq!(body["model"], "openai/gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(
            body["messages"][1]["content"],
            "Decision Question: Should we: ship?"
        );
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_parse_response_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"vote\":\"approve\"}"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), r#"{"vote":"approve"}"#);
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(GatewayError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(GatewayError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("<html>bad gateway</html>"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "m", ""),
            GatewayError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "m", ""),
            GatewayError::ModelNotAvailable(_)
        ));
        match status_error(StatusCode::TOO_MANY_REQUESTS, "m", "slow down") {
            GatewayError::RequestFailed(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("slow down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
