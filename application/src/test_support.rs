//! Hand-written fakes shared by the use case tests.

use crate::ports::council::CouncilPort;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::notification::{Notification, NotificationError, NotificationHub};
use async_trait::async_trait;
use council_domain::{DeliberationContext, DeliberationResult, Verdict};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted behaviour for one model id
#[derive(Clone)]
pub enum Script {
    Reply(String),
    Fail(String),
    /// Answer after a delay
    Slow(Duration, String),
    /// Never answer
    Hang,
}

/// Gateway answering per model from a script
pub struct ScriptedGateway {
    scripts: HashMap<String, Script>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new(scripts: Vec<(&str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(model, script)| (model.to_string(), script))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn vote_json(vote: &str, confidence: f64, reasoning: &str) -> Script {
    Script::Reply(format!(
        r#"{{"vote": "{}", "confidence": {}, "reasoning": "{}"}}"#,
        vote, confidence, reasoning
    ))
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let script = self.scripts.get(&request.model).cloned();
        self.requests.lock().unwrap().push(request.clone());
        match script {
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail(detail)) => Err(GatewayError::RequestFailed(detail)),
            Some(Script::Slow(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Script::Hang) => std::future::pending().await,
            None => Err(GatewayError::ModelNotAvailable(request.model)),
        }
    }
}

/// Notifier that records every notification and answers with a fixed result
pub struct RecordingNotifier {
    reply: Result<Option<String>, NotificationError>,
    pub sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Delivered, reply arrives later (or never)
    pub fn silent() -> Self {
        Self::with_result(Ok(None))
    }

    pub fn replying(reply: &str) -> Self {
        Self::with_result(Ok(Some(reply.to_string())))
    }

    pub fn failing() -> Self {
        Self::with_result(Err(NotificationError::DeliveryFailed("offline".to_string())))
    }

    fn with_result(reply: Result<Option<String>, NotificationError>) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHub for RecordingNotifier {
    async fn send(&self, notification: Notification) -> Result<Option<String>, NotificationError> {
        self.sent.lock().unwrap().push(notification);
        self.reply.clone()
    }
}

/// Council that returns a canned verdict and counts calls
pub struct FixedCouncil {
    result: DeliberationResult,
    calls: AtomicUsize,
    pub contexts: Mutex<Vec<DeliberationContext>>,
}

impl FixedCouncil {
    pub fn new(consensus: bool, vote: Verdict, confidence: f64, reasoning: &str) -> Self {
        let mut result = DeliberationResult::no_consensus(confidence, reasoning);
        result.consensus = consensus;
        result.vote = vote;
        Self {
            result,
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CouncilPort for FixedCouncil {
    async fn deliberate(&self, _question: &str, context: &DeliberationContext) -> DeliberationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(context.clone());
        self.result.clone()
    }
}
