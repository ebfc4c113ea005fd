//! Opinion Collector
//!
//! Queries every council member concurrently, once, and turns each answer
//! into an [`Opinion`]. A member that times out abstains; a member whose
//! call fails or whose answer cannot be parsed gets an error opinion.
//! Nothing here returns an error to the caller.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::ports::progress::DeliberationProgress;
use council_domain::council::parse_opinion;
use council_domain::prompt::{MEMBER_MAX_TOKENS, MEMBER_TEMPERATURE};
use council_domain::{CouncilMember, CouncilPromptTemplate, DeliberationContext, Opinion};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How one member's query settled
#[derive(Debug, Clone, PartialEq)]
pub enum MemberOutcome {
    /// Raw response text, not yet parsed
    Responded(String),
    TimedOut,
    /// Transport or provider failure
    Failed(String),
}

pub struct OpinionCollector<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    timeout: Duration,
    temperature: f32,
    max_tokens: u32,
}

impl<G: LlmGateway + 'static> OpinionCollector<G> {
    pub fn new(gateway: Arc<G>, timeout: Duration) -> Self {
        Self {
            gateway,
            timeout,
            temperature: MEMBER_TEMPERATURE,
            max_tokens: MEMBER_MAX_TOKENS,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// One opinion per member, in member order
    pub async fn collect(
        &self,
        members: &[CouncilMember],
        question: &str,
        context: &DeliberationContext,
        progress: &dyn DeliberationProgress,
    ) -> Vec<Opinion> {
        let user_message = CouncilPromptTemplate::member_query(question, context);
        let user_message = user_message.as_str();

        let queries = members.iter().map(|member| async move {
            let outcome = self.query_member(member, user_message).await;
            let opinion = Self::to_opinion(member, outcome);
            progress.on_opinion(&opinion);
            opinion
        });

        join_all(queries).await
    }

    /// Query a single member with the per-member timeout applied
    pub async fn query_member(&self, member: &CouncilMember, user_message: &str) -> MemberOutcome {
        let request = CompletionRequest {
            model: member.model().to_string(),
            system_prompt: CouncilPromptTemplate::member_system(member.role()),
            user_message: user_message.to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match tokio::time::timeout(self.timeout, self.gateway.complete(request)).await {
            Ok(Ok(text)) => MemberOutcome::Responded(text),
            Ok(Err(e)) => MemberOutcome::Failed(e.to_string()),
            Err(_) => MemberOutcome::TimedOut,
        }
    }

    fn to_opinion(member: &CouncilMember, outcome: MemberOutcome) -> Opinion {
        match outcome {
            MemberOutcome::Responded(text) => match parse_opinion(member, &text) {
                Ok(opinion) => {
                    debug!(
                        "Member {} voted {} ({:.2})",
                        member.model(),
                        opinion.vote,
                        opinion.confidence
                    );
                    opinion
                }
                Err(e) => {
                    warn!("Unusable response from {}: {}", member.model(), e);
                    Opinion::failed(member.clone(), e.to_string())
                }
            },
            MemberOutcome::TimedOut => {
                warn!("Timeout getting opinion from {}", member.model());
                Opinion::timed_out(member.clone())
            }
            MemberOutcome::Failed(detail) => {
                warn!("Error getting opinion from {}: {}", member.model(), detail);
                Opinion::failed(member.clone(), detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::test_support::{Script, ScriptedGateway, vote_json};
    use council_domain::Vote;

    fn members() -> Vec<CouncilMember> {
        vec![
            CouncilMember::new("m/fast", "Risk Analyst"),
            CouncilMember::new("m/hang", "Strategy Director"),
            CouncilMember::new("m/fail", "Finance Officer"),
            CouncilMember::new("m/garbled", "Chairman").with_weight(1.5),
        ]
    }

    fn gateway() -> Arc<ScriptedGateway> {
        Arc::new(ScriptedGateway::new(vec![
            ("m/fast", vote_json("approve", 0.9, "Cheap and reversible")),
            ("m/hang", Script::Hang),
            ("m/fail", Script::Fail("401 Unauthorized".to_string())),
            ("m/garbled", Script::Reply("I think so, yes.".to_string())),
        ]))
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_abstains_and_failure_errors() {
        let collector = OpinionCollector::new(gateway(), Duration::from_secs(120));
        let context = DeliberationContext::new().with("amount", 300);

        let opinions = collector
            .collect(&members(), "Should we: buy ads?", &context, &NoProgress)
            .await;

        assert_eq!(opinions.len(), 4);
        assert_eq!(opinions[0].vote, Vote::Approve);
        assert_eq!(opinions[0].confidence, 0.9);

        assert_eq!(opinions[1].vote, Vote::Abstain);
        assert_eq!(opinions[1].confidence, 0.0);
        assert_eq!(opinions[1].reasoning, "Timeout - no response");

        assert_eq!(opinions[2].vote, Vote::Error);
        assert!(opinions[2].reasoning.contains("401 Unauthorized"));

        assert_eq!(opinions[3].vote, Vote::Error);
        assert!(opinions[3].reasoning.contains("No valid JSON"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_members_not_completion() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            (
                "m/slow",
                Script::Slow(Duration::from_secs(30), r#"{"vote": "reject"}"#.to_string()),
            ),
            ("m/quick", vote_json("approve", 0.6, "ok")),
        ]));
        let collector = OpinionCollector::new(gateway, Duration::from_secs(60));
        let members = vec![CouncilMember::advisor("m/slow"), CouncilMember::advisor("m/quick")];

        let opinions = collector
            .collect(&members, "q", &DeliberationContext::new(), &NoProgress)
            .await;

        assert_eq!(opinions[0].member.model(), "m/slow");
        assert_eq!(opinions[0].vote, Vote::Reject);
        assert_eq!(opinions[1].member.model(), "m/quick");
    }

    #[tokio::test(start_paused = true)]
    async fn test_queries_run_concurrently() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", Script::Slow(Duration::from_secs(50), "{}".to_string())),
            ("b", Script::Slow(Duration::from_secs(50), "{}".to_string())),
            ("c", Script::Slow(Duration::from_secs(50), "{}".to_string())),
        ]));
        let collector = OpinionCollector::new(gateway, Duration::from_secs(60));
        let members: Vec<_> = ["a", "b", "c"].into_iter().map(CouncilMember::advisor).collect();

        let start = tokio::time::Instant::now();
        let opinions = collector
            .collect(&members, "q", &DeliberationContext::new(), &NoProgress)
            .await;

        // Sequential calls would exceed every member's timeout budget
        assert!(start.elapsed() < Duration::from_secs(60));
        assert!(opinions.iter().all(|o| o.vote == Vote::Abstain && o.confidence == 0.5));
    }

    #[tokio::test]
    async fn test_request_carries_role_prompt_and_sampling() {
        let gateway = Arc::new(ScriptedGateway::new(vec![(
            "m/fast",
            vote_json("approve", 1.0, "fine"),
        )]));
        let collector = OpinionCollector::new(gateway.clone(), Duration::from_secs(5));
        let members = vec![CouncilMember::new("m/fast", "Risk Analyst")];
        let context = DeliberationContext::new().with("vendor", "Acme");

        collector
            .collect(&members, "Should we: buy ads?", &context, &NoProgress)
            .await;

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system_prompt.contains("Your role is: Risk Analyst"));
        assert!(requests[0].user_message.contains("- vendor: Acme"));
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[0].max_tokens, 500);
    }
}
