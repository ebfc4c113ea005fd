//! Council Protocol use case
//!
//! Collects one opinion per member, drops error opinions and hands the rest
//! to the consensus synthesizer. Member failures never surface as errors;
//! only construction can fail.

use crate::config::CouncilConfig;
use crate::ports::council::CouncilPort;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DeliberationProgress, NoProgress};
use crate::use_cases::collect_opinions::OpinionCollector;
use async_trait::async_trait;
use council_domain::core::string::truncate;
use council_domain::{
    ConsensusSynthesizer, CouncilMember, DeliberationContext, DeliberationResult, DomainError,
    Opinion, WeightedConsensus,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info};

/// Errors that can occur while building a council
#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("No council members configured and the default council is disabled")]
    NoMembers,

    #[error("Member timeout must be greater than zero")]
    ZeroTimeout,

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Use case for running council deliberations
pub struct CouncilProtocol<G: LlmGateway + 'static> {
    members: Vec<CouncilMember>,
    collector: OpinionCollector<G>,
    synthesizer: Arc<dyn ConsensusSynthesizer>,
    progress: Arc<dyn DeliberationProgress>,
}

impl<G: LlmGateway + 'static> std::fmt::Debug for CouncilProtocol<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouncilProtocol")
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

impl<G: LlmGateway + 'static> CouncilProtocol<G> {
    /// Build a council, failing fast on misconfiguration
    pub fn new(gateway: Arc<G>, config: &CouncilConfig) -> Result<Self, CouncilError> {
        let members = config.effective_members();
        if members.is_empty() {
            return Err(CouncilError::NoMembers);
        }
        for member in &members {
            member.validate()?;
        }
        if config.member_timeout == Duration::ZERO {
            return Err(CouncilError::ZeroTimeout);
        }
        let synthesizer = WeightedConsensus::new(config.consensus_threshold)?;

        Ok(Self {
            members,
            collector: OpinionCollector::new(gateway, config.member_timeout)
                .with_sampling(config.temperature, config.max_tokens),
            synthesizer: Arc::new(synthesizer),
            progress: Arc::new(NoProgress),
        })
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn ConsensusSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn DeliberationProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn members(&self) -> &[CouncilMember] {
        &self.members
    }

    /// Run one deliberation round
    pub async fn deliberate(
        &self,
        question: &str,
        context: &DeliberationContext,
    ) -> DeliberationResult {
        let start = Instant::now();
        info!(
            "Council deliberation started ({} members): {}",
            self.members.len(),
            truncate(question, 100)
        );
        self.progress.on_deliberation_start(question, &self.members);

        let opinions = self
            .collector
            .collect(&self.members, question, context, self.progress.as_ref())
            .await;

        let valid: Vec<Opinion> = opinions.into_iter().filter(|o| !o.is_error()).collect();

        let result = if valid.is_empty() {
            error!("All council members failed to respond");
            DeliberationResult::all_failed()
        } else {
            self.synthesizer.synthesize(valid)
        };
        let result = result.with_duration(start.elapsed());

        info!(
            "Council result: {} (confidence: {:.0}%, consensus: {})",
            result.vote,
            result.confidence * 100.0,
            result.consensus
        );
        self.progress.on_deliberation_complete(&result);

        result
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> CouncilPort for CouncilProtocol<G> {
    async fn deliberate(&self, question: &str, context: &DeliberationContext) -> DeliberationResult {
        CouncilProtocol::deliberate(self, question, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Script, ScriptedGateway, vote_json};
    use council_domain::{Verdict, Vote};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps the real synthesizer and counts calls
    struct CountingSynthesizer {
        inner: WeightedConsensus,
        calls: AtomicUsize,
    }

    impl CountingSynthesizer {
        fn new() -> Self {
            Self {
                inner: WeightedConsensus::new(0.66).unwrap(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ConsensusSynthesizer for CountingSynthesizer {
        fn synthesize(&self, opinions: Vec<Opinion>) -> DeliberationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.synthesize(opinions)
        }
    }

    fn config(models: &[&str]) -> CouncilConfig {
        CouncilConfig::default()
            .with_members(models.iter().map(|m| CouncilMember::advisor(*m)).collect())
            .with_member_timeout(Duration::from_secs(120))
    }

    #[tokio::test]
    async fn test_all_errors_skip_synthesis() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", Script::Fail("boom".to_string())),
            ("b", Script::Reply("not json".to_string())),
            ("c", Script::Reply(r#"{"vote": "perhaps"}"#.to_string())),
        ]));
        let synthesizer = Arc::new(CountingSynthesizer::new());
        let council = CouncilProtocol::new(gateway, &config(&["a", "b", "c"]))
            .unwrap()
            .with_synthesizer(synthesizer.clone());

        let result = council.deliberate("q", &DeliberationContext::new()).await;

        assert!(!result.consensus);
        assert_eq!(result.vote, Verdict::NoConsensus);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reasoning, "All council members failed to respond");
        assert!(result.opinions.is_empty());
        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_error_opinions_are_excluded() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", vote_json("approve", 0.9, "good")),
            ("b", vote_json("approve", 0.8, "fine")),
            ("c", Script::Fail("503".to_string())),
        ]));
        let synthesizer = Arc::new(CountingSynthesizer::new());
        let council = CouncilProtocol::new(gateway, &config(&["a", "b", "c"]))
            .unwrap()
            .with_synthesizer(synthesizer.clone());

        let result = council.deliberate("q", &DeliberationContext::new()).await;

        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.opinions.len(), 2);
        assert!(result.opinions.iter().all(|o| o.vote != Vote::Error));
        assert_eq!(result.vote, Verdict::Approve);
        assert!((result.confidence - 0.85).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_count_as_abstain_and_duration_is_recorded() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", Script::Hang),
            ("b", Script::Hang),
        ]));
        let council = CouncilProtocol::new(gateway, &config(&["a", "b"])).unwrap();

        let result = council.deliberate("q", &DeliberationContext::new()).await;

        assert_eq!(result.vote, Verdict::NoConsensus);
        assert!(result.reasoning.contains("abstained"));
        assert_eq!(result.opinions.len(), 2);
        assert!(result.duration >= Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_split_vote_has_no_consensus() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", vote_json("approve", 0.9, "yes")),
            ("b", vote_json("approve", 0.8, "yes")),
            ("chair", vote_json("reject", 0.7, "no")),
        ]));
        let config = CouncilConfig::default().with_members(vec![
            CouncilMember::advisor("a"),
            CouncilMember::advisor("b"),
            CouncilMember::new("chair", "Chairman").with_weight(1.5),
        ]);
        let council = CouncilProtocol::new(gateway, &config).unwrap();

        let result = council.deliberate("q", &DeliberationContext::new()).await;

        assert!(!result.consensus);
        assert_eq!(result.vote, Verdict::NoConsensus);
    }

    #[test]
    fn test_construction_without_members_fails() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let config = CouncilConfig::default().without_default_council();
        assert!(matches!(
            CouncilProtocol::new(gateway, &config),
            Err(CouncilError::NoMembers)
        ));
    }

    #[test]
    fn test_construction_falls_back_to_default_council() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let council = CouncilProtocol::new(gateway, &CouncilConfig::default()).unwrap();
        assert_eq!(council.members().len(), 4);
    }

    #[test]
    fn test_construction_rejects_bad_settings() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));

        let bad_threshold = CouncilConfig::default().with_consensus_threshold(1.5);
        assert!(matches!(
            CouncilProtocol::new(gateway.clone(), &bad_threshold),
            Err(CouncilError::Invalid(DomainError::InvalidConsensusThreshold(_)))
        ));

        let bad_member = CouncilConfig::default()
            .with_members(vec![CouncilMember::advisor("m").with_weight(0.0)]);
        assert!(matches!(
            CouncilProtocol::new(gateway.clone(), &bad_member),
            Err(CouncilError::Invalid(DomainError::InvalidMember(_)))
        ));

        let no_timeout = CouncilConfig::default().with_member_timeout(Duration::ZERO);
        assert!(matches!(
            CouncilProtocol::new(gateway, &no_timeout),
            Err(CouncilError::ZeroTimeout)
        ));
    }
}
