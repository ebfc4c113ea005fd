//! Weighted consensus synthesis
//!
//! Turns the usable opinions of one round into a [`DeliberationResult`].
//! Weight is `member.weight × confidence`, so a heavier member (the
//! Chairman) can swing the ratio on its own.

use super::deliberation::{DeliberationResult, Verdict};
use super::opinion::{Opinion, Vote};
use crate::core::error::DomainError;
use crate::core::string::excerpt;

/// Reasoning used when every usable opinion abstained.
pub const ALL_ABSTAINED_REASONING: &str = "All council members abstained.";

/// Characters of member reasoning quoted in the synthesis text.
const REASONING_EXCERPT_CHARS: usize = 100;

/// Aggregates usable opinions into a verdict
pub trait ConsensusSynthesizer: Send + Sync {
    /// Caller guarantees `opinions` contains no error votes.
    fn synthesize(&self, opinions: Vec<Opinion>) -> DeliberationResult;
}

/// Approve/reject tally for one round
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedTally {
    pub approve_weight: f64,
    pub reject_weight: f64,
    /// Sum of member weights over approve and reject votes
    pub total_weight: f64,
    pub approve_count: usize,
    pub reject_count: usize,
    pub abstain_count: usize,
}

impl WeightedTally {
    pub fn from_opinions(opinions: &[Opinion]) -> Self {
        opinions.iter().fold(Self::default(), |mut tally, opinion| {
            match opinion.vote {
                Vote::Approve => {
                    tally.approve_weight += opinion.weighted_confidence();
                    tally.total_weight += opinion.member.weight();
                    tally.approve_count += 1;
                }
                Vote::Reject => {
                    tally.reject_weight += opinion.weighted_confidence();
                    tally.total_weight += opinion.member.weight();
                    tally.reject_count += 1;
                }
                Vote::Abstain => tally.abstain_count += 1,
                Vote::Error => {}
            }
            tally
        })
    }

    /// `approve_weight / total_weight`, or `None` when nobody voted
    pub fn approve_ratio(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.approve_weight / self.total_weight)
    }
}

/// Super-majority by weighted confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedConsensus {
    threshold: f64,
}

impl WeightedConsensus {
    /// Threshold must lie in (0, 1]
    pub fn new(threshold: f64) -> Result<Self, DomainError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DomainError::InvalidConsensusThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Verdict and confidence for a given approve ratio
    pub fn decide(&self, approve_ratio: f64) -> (bool, Verdict, f64) {
        let reject_ratio = 1.0 - approve_ratio;
        if approve_ratio >= self.threshold {
            (true, Verdict::Approve, approve_ratio)
        } else if reject_ratio >= self.threshold {
            (true, Verdict::Reject, reject_ratio)
        } else {
            (false, Verdict::NoConsensus, approve_ratio.max(reject_ratio))
        }
    }
}

impl ConsensusSynthesizer for WeightedConsensus {
    fn synthesize(&self, opinions: Vec<Opinion>) -> DeliberationResult {
        let tally = WeightedTally::from_opinions(&opinions);

        let Some(approve_ratio) = tally.approve_ratio() else {
            let mut result = DeliberationResult::no_consensus(0.0, ALL_ABSTAINED_REASONING);
            result.opinions = opinions;
            return result;
        };

        let (consensus, vote, confidence) = self.decide(approve_ratio);
        let reasoning = synthesis_text(&opinions, &tally, vote, approve_ratio);

        DeliberationResult {
            consensus,
            vote,
            confidence,
            reasoning,
            opinions,
            duration: std::time::Duration::ZERO,
        }
    }
}

/// Human-readable summary of a round
fn synthesis_text(
    opinions: &[Opinion],
    tally: &WeightedTally,
    vote: Verdict,
    approve_ratio: f64,
) -> String {
    let mut lines = vec![
        format!(
            "Council Vote: {} approve, {} reject, {} abstain",
            tally.approve_count, tally.reject_count, tally.abstain_count
        ),
        format!("Weighted approval: {:.0}%", approve_ratio * 100.0),
        format!("Decision: {}", vote.as_str().to_uppercase()),
        String::new(),
        "Key considerations:".to_string(),
    ];

    for opinion in opinions.iter().filter(|o| o.vote.is_decisive()) {
        lines.push(format!(
            "- {}: {}...",
            opinion.member.role(),
            excerpt(&opinion.reasoning, REASONING_EXCERPT_CHARS)
        ));
    }

    lines.join("\n")
}
