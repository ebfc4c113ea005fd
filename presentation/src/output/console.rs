//! Console output formatter for decisions and deliberations

use colored::Colorize;
use council_application::{CouncilConfig, DecisionConfig, DecisionMetrics};
use council_domain::core::string::truncate;
use council_domain::{DecisionOutcome, DecisionTier, DeliberationResult, Opinion, Verdict, Vote};
use serde::Serialize;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the final routing answer
    pub fn format_outcome(action: &str, amount: f64, outcome: &DecisionOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Decision"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Action:".cyan().bold(), action));
        output.push_str(&format!("{} ${:.2}\n", "Amount:".cyan().bold(), amount));
        output.push_str(&format!(
            "{} {}\n\n",
            "Tier:".cyan().bold(),
            Self::tier_label(outcome.tier)
        ));

        if let Some(result) = &outcome.deliberation {
            output.push_str(&Self::format_opinions(result));
            output.push('\n');
        }

        let verdict = if outcome.approved {
            "APPROVED".green().bold()
        } else {
            "REJECTED".red().bold()
        };
        output.push_str(&format!("{} {}\n", verdict, outcome.reason));

        output.push_str(&Self::footer());
        output
    }

    /// Format a council round on its own
    pub fn format_deliberation(question: &str, result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Council Deliberation"));
        output.push('\n');
        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), question));
        output.push_str(&Self::format_opinions(result));

        output.push_str(&Self::section_header("Synthesis"));
        output.push_str(&format!(
            "\n{} {} ({:.0}% confidence, {:.1}s)\n\n",
            "Verdict:".bold(),
            Self::verdict_label(result.vote),
            result.confidence * 100.0,
            result.duration.as_secs_f64()
        ));
        output.push_str(&result.reasoning);
        output.push('\n');

        output.push_str(&Self::footer());
        output
    }

    fn format_opinions(result: &DeliberationResult) -> String {
        let mut output = Self::section_header("Council Opinions");
        for opinion in &result.opinions {
            output.push_str(&Self::format_opinion(opinion));
        }
        output
    }

    fn format_opinion(opinion: &Opinion) -> String {
        let title = format!(
            "── {} ({}) ──",
            opinion.member.role(),
            opinion.member.short_model_name()
        );
        let title = match opinion.vote {
            Vote::Approve => title.green().bold(),
            Vote::Reject => title.red().bold(),
            Vote::Abstain => title.yellow().bold(),
            Vote::Error => title.dimmed(),
        };
        format!(
            "\n{}\n{} {:.0}%  {}\n",
            title,
            opinion.vote.as_str().to_uppercase().bold(),
            opinion.confidence * 100.0,
            truncate(&opinion.reasoning, 200)
        )
    }

    /// Format the effective routing and council configuration
    pub fn format_config(council: &CouncilConfig, decision: &DecisionConfig) -> String {
        let mut output = String::new();
        let t = &decision.thresholds;

        output.push_str(&Self::section_header("Routing"));
        output.push_str(&format!(
            "  {:<12} amount < ${:.2}\n",
            "autonomous", t.auto_approve_usd
        ));
        output.push_str(&format!(
            "  {:<12} ${:.2} <= amount < ${:.2} (review marker ${:.2})\n",
            "council", t.auto_approve_usd, t.human_required_usd, t.council_review_usd
        ));
        output.push_str(&format!(
            "  {:<12} amount >= ${:.2}, wait {}h (max {}h)\n",
            "human",
            t.human_required_usd,
            decision.approval_timeout_hours,
            decision.max_approval_timeout_hours
        ));

        output.push_str(&Self::section_header("Council"));
        output.push_str(&format!(
            "  consensus {:.0}%, member timeout {}s\n",
            council.consensus_threshold * 100.0,
            council.member_timeout.as_secs()
        ));
        for member in council.effective_members() {
            output.push_str(&format!(
                "  {} {} x{}\n",
                "*".cyan(),
                member,
                member.weight()
            ));
        }

        output
    }

    /// Format the decision counters
    pub fn format_metrics(metrics: &DecisionMetrics) -> String {
        format!(
            "{} total {} | autonomous {} | council {} | human {}",
            "Decisions:".dimmed(),
            metrics.total,
            metrics.autonomous,
            metrics.council,
            metrics.human
        )
    }

    /// Format any serializable value as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn tier_label(tier: DecisionTier) -> String {
        format!("{} (level {})", tier.as_str(), tier.level())
    }

    fn verdict_label(verdict: Verdict) -> colored::ColoredString {
        match verdict {
            Verdict::Approve => "APPROVE".green().bold(),
            Verdict::Reject => "REJECT".red().bold(),
            Verdict::NoConsensus => "NO CONSENSUS".yellow().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::CouncilMember;
    use std::time::Duration;

    fn deliberation() -> DeliberationResult {
        DeliberationResult {
            consensus: true,
            vote: Verdict::Approve,
            confidence: 0.8,
            reasoning: "Council Vote: 2 approve, 0 reject, 0 abstain".to_string(),
            opinions: vec![
                Opinion::new(CouncilMember::new("a/risk", "Risk Analyst"), Vote::Approve, 0.8, "Low risk"),
                Opinion::timed_out(CouncilMember::new("b/cfo", "Finance Officer")),
            ],
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_format_outcome_mentions_verdict_and_reason() {
        colored::control::set_override(false);
        let outcome = DecisionOutcome::council_approved(deliberation());
        let text = ConsoleFormatter::format_outcome("Launch ads", 750.0, &outcome);

        assert!(text.contains("Launch ads"));
        assert!(text.contains("$750.00"));
        assert!(text.contains("council (level 2)"));
        assert!(text.contains("Risk Analyst (risk)"));
        assert!(text.contains("APPROVED Council approved (80% confidence)"));
    }

    #[test]
    fn test_format_deliberation() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_deliberation("Expand?", &deliberation());
        assert!(text.contains("Question: Expand?"));
        assert!(text.contains("Verdict: APPROVE (80% confidence, 1.5s)"));
        assert!(text.contains("Timeout - no response"));
    }

    #[test]
    fn test_format_config_lists_default_council() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_config(&CouncilConfig::default(), &DecisionConfig::default());
        assert!(text.contains("amount < $100.00"));
        assert!(text.contains("amount >= $2000.00, wait 24h (max 24h)"));
        assert!(text.contains("Chairman (x-ai/grok-3) x1.5"));
    }

    #[test]
    fn test_format_json_outcome() {
        let json = ConsoleFormatter::format_json(&DecisionOutcome::autonomous());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["approved"], true);
        assert_eq!(value["tier"], "autonomous");
    }
}
