//! Progress reporting for council deliberations

use colored::Colorize;
use council_application::ports::progress::DeliberationProgress;
use council_domain::{CouncilMember, DeliberationResult, Opinion, Verdict, Vote};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with a bar that ticks as each member's opinion settles
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn vote_mark(vote: Vote) -> colored::ColoredString {
        match vote {
            Vote::Approve => "v".green(),
            Vote::Reject => "x".red(),
            Vote::Abstain => "-".yellow(),
            Vote::Error => "!".red(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliberationProgress for ProgressReporter {
    fn on_deliberation_start(&self, _question: &str, members: &[CouncilMember]) {
        let pb = ProgressBar::new(members.len() as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Council");
        pb.set_message("Collecting opinions...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_opinion(&self, opinion: &Opinion) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!(
                "{} {}",
                Self::vote_mark(opinion.vote),
                opinion.member.role()
            ));
            pb.inc(1);
        }
    }

    fn on_deliberation_complete(&self, result: &DeliberationResult) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let summary = match result.vote {
                Verdict::Approve => "approve".green(),
                Verdict::Reject => "reject".red(),
                Verdict::NoConsensus => "no consensus".yellow(),
            };
            pb.finish_with_message(format!("done: {}", summary));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliberationProgress for SimpleProgress {
    fn on_deliberation_start(&self, question: &str, members: &[CouncilMember]) {
        println!(
            "{} {} ({} members)",
            "->".cyan(),
            question.bold(),
            members.len()
        );
    }

    fn on_opinion(&self, opinion: &Opinion) {
        println!(
            "  {} {} {:.0}%",
            ProgressReporter::vote_mark(opinion.vote),
            opinion.member,
            opinion.confidence * 100.0
        );
    }

    fn on_deliberation_complete(&self, _result: &DeliberationResult) {
        println!();
    }
}
