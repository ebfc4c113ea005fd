//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Output format for decisions and deliberations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for council-gate
#[derive(Parser, Debug)]
#[command(name = "council-gate")]
#[command(author, version, about = "Tiered approval gate - auto-approve, LLM council, or human sign-off")]
#[command(long_about = r#"
council-gate decides whether an action may proceed, routed by its dollar amount:

1. Autonomous: below auto_approve_usd, approved immediately
2. Council:    a weighted vote of LLM board members (deadlock escalates)
3. Human:      at or above human_required_usd, a person must answer
               APPROVE / REJECT before the timeout, or it is rejected

Configuration files are loaded from (in priority order):
1. COUNCIL_GATE_* environment variables (e.g. COUNCIL_GATE_GATEWAY__API_KEY)
2. --config <path>                             Explicit config file
3. ./council-gate.toml                         Project-level config
4. ~/.config/council-gate/config.toml          Global config

`decide` exits with 0 when approved, 2 when rejected, 1 on error.

Example:
  council-gate decide "Renew hosting plan" --amount 80
  council-gate decide "Launch ad campaign" --amount 750 --context channel=search
  council-gate deliberate "Should we open a second warehouse?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Route an action through the approval tiers
    Decide {
        /// What should be done
        action: String,

        /// Dollar amount at stake
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        amount: f64,

        /// Extra context for the council (repeatable)
        #[arg(short = 'c', long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
        context: Vec<(String, Value)>,

        /// Do not prompt for approval; requests are only logged and
        /// time out as rejected unless answered
        #[arg(long)]
        no_input: bool,
    },

    /// Ask the council a question without routing
    Deliberate {
        /// The question put to the council
        question: String,

        /// Extra context for the council (repeatable)
        #[arg(short = 'c', long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
        context: Vec<(String, Value)>,
    },

    /// Show configuration file locations and the effective configuration
    ShowConfig,
}

/// Parse `key=value`; the value is read as JSON when it parses, else as text
pub fn parse_context_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
