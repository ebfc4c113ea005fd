//! CLI entrypoint for council-gate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    AuditLog, CompositeMetrics, CouncilPort, CouncilProtocol, DecisionCounters, DecisionRouter,
    HumanApprovalGate, InMemoryDecisionStore, MetricsSink, NoAuditLog, NotificationHub,
    PendingDecisionStore,
};
use council_domain::DeliberationContext;
use council_infrastructure::{
    ConfigLoader, FileConfig, JsonlAuditLog, OpenAiCompatibleGateway, PrometheusMetricsSink,
    TracingNotifier, start_prometheus_exporter,
};
use council_presentation::{
    Cli, Command, ConsoleApprovalNotifier, ConsoleFormatter, OutputFormat, ProgressReporter,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
/// Exit status for a decision that came back rejected
const EXIT_REJECTED: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting council-gate");

    config.validate().context("Invalid configuration")?;

    let status = match cli.command {
        Command::ShowConfig => {
            show_config(&config, cli.config.as_ref(), cli.no_config, cli.output);
            EXIT_OK
        }
        Command::Deliberate { question, context } => {
            run_deliberate(&config, &question, context, cli.output, cli.quiet).await?
        }
        Command::Decide {
            action,
            amount,
            context,
            no_input,
        } => {
            let options = DecideOptions {
                output: cli.output,
                quiet: cli.quiet,
                no_input,
            };
            run_decide(&config, &action, amount, context, options).await?
        }
    };

    // A console read may still be blocked on stdin after a timeout; exit
    // without waiting for it.
    drop(log_guard);
    std::process::exit(status);
}

/// Initialize logging based on verbosity level and the optional log file
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let Some(path) = file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("logging.file has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn build_council(
    config: &FileConfig,
    quiet: bool,
) -> Result<CouncilProtocol<OpenAiCompatibleGateway>> {
    let gateway = OpenAiCompatibleGateway::new(&config.gateway)
        .context("Cannot build the LLM gateway")?;
    let council = CouncilProtocol::new(Arc::new(gateway), &config.council_config())?;

    Ok(if quiet {
        council
    } else {
        council.with_progress(Arc::new(ProgressReporter::new()))
    })
}

fn build_audit_log(config: &FileConfig) -> Result<Arc<dyn AuditLog>> {
    match &config.logging.audit_file {
        Some(path) => match JsonlAuditLog::new(path) {
            Some(log) => {
                info!("Audit log: {}", log.path().display());
                Ok(Arc::new(log))
            }
            None => bail!("Cannot open audit log {}", path.display()),
        },
        None => Ok(Arc::new(NoAuditLog)),
    }
}

fn show_config(
    config: &FileConfig,
    config_path: Option<&PathBuf>,
    no_config: bool,
    output: OutputFormat,
) {
    match output {
        OutputFormat::Json => {
            let mut redacted = config.clone();
            if redacted.gateway.api_key.is_some() {
                redacted.gateway.api_key = Some("***".to_string());
            }
            println!("{}", ConsoleFormatter::format_json(&redacted));
        }
        OutputFormat::Text => {
            if no_config {
                println!("Configuration files disabled (--no-config); using defaults");
            } else {
                ConfigLoader::print_config_sources(config_path);
            }
            println!(
                "{}",
                ConsoleFormatter::format_config(&config.council_config(), &config.decision_config())
            );
            let key_state = if config.gateway.usable_api_key().is_some() {
                "set"
            } else {
                "missing"
            };
            println!("Gateway: {} (api key {})", config.gateway.base_url, key_state);
            if config.metrics.prometheus_enabled {
                println!("Prometheus: {}", config.metrics.listen_addr());
            }
        }
    }
}

async fn run_deliberate(
    config: &FileConfig,
    question: &str,
    context: Vec<(String, Value)>,
    output: OutputFormat,
    quiet: bool,
) -> Result<i32> {
    let council = build_council(config, quiet)?;
    let context: DeliberationContext = context.into_iter().collect();

    let result = council.deliberate(question, &context).await;

    match output {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&result)),
        OutputFormat::Text => println!("{}", ConsoleFormatter::format_deliberation(question, &result)),
    }
    Ok(EXIT_OK)
}

struct DecideOptions {
    output: OutputFormat,
    quiet: bool,
    no_input: bool,
}

async fn run_decide(
    config: &FileConfig,
    action: &str,
    amount: f64,
    context: Vec<(String, Value)>,
    options: DecideOptions,
) -> Result<i32> {
    // === Dependency Injection ===
    let decision_config = config.decision_config();
    let council: Arc<dyn CouncilPort> = Arc::new(build_council(config, options.quiet)?);
    let audit = build_audit_log(config)?;

    let counters = Arc::new(DecisionCounters::new());
    let mut sinks: Vec<Arc<dyn MetricsSink>> = Vec::new();
    sinks.push(counters.clone());
    if config.metrics.prometheus_enabled {
        start_prometheus_exporter(config.metrics.listen_addr())
            .context("Failed to start the Prometheus exporter")?;
        sinks.push(Arc::new(PrometheusMetricsSink::new()));
    }

    let console = (!options.no_input).then(|| Arc::new(ConsoleApprovalNotifier::new()));
    let notifier: Arc<dyn NotificationHub> = match &console {
        Some(console) => console.clone(),
        None => Arc::new(TracingNotifier::new()),
    };

    let store: Arc<dyn PendingDecisionStore> = Arc::new(InMemoryDecisionStore::new());
    let gate = Arc::new(
        HumanApprovalGate::new(store, notifier)
            .with_audit_log(Arc::clone(&audit))
            .with_max_timeout_hours(decision_config.max_approval_timeout_hours),
    );

    spawn_shutdown_watchers(&gate, console);

    let router = DecisionRouter::new(decision_config, council, Arc::clone(&gate))
        .with_metrics(Arc::new(CompositeMetrics::new(sinks)))
        .with_audit_log(audit);

    let context: DeliberationContext = context.into_iter().collect();
    let outcome = router.make_decision(action, amount, context).await;

    match options.output {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
        OutputFormat::Text => {
            println!("{}", ConsoleFormatter::format_outcome(action, amount, &outcome));
            if !options.quiet {
                println!("{}", ConsoleFormatter::format_metrics(&counters.snapshot()));
            }
        }
    }

    Ok(if outcome.approved {
        EXIT_OK
    } else {
        EXIT_REJECTED
    })
}

/// Resolve outstanding approvals as timed out on Ctrl-C or closed input
fn spawn_shutdown_watchers(
    gate: &Arc<HumanApprovalGate>,
    console: Option<Arc<ConsoleApprovalNotifier>>,
) {
    let on_signal = Arc::clone(gate);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; pending approvals will be rejected");
            on_signal.shutdown();
        }
    });

    if let Some(console) = console {
        let on_closed = Arc::clone(gate);
        tokio::spawn(async move {
            console.input_closed().await;
            warn!("Approval input closed; pending approvals will be rejected");
            on_closed.shutdown();
        });
    }
}
