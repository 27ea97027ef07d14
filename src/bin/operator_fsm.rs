//! Console front end for the operator state machine.
//!
//! Reads commands from stdin, renders status and history on stdout and logs
//! to stderr. In JSON mode the operator menu goes to stderr too. The run ends
//! when the machine stops, stdin closes, or the optional step budget is used
//! up.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use operator_fsm::config::{ConfigOverrides, MachineConfig, ReportFormat};
use operator_fsm::effects::{
    JsonReporter, LineCommands, MonotonicClock, Reporter, RunOutcome, StateMachine, TextReporter,
};
use tracing::{info, Level};

/// Output format for status and history reports
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// Heartbeat-driven operator state machine
#[derive(Parser, Debug)]
#[command(name = "operator-fsm")]
#[command(about = "Drive the operator state machine from the console")]
#[command(version)]
struct Args {
    /// JSON config file; command-line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial delay between dispatch cycles in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Longest single sleep while waiting for a heartbeat, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Log level written to stderr
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn resolve_config(args: &Args) -> Result<MachineConfig> {
    let overrides = ConfigOverrides {
        delay_ms: args.delay_ms,
        poll_interval_ms: args.poll_interval_ms,
        max_steps: args.max_steps,
        report_format: args.format.map(ReportFormat::from),
    };

    MachineConfig::resolve(args.config.as_deref(), &overrides)
        .context("Failed to resolve configuration")
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let config = resolve_config(&args)?;
    info!(?config, "Configuration loaded");

    let clock = MonotonicClock::with_poll_interval(config.poll_interval());
    let prompt: Box<dyn Write> = if config.report_format.allows_inline_prompt() {
        Box::new(io::stdout())
    } else {
        Box::new(io::stderr())
    };
    let mut commands = LineCommands::new(io::stdin().lock(), prompt);
    let mut machine = StateMachine::from_config(&config);

    let mut reporter: Box<dyn Reporter> = match config.report_format {
        ReportFormat::Text => Box::new(TextReporter::new(io::stdout())),
        ReportFormat::Json => Box::new(JsonReporter::new(io::stdout())),
    };

    let outcome = machine
        .run(&clock, &mut commands, reporter.as_mut())
        .context("State machine run failed")?;

    match outcome {
        RunOutcome::Stopped => info!("Error limit reached, machine stopped"),
        RunOutcome::Halted => info!("Machine halted"),
        RunOutcome::InputClosed => info!("Input closed, exiting"),
        RunOutcome::StepLimit => info!(steps = machine.steps_taken(), "Step limit reached"),
    }

    Ok(())
}
