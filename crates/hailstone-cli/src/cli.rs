//! Command-line interface for the hailstone utility
//!
//! Provides a CLI to generate Collatz-style sequences and render them as
//! ASCII charts with summary statistics.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::chart::{render_chart, ChartConfig, ChartScale, ChartStyle};
use crate::colorizer::colorize_chart;
use hailstone::core::logging::init_logging;
use hailstone::prelude::*;

/// Hailstone - Explore Collatz-style sequences in the terminal
#[derive(Parser)]
#[command(name = "hailstone")]
#[command(about = "A Rust utility to explore Collatz-style hailstone sequences")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sequence and render it with charts and statistics
    Run {
        /// Positive starting value
        #[arg(allow_negative_numbers = true)]
        start: i64,

        /// Maximum number of steps (0 for the default cap)
        #[arg(short, long, default_value_t = 0)]
        steps: usize,

        /// Custom rule expression for even values (uses 'n')
        #[arg(long, requires = "odd")]
        even: Option<String>,

        /// Custom rule expression for odd values (uses 'n')
        #[arg(long, requires = "even")]
        odd: Option<String>,

        /// Character set to use for chart rendering
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Also render a log10-scale chart
        #[arg(long)]
        log_chart: bool,

        /// Print the raw sequence values
        #[arg(long)]
        show_sequence: bool,

        /// Chart width in columns
        #[arg(long, default_value_t = 64)]
        width: usize,

        /// Chart height in rows
        #[arg(long, default_value_t = 16)]
        height: usize,

        /// Emit machine-readable JSON instead of charts
        #[arg(long)]
        json: bool,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print summary statistics for a sequence
    Stats {
        /// Positive starting value
        #[arg(allow_negative_numbers = true)]
        start: i64,

        /// Maximum number of steps (0 for the default cap)
        #[arg(short, long, default_value_t = 0)]
        steps: usize,

        /// Custom rule expression for even values (uses 'n')
        #[arg(long, requires = "odd")]
        even: Option<String>,

        /// Custom rule expression for odd values (uses 'n')
        #[arg(long, requires = "even")]
        odd: Option<String>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Validate custom rule expressions without generating
    Check {
        /// Rule expression for even values
        #[arg(long)]
        even: Option<String>,

        /// Rule expression for odd values
        #[arg(long)]
        odd: Option<String>,
    },

    /// Empirically verify convergence of the canonical rules over a range
    Verify {
        /// Check every starting value from 1 up to this limit
        #[arg(long, default_value_t = 10_000)]
        limit: i64,

        /// Maximum number of steps per start (0 for the default cap)
        #[arg(short, long, default_value_t = 0)]
        steps: usize,
    },
}

/// Supported chart character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for ChartStyle {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => ChartStyle::Ascii,
            StyleChoice::Unicode => ChartStyle::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct HailstoneApp;

impl HailstoneApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Initialize logging with CLI flags (environment variables take precedence)
        let log_level_str = std::env::var("HAILSTONE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("HAILSTONE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Hailstone v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Run {
                start,
                steps,
                even,
                odd,
                style,
                color,
                log_chart,
                show_sequence,
                width,
                height,
                json,
                output,
            } => self.run_command(
                start,
                steps,
                even,
                odd,
                style,
                color,
                log_chart,
                show_sequence,
                width,
                height,
                json,
                output,
                cli.verbose,
            ),
            Commands::Stats {
                start,
                steps,
                even,
                odd,
                json,
            } => self.stats_command(start, steps, even, odd, json),
            Commands::Check { even, odd } => self.check_command(even, odd),
            Commands::Verify { limit, steps } => self.verify_command(limit, steps, cli.verbose),
        }
    }

    /// Handle the run command
    #[allow(clippy::too_many_arguments)]
    fn run_command(
        &self,
        start: i64,
        steps: usize,
        even: Option<String>,
        odd: Option<String>,
        style: StyleChoice,
        color: ColorChoice,
        log_chart: bool,
        show_sequence: bool,
        width: usize,
        height: usize,
        json: bool,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let ruleset = build_ruleset(even, odd)?;
        debug!(start, steps, "Generating sequence");
        let sequence = generate_sequence(start, step_cap(steps), &ruleset)?;
        let stats = SequenceStats::of(&sequence);

        if verbose {
            eprintln!(
                "Generated {} values ({})",
                sequence.len(),
                sequence.termination()
            );
        }

        let text = if json {
            sequence_json(&sequence, &stats)?
        } else {
            let config = ChartConfig {
                width,
                height,
                style: style.into(),
                scale: ChartScale::Linear,
            };
            let report = run_report(&sequence, &stats, &config, log_chart, show_sequence);
            if self.should_colorize(&output, color) {
                colorize_chart(&report)
            } else {
                report
            }
        };

        self.write_output(output, &text)
    }

    /// Handle the stats command
    fn stats_command(
        &self,
        start: i64,
        steps: usize,
        even: Option<String>,
        odd: Option<String>,
        json: bool,
    ) -> Result<()> {
        let ruleset = build_ruleset(even, odd)?;
        let sequence = generate_sequence(start, step_cap(steps), &ruleset)?;
        let stats = SequenceStats::of(&sequence);

        if json {
            println!("{}", stats_json(&sequence, &stats)?);
        } else {
            println!("{}", stats);
            if !sequence.is_complete() {
                println!("Note: sequence truncated by the step cap");
            }
        }
        Ok(())
    }

    /// Handle the check command
    fn check_command(&self, even: Option<String>, odd: Option<String>) -> Result<()> {
        if even.is_none() && odd.is_none() {
            return Err(anyhow!("Nothing to check: pass --even and/or --odd"));
        }

        let mut failed = false;
        for (label, source) in [("even", even), ("odd", odd)] {
            if let Some(source) = source {
                match Rule::parse(&source) {
                    Ok(_) => println!("✓ Valid {} rule: {}", label, source),
                    Err(e) => {
                        println!("✗ Invalid {} rule: {}", label, e);
                        failed = true;
                    }
                }
            }
        }

        if failed {
            Err(anyhow!("Rule validation failed"))
        } else {
            Ok(())
        }
    }

    /// Handle the verify command
    fn verify_command(&self, limit: i64, steps: usize, verbose: bool) -> Result<()> {
        if limit < 1 {
            return Err(anyhow!("Limit must be at least 1"));
        }

        debug!(limit, "Starting convergence sweep");
        let mut longest = (1, 1usize);
        for start in 1..=limit {
            let sequence = generate_sequence(start, step_cap(steps), &Ruleset::Canonical)?;
            if sequence.termination() != Termination::ReachedOne {
                println!(
                    "✗ Start {} did not reach 1 within the cap ({})",
                    start,
                    sequence.termination()
                );
                return Err(anyhow!("Convergence check failed at start {}", start));
            }
            if sequence.len() > longest.1 {
                longest = (start, sequence.len());
            }
            if verbose && start % 1000 == 0 {
                eprintln!("Checked {} starts", start);
            }
        }

        println!("✓ All starts 1..={} reached 1", limit);
        println!(
            "Longest sequence: start {} with {} values",
            longest.0, longest.1
        );
        Ok(())
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                // Check NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // Only colorize if outputting to stdout and it's a terminal
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false, // Writing to file, no colors
                }
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    print!("{}", stdout_content);
                    io::stdout().flush()?;
                } else {
                    fs::write(&path, content).map_err(|e| {
                        anyhow!("Failed to write output file '{}': {}", path.display(), e)
                    })?;
                }
            }
            None => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for HailstoneApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the CLI steps argument to the generator's cap parameter
fn step_cap(steps: usize) -> Option<usize> {
    if steps == 0 {
        None
    } else {
        Some(steps)
    }
}

/// Build the active ruleset from optional CLI expressions
fn build_ruleset(even: Option<String>, odd: Option<String>) -> Result<Ruleset> {
    match (even, odd) {
        (Some(even), Some(odd)) => Ok(Ruleset::custom(&even, &odd)?),
        (None, None) => Ok(Ruleset::Canonical),
        // clap's `requires` enforces the pairing; direct callers get the
        // same contract
        _ => Err(anyhow!("--even and --odd must be given together")),
    }
}

/// Assemble the textual run report: charts, optional sequence dump, stats
fn run_report(
    sequence: &Sequence,
    stats: &SequenceStats,
    config: &ChartConfig,
    log_chart: bool,
    show_sequence: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Sequence from {} ({} values, {})\n\n",
        sequence.start(),
        sequence.len(),
        sequence.termination()
    ));

    out.push_str(&render_chart(sequence, config));

    if log_chart {
        let log_config = ChartConfig {
            scale: ChartScale::Log10,
            ..*config
        };
        out.push_str("\nLog10 scale:\n");
        out.push_str(&render_chart(sequence, &log_config));
    }

    if show_sequence {
        let values: Vec<String> = sequence.iter().map(|v| v.to_string()).collect();
        out.push_str(&format!("\nSequence: {}\n", values.join(", ")));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", stats));
    if !sequence.is_complete() {
        out.push_str("Note: sequence truncated by the step cap\n");
    }
    out
}

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::ReachedOne => "reached_one",
        Termination::Cycle => "cycle",
        Termination::CapExhausted => "cap_exhausted",
    }
}

fn ratio_json(stats: &SequenceStats) -> serde_json::Value {
    let ratio = stats.odd_even_ratio();
    if ratio.is_infinite() {
        serde_json::json!("inf")
    } else {
        serde_json::json!(ratio)
    }
}

/// JSON document for the run command
fn sequence_json(sequence: &Sequence, stats: &SequenceStats) -> Result<String> {
    let doc = serde_json::json!({
        "start": sequence.start(),
        "values": sequence.values(),
        "termination": termination_label(sequence.termination()),
        "complete": sequence.is_complete(),
        "stats": {
            "length": stats.length,
            "max_value": stats.max_value,
            "odd_count": stats.odd_count,
            "even_count": stats.even_count,
            "odd_even_ratio": ratio_json(stats),
        },
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// JSON document for the stats command
fn stats_json(sequence: &Sequence, stats: &SequenceStats) -> Result<String> {
    let doc = serde_json::json!({
        "start": sequence.start(),
        "termination": termination_label(sequence.termination()),
        "length": stats.length,
        "max_value": stats.max_value,
        "odd_count": stats.odd_count,
        "even_count": stats.even_count,
        "odd_even_ratio": ratio_json(stats),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
