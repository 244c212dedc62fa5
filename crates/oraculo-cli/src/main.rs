//! Oraculo CLI
//!
//! Command-line shell for the principle-weighted decision engine.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate a situation with the seed weights
//! oraculo decide crisis_alimentos
//!
//! # Adjust weights first, explain the score, print JSON
//! oraculo decide uso_drones --feedback seguridad=0.2 --explain --format json
//!
//! # Interactive session on stdin
//! oraculo session --config oraculo.yaml
//!
//! # Validate a configuration file
//! oraculo config validate oraculo.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - 0: APPROVED (or command succeeded)
//! - 1: DENIED (or invalid config on `config validate`)
//! - 3: Error

mod render;
mod session;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use oraculo_core::{Decision, DecisionEngine, OraculoConfig};

const EXIT_APPROVED: u8 = 0;
const EXIT_DENIED: u8 = 1;
const EXIT_ERROR: u8 = 3;

/// Oraculo: principle-weighted decisions for fixed situations
#[derive(Parser)]
#[command(name = "oraculo")]
#[command(version)]
#[command(about = "Score situations against adjustable ethical principle weights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide on a situation
    Decide {
        /// Situation name (unknown names are DENIED with score 0)
        situation: String,

        /// Configuration file (YAML or JSON); seed data when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Principle weight to apply before deciding, as NAME=WEIGHT
        /// (can be specified multiple times, applied in order)
        #[arg(long, value_parser = parse_feedback)]
        feedback: Vec<(String, f64)>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show the per-principle score breakdown
        #[arg(long)]
        explain: bool,

        /// Explicit timestamp for the log entry (RFC 3339).
        /// Example: --evaluated-at 2025-12-20T00:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        evaluated_at: Option<DateTime<Utc>>,
    },

    /// List situations and their relevance factors
    Situations {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List principles and their weights
    Principles {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Interactive session reading commands from stdin
    Session {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        path: PathBuf,
    },

    /// Print the default configuration
    Default {
        #[arg(short, long, default_value = "yaml")]
        format: ConfigFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Yaml,
    Json,
}

/// Parse RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected RFC 3339 (e.g., 2025-12-20T00:00:00Z)", e))
}

/// Parse `NAME=WEIGHT`, with the weight constrained to [0.0, 1.0].
fn parse_feedback(s: &str) -> Result<(String, f64), String> {
    let (name, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid feedback '{}': expected NAME=WEIGHT", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid feedback '{}': missing principle name", s));
    }
    let weight = session::parse_weight(weight.trim())?;
    Ok((name.to_string(), weight))
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide {
            situation,
            config,
            feedback,
            format,
            explain,
            evaluated_at,
        } => decide_command(
            &situation,
            config,
            DecideOptions {
                feedback,
                format,
                explain,
                evaluated_at,
            },
        ),

        Commands::Situations { config } => {
            let engine = load_engine(config.as_deref())?;
            render::write_situations(&mut io::stdout().lock(), engine.catalog())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Principles { config } => {
            let engine = load_engine(config.as_deref())?;
            render::write_principles(&mut io::stdout().lock(), engine.list_principles())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Session { config } => {
            let mut engine = load_engine(config.as_deref())?;
            session::run_session(&mut engine, io::stdin().lock(), &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => validate_config(&path),
            ConfigAction::Default { format } => {
                let config = OraculoConfig::default();
                let text = match format {
                    ConfigFormat::Yaml => config.to_yaml()?,
                    ConfigFormat::Json => config.to_json()?,
                };
                println!("{}", text);
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

fn load_engine(config_path: Option<&Path>) -> Result<DecisionEngine> {
    let config = match config_path {
        Some(path) => OraculoConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => OraculoConfig::default(),
    };
    Ok(DecisionEngine::from_config(&config))
}

/// Options for a single `decide` invocation.
struct DecideOptions {
    feedback: Vec<(String, f64)>,
    format: OutputFormat,
    explain: bool,
    evaluated_at: Option<DateTime<Utc>>,
}

fn decide_command(
    situation: &str,
    config_path: Option<PathBuf>,
    options: DecideOptions,
) -> Result<ExitCode> {
    let mut engine = load_engine(config_path.as_deref())?;
    let decision = run_decide(
        &mut engine,
        situation,
        &options,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(ExitCode::from(decision_exit_code(decision)))
}

/// Apply feedback, decide, and render the outcome to `out`.
///
/// Unknown principles are reported on `err` and do not stop the decision.
fn run_decide<W: Write, E: Write>(
    engine: &mut DecisionEngine,
    situation: &str,
    options: &DecideOptions,
    out: &mut W,
    err: &mut E,
) -> Result<Decision> {
    for (principle, weight) in &options.feedback {
        if !engine.apply_feedback(principle, *weight) {
            writeln!(err, "Principle not found: {}", principle)?;
        }
    }

    let outcome = match options.evaluated_at {
        Some(timestamp) => engine.decide_at(situation, timestamp),
        None => engine.decide(situation),
    };
    let explanation = options.explain.then(|| engine.explain(situation));

    match options.format {
        OutputFormat::Json => {
            let mut value = serde_json::json!({
                "outcome": outcome,
                "log_entry": engine.log().last(),
            });
            if let Some(contributions) = &explanation {
                value["contributions"] = serde_json::to_value(contributions)?;
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Text => {
            render::write_outcome(out, &outcome, explanation.as_deref())?;
        }
    }

    Ok(outcome.decision)
}

fn decision_exit_code(decision: Decision) -> u8 {
    match decision {
        Decision::Approved => EXIT_APPROVED,
        Decision::Denied => EXIT_DENIED,
    }
}

fn validate_config(path: &Path) -> Result<ExitCode> {
    match OraculoConfig::from_file(path) {
        Ok(config) => {
            println!("Config is valid: {:?}", path);
            println!();
            println!("Principles: {}", config.principles.len());
            println!("Situations: {}", config.situations.len());
            if let Some(at) = config.determinism.evaluated_at {
                println!("Fixed evaluation time: {}", at.to_rfc3339());
            }
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Config validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feedback() {
        assert_eq!(parse_feedback("seguridad=0.2").unwrap(), ("seguridad".to_string(), 0.2));
        assert_eq!(parse_feedback(" vida_humana = 1 ").unwrap(), ("vida_humana".to_string(), 1.0));
        assert!(parse_feedback("seguridad").is_err());
        assert!(parse_feedback("=0.2").is_err());
        assert!(parse_feedback("seguridad=1.2").is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2025-12-20T10:00:00+00:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-12-20T10:00:00+00:00");
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_feedback() {
        let cli = Cli::try_parse_from([
            "oraculo",
            "decide",
            "uso_drones",
            "--feedback",
            "seguridad=0.1",
            "--feedback",
            "privacidad=0.0",
            "--explain",
        ])
        .unwrap();

        match cli.command {
            Commands::Decide { situation, feedback, explain, .. } => {
                assert_eq!(situation, "uso_drones");
                assert_eq!(feedback.len(), 2);
                assert_eq!(feedback[1], ("privacidad".to_string(), 0.0));
                assert!(explain);
            }
            _ => panic!("expected decide command"),
        }
    }

    #[test]
    fn test_load_engine_without_config_is_seeded() {
        let engine = load_engine(None).unwrap();
        assert_eq!(engine.list_situations().len(), 5);
        assert_eq!(engine.list_principles().len(), 5);
    }

    fn options(format: OutputFormat) -> DecideOptions {
        DecideOptions {
            feedback: Vec::new(),
            format,
            explain: false,
            evaluated_at: Some(parse_datetime("2025-12-20T10:00:00Z").unwrap()),
        }
    }

    fn decide_to_strings(situation: &str, options: &DecideOptions) -> (Decision, String, String) {
        let mut engine = load_engine(None).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let decision = run_decide(&mut engine, situation, options, &mut out, &mut err).unwrap();
        (
            decision,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_decide_approved_exits_zero() {
        let (decision, out, err) = decide_to_strings("crisis_alimentos", &options(OutputFormat::Text));
        assert_eq!(decision, Decision::Approved);
        assert_eq!(decision_exit_code(decision), 0);
        assert!(out.contains("APPROVED"));
        assert!(out.contains("1.935"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_decide_unknown_situation_exits_one() {
        let (decision, out, _) = decide_to_strings("no_existe", &options(OutputFormat::Text));
        assert_eq!(decision, Decision::Denied);
        assert_eq!(decision_exit_code(decision), 1);
        assert!(out.contains("DENIED"));
        assert!(out.contains("0.000"));
    }

    #[test]
    fn test_decide_reports_unknown_feedback_principle_and_still_decides() {
        let mut opts = options(OutputFormat::Text);
        opts.feedback = vec![
            ("honestidad".to_string(), 0.3),
            ("seguridad".to_string(), 0.0),
        ];
        let (decision, out, err) = decide_to_strings("corte_energia", &opts);

        assert_eq!(err, "Principle not found: honestidad\n");
        // 0.9 * 0.8 + 0.0 * 0.6
        assert_eq!(decision, Decision::Approved);
        assert!(out.contains("0.720"));
    }

    #[test]
    fn test_decide_json_shape() {
        let mut opts = options(OutputFormat::Json);
        let (_, out, _) = decide_to_strings("uso_drones", &opts);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["outcome"]["decision"], "APPROVED");
        assert_eq!(value["log_entry"]["situation"], "uso_drones");
        assert_eq!(value["log_entry"]["timestamp"], "2025-12-20T10:00:00Z");
        assert!(value.get("contributions").is_none());

        opts.explain = true;
        let (_, out, _) = decide_to_strings("uso_drones", &opts);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let contributions = value["contributions"].as_array().unwrap();
        assert_eq!(contributions.len(), 3);
        assert_eq!(contributions[0]["principle"], "privacidad");
    }

    #[test]
    fn test_load_engine_missing_config_is_error() {
        let path = std::env::temp_dir().join(format!("oraculo-cli-{}-missing.yaml", std::process::id()));
        let err = load_engine(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
