use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use cra_normalizer::config::NormalizerConfig;
use cra_normalizer::domain::CreditFile;
use cra_normalizer::engine::NormalizationEngine;
use cra_normalizer::logging::init_logging;
use cra_normalizer::raw::RawExtractedData;
use cra_normalizer::validate;

#[derive(Parser)]
#[command(name = "cra_normalizer")]
#[command(about = "Normalize raw CRA report extractions into a CreditFile")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw extraction JSON file into a CreditFile
    Normalize {
        /// Path to the raw extraction JSON
        input: PathBuf,
        /// Optional TOML config (default subject id, currency code)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the CreditFile JSON (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Run schema and referential-integrity validation on the result
        #[arg(long)]
        validate: bool,
    },
    /// Validate an existing CreditFile JSON file
    Validate {
        /// Path to the CreditFile JSON
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let _log_guard = init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            input,
            config,
            output,
            validate,
        } => run_normalize(input, config, output, validate),
        Commands::Validate { input } => run_validate(input),
    }
}

fn run_normalize(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    run_validators: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => NormalizerConfig::from_path(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => NormalizerConfig::default(),
    };

    let data = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let raw: RawExtractedData = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse raw extraction JSON in {}", input.display()))?;

    let result = NormalizationEngine::new().normalize(&raw, &config, None);

    for warning in &result.warnings {
        info!(domain = %warning.domain, field = %warning.field, "{}", warning.message);
    }
    for err in &result.errors {
        error!(domain = %err.domain, field = %err.field, "{}", err.message);
    }
    for (kind, count) in &result.summary {
        info!(?kind, count, "entities normalized");
    }

    let credit_file = result
        .credit_file
        .context("engine returned no credit file")?;

    let mut validation_failed = false;
    if run_validators {
        let findings = run_both_validators(&credit_file);
        validation_failed = !findings.is_empty();
        for finding in &findings {
            error!("{finding}");
        }
    }

    let serialized = serde_json::to_string_pretty(&credit_file)?;
    match output {
        Some(path) => fs::write(&path, serialized)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{serialized}"),
    }

    if !result.success || validation_failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_validate(input: PathBuf) -> Result<()> {
    let data = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let credit_file: CreditFile = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse CreditFile JSON in {}", input.display()))?;

    let findings = run_both_validators(&credit_file);
    if findings.is_empty() {
        println!("valid");
        Ok(())
    } else {
        eprintln!("invalid:");
        for finding in findings {
            eprintln!("- {finding}");
        }
        std::process::exit(1)
    }
}

fn run_both_validators(credit_file: &CreditFile) -> Vec<validate::ValidationError> {
    let mut findings = validate::schema::validate(credit_file);
    findings.extend(validate::referential::validate(credit_file));
    findings
}
