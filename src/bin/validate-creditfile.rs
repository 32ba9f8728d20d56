use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use cra_normalizer::domain::CreditFile;
use cra_normalizer::validate;

/// Validate a CreditFile JSON file: schema conformance plus referential
/// integrity, reporting every finding.
#[derive(Parser, Debug)]
#[command(name = "validate-creditfile", version, about = "Validate CreditFile JSON")]
struct Cli {
    /// Path to the CreditFile JSON file to validate
    path: PathBuf,

    /// Only run the schema pass
    #[arg(long)]
    schema_only: bool,

    /// Only run the referential-integrity pass
    #[arg(long)]
    referential_only: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let data = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let credit_file: CreditFile = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON in {}", args.path.display()))?;

    let mut findings = Vec::new();
    if !args.referential_only {
        findings.extend(validate::schema::validate(&credit_file));
    }
    if !args.schema_only {
        findings.extend(validate::referential::validate(&credit_file));
    }

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
