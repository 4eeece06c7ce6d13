//! Command line access to the deposit metadata converters and validator
//!
//! Usage:
//!   deposit-metadata convert metadata.json
//!   deposit-metadata deconvert form.json --save
//!   deposit-metadata roundtrip metadata.json
//!   deposit-metadata validate-field form.json --field 'contributors[0].ids[0].value'

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use deposit_core::{DepositSettings, DropdownLists, ErrorTree, ExternalMetadata, FormMetadata};
use deposit_service::{
    AsyncFieldValidator, DeconvertMode, DropdownListLoader, ReqwestHttpClient, ValidationProps,
    metadata_converter, metadata_deconverter,
};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deposit-metadata")]
#[command(about = "Convert and validate deposit metadata documents", long_about = None)]
struct Args {
    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory with the dropdown list resources; overrides the settings
    #[arg(short, long, global = true)]
    lists: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an external metadata document into the form document
    Convert {
        /// External metadata (JSON)
        input: PathBuf,
    },
    /// Convert a form document back into an external metadata document
    Deconvert {
        /// Form metadata (JSON)
        input: PathBuf,
        /// Deconvert for a draft save instead of a submission
        #[arg(long)]
        save: bool,
    },
    /// Convert and deconvert, reporting whether the document survives
    Roundtrip {
        /// External metadata (JSON)
        input: PathBuf,
        /// Deconvert for a draft save instead of a submission
        #[arg(long)]
        save: bool,
    },
    /// Run the async validation for one blurred field
    ValidateField {
        /// Form metadata (JSON)
        input: PathBuf,
        /// Blurred field, e.g. `contributors[0].ids[0].value`
        #[arg(short, long)]
        field: String,
        /// Errors from earlier validations (JSON)
        #[arg(long)]
        errors: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => DepositSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => DepositSettings::from_env(),
    };
    if let Some(dir) = &args.lists {
        settings.dropdown_dir.clone_from(dir);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let lists = DropdownListLoader::new(&settings.dropdown_dir).load_all().await;

    match args.command {
        Command::Convert { input } => {
            let external: ExternalMetadata = read_json(&input)?;
            let converted = metadata_converter(&external, &lists)?;
            report_issues(&converted.issues)?;
            print_json(&converted.form)?;
        }
        Command::Deconvert { input, save } => {
            let form: FormMetadata = read_json(&input)?;
            let external = metadata_deconverter(&form, &lists, DeconvertMode::from_submit(!save))?;
            print_json(&external)?;
        }
        Command::Roundtrip { input, save } => {
            roundtrip(&input, &lists, DeconvertMode::from_submit(!save))?;
        }
        Command::ValidateField { input, field, errors } => {
            let form: FormMetadata = read_json(&input)?;
            let previous: ErrorTree = match errors {
                Some(path) => read_json(&path)?,
                None => ErrorTree::Empty,
            };
            let client = ReqwestHttpClient::new(&settings.orcid)?;
            let validator = AsyncFieldValidator::new(Arc::new(client));
            let props = ValidationProps {
                async_errors: &previous,
                dropdown_lists: &lists,
            };

            match validator.validate(&form, props, Some(&field)).await {
                Ok(tree) => {
                    eprintln!("{} {field}", "✓".green());
                    print_json(&tree)?;
                }
                Err(rejection) => {
                    eprintln!("{} {field}: {rejection}", "✗".red());
                    print_json(rejection.tree())?;
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn roundtrip(input: &Path, lists: &DropdownLists, mode: DeconvertMode) -> Result<()> {
    let external: ExternalMetadata = read_json(input)?;
    let converted = metadata_converter(&external, lists)?;
    report_issues(&converted.issues)?;
    let back = metadata_deconverter(&converted.form, lists, mode)?;

    if back == external {
        eprintln!("{} {} survives conversion", "✓".green(), input.display());
        return Ok(());
    }

    let expected = serde_json::to_value(&external)?;
    let actual = serde_json::to_value(&back)?;
    if let (Some(expected), Some(actual)) = (expected.as_object(), actual.as_object()) {
        let mut keys: Vec<&String> = expected.keys().chain(actual.keys()).collect();
        keys.sort();
        keys.dedup();
        for key in keys {
            if expected.get(key) != actual.get(key) {
                eprintln!("  {} {key}", "≠".yellow());
            }
        }
    }
    bail!("{} does not survive conversion", input.display())
}

fn report_issues(issues: &ErrorTree) -> Result<()> {
    if !issues.is_empty() {
        eprintln!("{}", "unresolved controlled values:".yellow());
        eprintln!("{}", serde_json::to_string_pretty(issues)?);
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
