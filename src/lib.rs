//! Column-role inference for survey-style tables.
//!
//! Given a header row and a handful of sample rows, [`classify_columns`]
//! decides which column holds free-text answers, which holds reasons, which
//! holds class labels and which holds person names:
//!
//! ```
//! use column_roles::{CellValue, Role, classify_columns};
//!
//! let headers = ["クラス", "名前"];
//! let rows = vec![
//!     vec![CellValue::from("1A"), CellValue::from("田中太郎")],
//!     vec![CellValue::from("2B"), CellValue::from("山田花子")],
//! ];
//! let result = classify_columns(&headers, &rows);
//! assert!(result.mapping.get(&Role::Answer).is_none());
//! ```
//!
//! The rest of the crate is the `column-roles` command-line front end.

pub mod assignment;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod ensemble;
pub mod features;
pub mod io_utils;
pub mod model;
pub mod report;
pub mod table;

pub use classifier::{ColumnClassifier, classify_columns};
pub use config::{AssignmentConfig, ClassifierConfig, ConfigError, EnsembleKind};
pub use model::{CellValue, ClassificationReport, ClassificationResult, Role};

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::cli::{Cli, Commands, InputArgs};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("column_roles", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Classify(args) => handle_classify(&args),
        Commands::Explain(args) => handle_explain(&args),
        Commands::Features(args) => handle_features(&args),
    }
}

fn handle_classify(args: &InputArgs) -> Result<()> {
    let report = explain_input(args)?;
    info!(
        "Assigned {} of {} role(s) across {} column(s)",
        report.result.mapping.len(),
        Role::ALL.len(),
        report.columns.len()
    );
    print!("{}", report::render_result(&report, args.format)?);
    Ok(())
}

fn handle_explain(args: &InputArgs) -> Result<()> {
    let report = explain_input(args)?;
    print!("{}", report::render_scores(&report, args.format)?);
    Ok(())
}

fn handle_features(args: &InputArgs) -> Result<()> {
    let report = explain_input(args)?;
    print!("{}", report::render_features(&report, args.format)?);
    Ok(())
}

fn load_config(args: &InputArgs) -> Result<ClassifierConfig> {
    let mut config = match &args.config {
        Some(path) => ClassifierConfig::load(path)
            .with_context(|| format!("Loading classifier config from {path:?}"))?,
        None => ClassifierConfig::default(),
    };
    if let Some(rows) = args.sample_rows {
        config.max_sample_rows = rows;
    }
    if let Some(strategy) = args.strategy {
        config.ensemble = strategy;
    }
    config.validate().context("Validating classifier config")?;
    debug!("Classifier config: {config:?}");
    Ok(config)
}

fn explain_input(args: &InputArgs) -> Result<ClassificationReport> {
    let classifier = ColumnClassifier::new(load_config(args)?);
    let max_rows = classifier.config().max_sample_rows;
    info!(
        "Sampling up to {} row(s) from '{}' with delimiter '{}'",
        max_rows,
        args.input.display(),
        printable_delimiter(io_utils::resolve_input_delimiter(
            &args.input,
            args.delimiter
        ))
    );
    let sample = io_utils::read_sample_from_path(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        max_rows,
    )
    .with_context(|| format!("Reading sample rows from {:?}", args.input))?;
    debug!(
        "Read {} header(s) and {} row(s)",
        sample.headers.len(),
        sample.rows.len()
    );
    Ok(classifier.explain(&sample.headers, &sample.rows))
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
