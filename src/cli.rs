use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::EnsembleKind;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Find the answer, reason, class and name columns of a survey sheet",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assign roles to columns and print the mapping with confidences
    Classify(InputArgs),
    /// Print every column's per-role score breakdown
    Explain(InputArgs),
    /// Print the numeric feature vector of every column
    Features(InputArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of data rows to sample (defaults to the config value, 10)
    #[arg(long = "sample-rows")]
    pub sample_rows: Option<usize>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file overriding classifier thresholds
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Ensemble formula combining the per-scorer signals
    #[arg(long, value_enum)]
    pub strategy: Option<EnsembleKind>,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_single_ascii() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("、").is_err());
    }

    #[test]
    fn classify_args_parse_with_overrides() {
        let cli = Cli::try_parse_from([
            "column-roles",
            "classify",
            "-i",
            "survey.csv",
            "--sample-rows",
            "5",
            "--strategy",
            "stream-average",
            "--format",
            "json",
        ])
        .expect("parse args");
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.sample_rows, Some(5));
        assert_eq!(args.strategy, Some(EnsembleKind::StreamAverage));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.delimiter, None);
    }
}
