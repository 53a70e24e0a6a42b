/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Shared command-line driver for the filter binaries.

use crate::config::FilterConfig;
use crate::errors::{FilterError, check_api_version};
use crate::filter_context::FilterContext;
use crate::filters::{Filter, topdown_traverse};
use crate::readers;
use crate::writers;
use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about = "Pandoc JSON filter emitting LaTeX", long_about = None)]
pub struct Args {
    /// Output format pandoc is targeting
    #[arg(default_value = "latex")]
    pub format: String,

    /// Read the document from PATH instead of stdin
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Width of generated tabularx environments (overrides metadata)
    #[arg(long)]
    pub table_width: Option<String>,

    /// Column letter for default-aligned table columns (overrides metadata)
    #[arg(long)]
    pub default_column: Option<char>,
}

/// Log to stderr; stdout carries the document.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texfilter=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read a document, apply `filter`, and write the result.
///
/// Nothing is written unless the whole document was read, checked and
/// filtered successfully.
pub fn run_filter<R: Read, W: Write>(
    args: &Args,
    mut filter: Filter,
    input: &mut R,
    output: &mut W,
) -> Result<(), FilterError> {
    let value = readers::json::read_value(input)?;
    let version = readers::json::read_api_version(&value)?;
    check_api_version(&version)?;
    let doc = readers::json::read_pandoc(&value)?;

    let config = FilterConfig::from_meta(&doc.meta)?
        .with_overrides(args.table_width.clone(), args.default_column)?;
    tracing::debug!(
        format = %args.format,
        api_version = %version,
        table_width = %config.table_width,
        "running filter"
    );

    let mut ctx = FilterContext::new(args.format.clone(), config);
    let doc = topdown_traverse(doc, &mut filter, &mut ctx);
    ctx.diagnostics.log();

    writers::json::write(&doc, output)?;
    Ok(())
}

/// Entry point shared by the filter binaries.
pub fn main_with(name: &'static str, filter: Filter) -> Result<()> {
    let matches = Args::command().name(name).get_matches();
    let args = Args::from_arg_matches(&matches)?;

    init_logging();

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    match &args.input {
        Some(path) => {
            let mut file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run_filter(&args, filter, &mut file, &mut output)?;
        }
        None => {
            let stdin = std::io::stdin();
            run_filter(&args, filter, &mut stdin.lock(), &mut output)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pandoc_invocation() {
        let args = Args::try_parse_from(["table-to-tabularx", "latex"]).unwrap();
        assert_eq!(args.format, "latex");
        assert_eq!(args.input, None);
        assert_eq!(args.table_width, None);
    }

    #[test]
    fn test_format_defaults_to_latex() {
        let args = Args::try_parse_from(["heading-to-toc"]).unwrap();
        assert_eq!(args.format, "latex");
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "table-to-tabularx",
            "beamer",
            "--input",
            "doc.json",
            "--table-width",
            "16cm",
            "--default-column",
            "X",
        ])
        .unwrap();
        assert_eq!(args.format, "beamer");
        assert_eq!(args.input, Some(PathBuf::from("doc.json")));
        assert_eq!(args.table_width.as_deref(), Some("16cm"));
        assert_eq!(args.default_column, Some('X'));
    }

    #[test]
    fn test_default_column_must_be_one_character() {
        assert!(Args::try_parse_from(["t", "--default-column", "XL"]).is_err());
    }

    #[test]
    fn test_rejected_version_writes_nothing() {
        let args = Args::try_parse_from(["t"]).unwrap();
        let mut input = r#"{"pandoc-api-version":[1,20],"meta":{},"blocks":[]}"#.as_bytes();
        let mut output = Vec::new();
        let result = run_filter(&args, Filter::new(), &mut input, &mut output);
        assert!(matches!(result, Err(FilterError::UnsupportedApiVersion(_))));
        assert!(output.is_empty());
    }
}
