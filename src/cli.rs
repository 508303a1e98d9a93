use clap::Parser;
use std::path::PathBuf;

use crate::domain::{FieldKey, SchemaFormat};

/// Render a form from a field schema, validate the answers and print them
#[derive(Parser, Debug, Clone)]
#[command(name = "dynform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "DYNFORM_CONFIG", default_value = "dynform.toml")]
    pub config: PathBuf,

    /// Schema document to load (JSON, YAML or TOML)
    #[arg(short, long, env = "DYNFORM_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Schema format, overriding detection by file extension
    #[arg(long)]
    pub format: Option<SchemaFormat>,

    /// Set a field before submitting, e.g. `--set field0=abc` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(FieldKey, String)>,

    /// Prompt for each field on stdin, re-prompting invalid fields until the
    /// submission passes
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the submitted values as single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Log filter, e.g. `debug` or `dynform=trace`
    #[arg(long, env = "DYNFORM_LOG")]
    pub log_level: Option<String>,
}

fn parse_assignment(s: &str) -> Result<(FieldKey, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not KEY=VALUE", s))?;
    Ok((key.trim().parse()?, value.to_string()))
}
