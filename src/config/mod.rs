use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validator;

use crate::cli::Cli;
use crate::domain::SchemaFormat;

/// Settings of the `dynform` binary.
///
/// Precedence, lowest first: built-in defaults, the config file,
/// `DYNFORM__*` environment variables (e.g. `DYNFORM__OUTPUT__PRETTY=false`),
/// command-line flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub schema: SchemaSettings,
    pub output: OutputSettings,
    pub input: InputSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaSettings {
    /// Schema document to load
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Explicit format; detected from the extension when absent
    #[serde(default)]
    pub format: Option<SchemaFormat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputSettings {
    pub interactive: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    pub level: String,
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validated()
    }

    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        Self::load(path)?.validated()
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("output.pretty", true)?
            .set_default("input.interactive", false)?
            .set_default("log.level", "info")?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("DYNFORM").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn validated(self) -> Result<Self, anyhow::Error> {
        validator::SettingsValidator::validate(&self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!("Configuration validation failed:\n{}", error_messages.join("\n"))
        })?;
        Ok(self)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.schema {
            self.schema.path = Some(path.clone());
        }
        if let Some(format) = cli.format {
            self.schema.format = Some(format);
        }
        if cli.interactive {
            self.input.interactive = true;
        }
        if cli.compact {
            self.output.pretty = false;
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
    }
}
