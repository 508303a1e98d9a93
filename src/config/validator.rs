use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, SchemaSettings, Settings};
use crate::domain::SchemaFormat;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_schema(&settings.schema) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_log(&settings.log) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_schema(schema: &SchemaSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(path) = &schema.path {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::MissingField("schema.path".to_string()));
            }

            // Files without an extension are read as JSON; a foreign extension
            // needs an explicit format so it is not silently misread.
            let extension = path.extension().and_then(|e| e.to_str());
            if schema.format.is_none() && extension.is_some() && SchemaFormat::from_path(path).is_none() {
                errors.push(ValidationError::InvalidValue {
                    field: "schema.path".to_string(),
                    reason: format!(
                        "cannot infer schema format from extension '{}'; set schema.format",
                        extension.unwrap_or_default()
                    ),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_log(log: &LogSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if log.level.trim().is_empty() {
            errors.push(ValidationError::MissingField("log.level".to_string()));
        } else if let Err(e) = EnvFilter::try_new(&log.level) {
            errors.push(ValidationError::InvalidValue {
                field: "log.level".to_string(),
                reason: e.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
