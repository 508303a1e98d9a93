use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{FormDefinition, SchemaFormat, SchemaParseError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: SchemaParseError,
    },
}

/// Reads schema documents from disk.
///
/// The format comes from the explicit override if one is set, otherwise from
/// the file extension, falling back to JSON.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    format: Option<SchemaFormat>,
}

impl SchemaLoader {
    pub fn new(format: Option<SchemaFormat>) -> Self {
        Self { format }
    }

    pub fn format_for(&self, path: &Path) -> SchemaFormat {
        self.format.or_else(|| SchemaFormat::from_path(path)).unwrap_or_else(|| {
            debug!(path = %path.display(), "No recognized schema extension, reading as JSON");
            SchemaFormat::Json
        })
    }

    pub fn load(&self, path: &Path) -> Result<FormDefinition, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = self.format_for(path);
        let definition = FormDefinition::parse(&content, format).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), %format, fields = definition.len(), "Schema read");
        Ok(definition)
    }
}
