//! Adapter errors.
//!
//! Everything here is an I/O or parse failure at the edge of the system.
//! Callers that want the core error type use the `From` conversion into
//! [`ForgeError`].

use std::{io, path::PathBuf};

use thiserror::Error;

use stackforge_core::{application::ApplicationError, error::ErrorCategory, prelude::ForgeError};

#[derive(Debug, Error)]
pub enum AdapterError {
    /// Reading a file or directory failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A request document could not be parsed.
    #[error("failed to parse {origin} as {format}: {reason}")]
    Parse {
        origin: String,
        format: &'static str,
        reason: String,
    },

    /// An override template could not be loaded or compiled.
    #[error("template {key} could not be loaded: {reason}")]
    TemplateLoad { key: String, reason: String },
}

impl AdapterError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Parse { .. } => ErrorCategory::Validation,
            Self::TemplateLoad { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Io { path, .. } => vec![format!("Check that {} exists and is readable", path.display())],
            Self::Parse { format, .. } => vec![
                format!("Check the {format} syntax of the request"),
                "Requests may be JSON (.json) or TOML (.toml)".into(),
            ],
            Self::TemplateLoad { key, .. } => vec![
                format!("Fix the syntax of override template '{key}'"),
                "Or remove it to fall back to the builtin template".into(),
            ],
        }
    }
}

impl From<AdapterError> for ForgeError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::TemplateLoad { key, reason } => ApplicationError::TemplateSource {
                source_name: key,
                reason,
            }
            .into(),
            AdapterError::Parse { .. } => ForgeError::configuration(err.to_string()),
            AdapterError::Io { .. } => ForgeError::internal(err.to_string()),
        }
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
