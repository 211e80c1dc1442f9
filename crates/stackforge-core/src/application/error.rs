//! Application layer errors.
//!
//! These errors represent failures while generating, not rejected requests.
//! Rejected requests are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during generation. Every one of them aborts the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The renderer has no template under this key.
    #[error("Template not found: {key}")]
    TemplateNotFound { key: String },

    /// The template exists but could not be rendered.
    #[error("Template rendering failed for {key}: {reason}")]
    RenderingFailed { key: String, reason: String },

    /// Templates could not be loaded from their source.
    #[error("Template source {source_name} could not be loaded: {reason}")]
    TemplateSource { source_name: String, reason: String },

    /// A generated artifact could not be serialized.
    #[error("Failed to serialize {artifact}: {reason}")]
    Serialization { artifact: &'static str, reason: String },
}

impl ApplicationError {
    pub fn rendering(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::RenderingFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { key } => vec![
                format!("No template is registered as '{key}'"),
                format!("Add {key}.tmpl to your template override directory"),
                "Or remove templates.override_dir from the config to use the builtin set".into(),
            ],
            Self::RenderingFailed { key, .. } => vec![
                format!("Check the syntax of template '{key}'"),
                "If it is an override, compare it with the builtin template".into(),
            ],
            Self::TemplateSource { source_name, .. } => vec![
                format!("Check that {source_name} exists and is readable"),
                "Try again once the directory is no longer being modified".into(),
            ],
            Self::Serialization { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Rendering,
            Self::TemplateSource { .. } => ErrorCategory::Configuration,
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }
}
