//! Unified error handling for stackforge core.
//!
//! Wraps domain and application errors in one type, with user-actionable
//! suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for stackforge core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// The request was rejected; nothing was generated.
    #[error("Invalid request: {0}")]
    Domain(#[from] DomainError),

    /// Generation started but could not finish.
    #[error("Generation failed: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ForgeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run: stackforge config path, then check the file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in stackforge".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Generation is deterministic, so the only failures worth retrying are
    /// the ones caused by outside state (a template directory being edited).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::TemplateSource { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Rendering,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ForgeResult<T>;

    /// Add lazily built context to an error.
    fn with_context<F, S>(self, f: F) -> ForgeResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: impl Into<String>) -> ForgeResult<T> {
        self.map_err(|e| ForgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }

    fn with_context<F, S>(self, f: F) -> ForgeResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| ForgeError::Internal {
            message: format!("{}: {}", f().into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_category() {
        let err: ForgeError = DomainError::ServiceCount { count: 7 }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("2 to 5 services"));
    }

    #[test]
    fn missing_template_is_not_found() {
        let err: ForgeError = ApplicationError::TemplateNotFound {
            key: "go/clean/main".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("go/clean/main")));
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), String> = Err("boom".into());
        let err = res.context("loading").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("loading: boom"));

        let res: Result<(), &str> = Err("late");
        let err = res.with_context(|| format!("step {}", 2)).unwrap_err();
        assert!(err.to_string().contains("step 2: late"));
    }
}
