// ============================================================================
// domain/error.rs - request validation failures
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::{Language, RootMode};

/// Root domain error type.
///
/// Every variant is a rejected request: nothing is generated when one of
/// these is returned. All errors are:
/// - Cloneable (the CLI and tests inspect them after logging)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Enum membership
    // ========================================================================
    #[error("language must be one of: go, node, python")]
    InvalidLanguage { value: String },

    #[error(
        "framework is required for {language}. please specify a valid framework; defaults are explicitly not supported"
    )]
    MissingFramework { language: Language },

    #[error("unknown framework: {value}")]
    UnknownFramework { value: String },

    #[error("framework \"{framework}\" is not valid for {language}")]
    IncompatibleFramework { framework: String, language: Language },

    #[error("architecture must be one of: mvp, clean, hexagonal, modular-monolith, microservices")]
    InvalidArchitecture { value: String },

    #[error("db must be one of: postgresql, mysql, mongodb, none")]
    InvalidDatabase { value: String },

    #[error("service_communication must be one of: http, grpc")]
    InvalidServiceCommunication { value: String },

    // ========================================================================
    // Service list
    // ========================================================================
    #[error("microservices mode requires 2 to 5 services")]
    ServiceCount { count: usize },

    #[error("services[{index}].name is invalid")]
    InvalidServiceName { index: usize, name: String },

    #[error("duplicate service name \"{name}\"")]
    DuplicateServiceName { name: String },

    #[error("services[{index}].port must be a positive number")]
    InvalidServicePort { index: usize, port: i64 },

    // ========================================================================
    // Root and paths
    // ========================================================================
    #[error("root.mode must be either 'new' or 'existing'")]
    InvalidRootMode { value: String },

    #[error("root.{field} is required when root.mode is '{mode}'")]
    MissingRootField { field: &'static str, mode: RootMode },

    #[error("invalid {kind} \"{path}\": must be a relative path without '..'")]
    UnsafePath { kind: &'static str, path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLanguage { value } => vec![
                format!("'{value}' is not a supported language"),
                "Run: stackforge frameworks".into(),
            ],
            Self::MissingFramework { language } | Self::IncompatibleFramework { language, .. } => {
                vec![format!(
                    "Frameworks for {language}: {}",
                    crate::domain::capabilities::framework_names(*language)
                )]
            }
            Self::ServiceCount { count } => vec![
                format!("The request resolved to {count} service(s)"),
                "Set `services` or `custom.add_service_names` to between 2 and 5 entries".into(),
                "Or omit both to get the default users/orders pair".into(),
            ],
            Self::InvalidServiceName { name, .. } => vec![
                format!("'{name}' must start with a letter"),
                "Only letters, digits, '-' and '_' are allowed".into(),
            ],
            Self::DuplicateServiceName { .. } => {
                vec!["Service names are compared case-insensitively".into()]
            }
            Self::MissingRootField { field, .. } => {
                vec![format!("Set root.{field} in the request")]
            }
            Self::UnsafePath { .. } => vec![
                "Custom paths are relative to the project root".into(),
                "Remove any leading '/' and '..' segments".into(),
            ],
            _ => vec!["See `stackforge frameworks` for accepted values".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFramework { .. }
            | Self::UnknownFramework { .. }
            | Self::IncompatibleFramework { .. } => ErrorCategory::Compatibility,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
}
