//! Diagnostic records attached to a successful generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable machine-readable codes. Warnings and decisions dedup on these.
pub mod codes {
    pub const INJECTION_MARKER_MISSING: &str = "INJECTION_MARKER_MISSING";
    pub const DUPLICATE_CUSTOM_FILE: &str = "DUPLICATE_CUSTOM_FILE";
    pub const DJANGO_BUILTIN_ORM: &str = "DJANGO_BUILTIN_ORM";

    pub const DEFAULT_SERVICES_INJECTED: &str = "DEFAULT_SERVICES_INJECTED";
    pub const DYNAMIC_SERVICES_MAPPED: &str = "DYNAMIC_SERVICES_MAPPED";
    pub const ORM_DISABLED_NO_DATABASE: &str = "ORM_DISABLED_NO_DATABASE";
    pub const MODEL_PLACEHOLDER_SUBSTITUTED: &str = "MODEL_PLACEHOLDER_SUBSTITUTED";
}

// ── Warning ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Sort rank; higher is more severe.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal anomaly surfaced alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub reason: String,
}

impl Warning {
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            reason: reason.into(),
        }
    }
}

// ── Decision ─────────────────────────────────────────────────────────────────

/// Record of an automatic rewrite applied to the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub code: String,
    pub description: String,
    pub triggered_by: String,
}

impl Decision {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        triggered_by: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            triggered_by: triggered_by.into(),
        }
    }
}

// ── Complexity ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityWeights {
    pub architecture: u32,
    pub database: u32,
    pub infrastructure: u32,
    pub services: u32,
    pub models: u32,
}

impl ComplexityWeights {
    pub const fn total(&self) -> u32 {
        self.architecture + self.database + self.infrastructure + self.services + self.models
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub score: u32,
    pub weights: ComplexityWeights,
    pub risk_level: RiskLevel,
    pub notes: Vec<String>,
}
