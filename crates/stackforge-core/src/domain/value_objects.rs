//! Domain value objects: Language, Framework, Architecture, Database,
//! RootMode, ServiceCommunication.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO capability logic. Which framework belongs to which language
//! lives in `capabilities.rs`. This file's only job is to define the types,
//! their wire representations, and their `FromStr` parsers.
//!
//! Parsers expect already-normalized input (trimmed, lower-cased). The
//! request normalizer guarantees that before validation runs.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a capability entry in `capabilities.rs` if it is a framework
//! 4. Teach the strategies in `application::strategy` what to emit for it

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// A target language the pipeline can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Node,
    Python,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::Go, Self::Node, Self::Python];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Node => "node",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "go" => Ok(Self::Go),
            "node" => Ok(Self::Node),
            "python" => Ok(Self::Python),
            other => Err(DomainError::InvalidLanguage {
                value: other.to_string(),
            }),
        }
    }
}

// ── Framework ────────────────────────────────────────────────────────────────

/// A web framework. Each belongs to exactly one [`Language`]; see
/// [`crate::domain::capabilities::FRAMEWORK_REGISTRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Gin,
    Fiber,
    Express,
    Fastify,
    FastApi,
    Django,
}

impl Framework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gin => "gin",
            Self::Fiber => "fiber",
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::FastApi => "fastapi",
            Self::Django => "django",
        }
    }

    /// The language this framework is written for.
    pub fn language(self) -> Language {
        crate::domain::capabilities::framework_language(self)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gin" => Ok(Self::Gin),
            "fiber" => Ok(Self::Fiber),
            "express" => Ok(Self::Express),
            "fastify" => Ok(Self::Fastify),
            "fastapi" => Ok(Self::FastApi),
            "django" => Ok(Self::Django),
            other => Err(DomainError::UnknownFramework {
                value: other.to_string(),
            }),
        }
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// The structural style of the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    Mvp,
    Clean,
    Hexagonal,
    ModularMonolith,
    Microservices,
}

impl Architecture {
    pub const ALL: [Architecture; 5] = [
        Self::Mvp,
        Self::Clean,
        Self::Hexagonal,
        Self::ModularMonolith,
        Self::Microservices,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mvp => "mvp",
            Self::Clean => "clean",
            Self::Hexagonal => "hexagonal",
            Self::ModularMonolith => "modular-monolith",
            Self::Microservices => "microservices",
        }
    }

    /// Directory segment used in template keys (`go/<segment>/main`).
    pub const fn template_dir(&self) -> &'static str {
        match self {
            Self::Mvp => "mvp",
            Self::Clean => "clean",
            Self::Hexagonal => "hexagonal",
            Self::ModularMonolith => "modular",
            Self::Microservices => "microservice",
        }
    }

    pub const fn is_microservices(&self) -> bool {
        matches!(self, Self::Microservices)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mvp" => Ok(Self::Mvp),
            "clean" => Ok(Self::Clean),
            "hexagonal" => Ok(Self::Hexagonal),
            "modular-monolith" => Ok(Self::ModularMonolith),
            "microservices" => Ok(Self::Microservices),
            other => Err(DomainError::InvalidArchitecture {
                value: other.to_string(),
            }),
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Postgresql,
    Mysql,
    Mongodb,
    None,
}

impl Database {
    pub const ALL: [Database; 4] = [Self::Postgresql, Self::Mysql, Self::Mongodb, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Mongodb => "mongodb",
            Self::None => "none",
        }
    }

    pub const fn is_sql(&self) -> bool {
        matches!(self, Self::Postgresql | Self::Mysql)
    }

    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Compose service hosting this database, if any.
    pub const fn compose_service(&self) -> Option<&'static str> {
        match self {
            Self::Postgresql => Some("postgres"),
            Self::Mysql => Some("mysql"),
            Self::Mongodb => Some("mongo"),
            Self::None => None,
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgresql" => Ok(Self::Postgresql),
            "mysql" => Ok(Self::Mysql),
            "mongodb" => Ok(Self::Mongodb),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidDatabase {
                value: other.to_string(),
            }),
        }
    }
}

// ── RootMode ─────────────────────────────────────────────────────────────────

/// Whether the script creates a fresh project or writes into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootMode {
    New,
    Existing,
}

impl RootMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Existing => "existing",
        }
    }
}

impl fmt::Display for RootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RootMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "existing" => Ok(Self::Existing),
            other => Err(DomainError::InvalidRootMode {
                value: other.to_string(),
            }),
        }
    }
}

// ── ServiceCommunication ─────────────────────────────────────────────────────

/// Transport between deployable units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCommunication {
    #[default]
    Http,
    Grpc,
}

impl ServiceCommunication {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Grpc => "grpc",
        }
    }

    pub const fn is_grpc(&self) -> bool {
        matches!(self, Self::Grpc)
    }
}

impl fmt::Display for ServiceCommunication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCommunication {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "http" => Ok(Self::Http),
            "grpc" => Ok(Self::Grpc),
            other => Err(DomainError::InvalidServiceCommunication {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips_through_display() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
        assert!("rust".parse::<Language>().is_err());
    }

    #[test]
    fn architecture_template_dirs() {
        assert_eq!(Architecture::ModularMonolith.template_dir(), "modular");
        assert_eq!(Architecture::Microservices.template_dir(), "microservice");
        assert_eq!(Architecture::Clean.template_dir(), "clean");
    }

    #[test]
    fn database_kinds() {
        assert!(Database::Postgresql.is_sql());
        assert!(Database::Mysql.is_sql());
        assert!(!Database::Mongodb.is_sql());
        assert!(!Database::None.is_some());
        assert_eq!(Database::Mongodb.compose_service(), Some("mongo"));
    }

    #[test]
    fn empty_communication_means_http() {
        assert_eq!(
            "".parse::<ServiceCommunication>().unwrap(),
            ServiceCommunication::Http
        );
        assert!("grpc".parse::<ServiceCommunication>().unwrap().is_grpc());
        assert!("amqp".parse::<ServiceCommunication>().is_err());
    }
}
