//! Request validation.
//!
//! [`DomainValidator::validate`] is the one gate between the wire-level
//! [`GenerateRequest`] and everything that generates files. It fails fast on
//! the first violation and, on success, hands back a [`Blueprint`] whose
//! enum-like fields are typed, so downstream code never re-parses strings.

use std::collections::HashSet;

use crate::domain::{
    capabilities,
    entities::{common::RelativePath, model::DataModel},
    error::DomainError,
    request::{FeatureFlags, FileToggles, GenerateRequest, InfraOptions, Toggle},
    value_objects::{Architecture, Database, Framework, Language, RootMode, ServiceCommunication},
};

pub const MIN_SERVICES: usize = 2;
pub const MAX_SERVICES: usize = 5;

// ── Blueprint ────────────────────────────────────────────────────────────────

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub language: Language,
    pub framework: Framework,
    pub architecture: Architecture,
    pub services: Vec<Service>,
    pub database: Database,
    pub use_orm: bool,
    pub infra: InfraOptions,
    pub features: FeatureFlags,
    pub toggles: FileToggles,
    pub custom: Overlay,
    pub models: Vec<DataModel>,
    pub root: RootTarget,
    pub communication: ServiceCommunication,
}

impl Blueprint {
    pub fn enabled(&self, toggle: Toggle) -> bool {
        self.toggles.enabled(toggle)
    }

    /// Whether per-model CRUD artifacts replace the placeholder endpoints.
    pub fn crud(&self) -> bool {
        self.enabled(Toggle::ExampleCrud)
    }
}

/// A microservice after validation: trimmed name, positive port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub port: u64,
}

/// Where the generated project lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTarget {
    pub mode: RootMode,
    pub name: String,
    pub path: String,
    pub git_init: bool,
    pub module: String,
}

impl RootTarget {
    /// Directory the generated script creates and enters.
    pub fn directory(&self) -> &str {
        match self.mode {
            RootMode::New => &self.name,
            RootMode::Existing => &self.path,
        }
    }

    pub fn is_new(&self) -> bool {
        self.mode == RootMode::New
    }
}

/// The user overlay with every path checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub add_folders: Vec<RelativePath>,
    pub add_files: Vec<(RelativePath, String)>,
    pub remove_folders: Vec<RelativePath>,
    pub remove_files: Vec<RelativePath>,
}

// ── Validator ────────────────────────────────────────────────────────────────

pub struct DomainValidator;

impl DomainValidator {
    /// Validate a normalized, rule-rewritten request.
    pub fn validate(req: &GenerateRequest) -> Result<Blueprint, DomainError> {
        let language: Language = req.language.parse()?;

        if req.framework.is_empty() {
            return Err(DomainError::MissingFramework { language });
        }
        let framework = req
            .framework
            .parse::<Framework>()
            .ok()
            .filter(|fw| capabilities::is_framework_valid_for(*fw, language))
            .ok_or_else(|| DomainError::IncompatibleFramework {
                framework: req.framework.clone(),
                language,
            })?;

        let architecture: Architecture = req.architecture.parse()?;
        let database: Database = req.db.parse()?;

        let services = if architecture.is_microservices() {
            Self::validate_services(req)?
        } else {
            Vec::new()
        };

        let root = Self::validate_root(req)?;
        let communication: ServiceCommunication = req.service_communication.parse()?;
        let custom = Self::validate_overlay(req)?;

        Ok(Blueprint {
            language,
            framework,
            architecture,
            services,
            database,
            use_orm: req.use_orm,
            infra: req.infra,
            features: req.features,
            toggles: req.file_toggles,
            custom,
            models: req.custom.models.clone(),
            root,
            communication,
        })
    }

    fn validate_services(req: &GenerateRequest) -> Result<Vec<Service>, DomainError> {
        let count = req.services.len();
        if !(MIN_SERVICES..=MAX_SERVICES).contains(&count) {
            return Err(DomainError::ServiceCount { count });
        }

        let mut seen = HashSet::with_capacity(count);
        req.services
            .iter()
            .enumerate()
            .map(|(index, svc)| {
                let name = svc.name.trim();
                if !is_identifier(name) {
                    return Err(DomainError::InvalidServiceName {
                        index,
                        name: name.to_string(),
                    });
                }
                if !seen.insert(name.to_lowercase()) {
                    return Err(DomainError::DuplicateServiceName {
                        name: name.to_string(),
                    });
                }
                let port = u64::try_from(svc.port)
                    .ok()
                    .filter(|p| *p > 0)
                    .ok_or(DomainError::InvalidServicePort {
                        index,
                        port: svc.port,
                    })?;
                Ok(Service {
                    name: name.to_string(),
                    port,
                })
            })
            .collect()
    }

    fn validate_root(req: &GenerateRequest) -> Result<RootTarget, DomainError> {
        let mode: RootMode = req.root.mode.parse()?;
        let name = req.root.name.trim();
        let path = req.root.path.trim();

        match mode {
            RootMode::New if name.is_empty() => {
                return Err(DomainError::MissingRootField { field: "name", mode });
            }
            RootMode::Existing if path.is_empty() => {
                return Err(DomainError::MissingRootField { field: "path", mode });
            }
            _ => {}
        }

        Ok(RootTarget {
            mode,
            name: name.to_string(),
            path: path.to_string(),
            git_init: req.root.git_init,
            module: req.root.module.trim().to_string(),
        })
    }

    fn validate_overlay(req: &GenerateRequest) -> Result<Overlay, DomainError> {
        let custom = &req.custom;
        let paths = |kind: &'static str, raw: &[String]| {
            raw.iter()
                .map(|p| RelativePath::try_new(kind, p))
                .collect::<Result<Vec<_>, _>>()
        };

        let add_folders = paths("add_folders path", &custom.add_folders)?;
        let add_files = custom
            .add_files
            .iter()
            .map(|f| Ok((RelativePath::try_new("add_files path", &f.path)?, f.content.clone())))
            .collect::<Result<Vec<_>, DomainError>>()?;
        let remove_folders = paths("remove_folders path", &custom.remove_folders)?;
        let remove_files = paths("remove_files path", &custom.remove_files)?;

        Ok(Overlay {
            add_folders,
            add_files,
            remove_folders,
            remove_files,
        })
    }
}

/// `^[a-zA-Z][a-zA-Z0-9_-]*$`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
