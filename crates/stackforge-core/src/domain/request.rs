//! Wire-level generation request and its normalizer.
//!
//! [`GenerateRequest`] mirrors the JSON/TOML document callers send. Every
//! field is optional on the wire (`#[serde(default)]`), and every enum-like
//! field is still a plain string here: typing happens in
//! [`crate::domain::validation`], after the rule engine has had its turn.

use serde::{Deserialize, Serialize};

use crate::domain::entities::model::DataModel;

/// Root name used when a new project is requested without one.
pub const PLACEHOLDER_ROOT_NAME: &str = "stackforge-app";

// ── Request ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub language: String,
    pub framework: String,
    pub architecture: String,
    pub services: Vec<ServiceSpec>,
    #[serde(alias = "database")]
    pub db: String,
    pub use_orm: bool,
    pub infra: InfraOptions,
    pub features: FeatureFlags,
    pub file_toggles: FileToggles,
    pub custom: CustomOverlay,
    pub root: RootOptions,
    pub service_communication: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    pub name: String,
    pub port: i64,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, port: i64) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfraOptions {
    /// Redis cache.
    #[serde(alias = "redis")]
    pub cache: bool,
    /// Kafka, the heavy message broker.
    #[serde(alias = "kafka")]
    pub broker: bool,
    /// NATS, the lightweight broker.
    #[serde(alias = "nats")]
    pub lightweight_broker: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub jwt_auth: bool,
    pub swagger: bool,
    pub github_actions_ci: bool,
    pub makefile: bool,
    pub logger: bool,
    pub global_error_handler: bool,
    pub health_endpoint: bool,
    pub sample_test: bool,
}

// ── File toggles ─────────────────────────────────────────────────────────────

/// Per-artifact tri-state switches. `None` means enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToggles {
    pub env: Option<bool>,
    pub gitignore: Option<bool>,
    pub dockerfile: Option<bool>,
    pub docker_compose: Option<bool>,
    pub readme: Option<bool>,
    pub config_loader: Option<bool>,
    pub logger: Option<bool>,
    pub base_route: Option<bool>,
    pub example_crud: Option<bool>,
    pub health_check: Option<bool>,
}

/// Names one entry of [`FileToggles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Env,
    Gitignore,
    Dockerfile,
    DockerCompose,
    Readme,
    ConfigLoader,
    Logger,
    BaseRoute,
    ExampleCrud,
    HealthCheck,
}

impl FileToggles {
    pub fn enabled(&self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Env => self.env,
            Toggle::Gitignore => self.gitignore,
            Toggle::Dockerfile => self.dockerfile,
            Toggle::DockerCompose => self.docker_compose,
            Toggle::Readme => self.readme,
            Toggle::ConfigLoader => self.config_loader,
            Toggle::Logger => self.logger,
            Toggle::BaseRoute => self.base_route,
            Toggle::ExampleCrud => self.example_crud,
            Toggle::HealthCheck => self.health_check,
        };
        flag.unwrap_or(true)
    }
}

// ── Custom overlay ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomOverlay {
    pub add_folders: Vec<String>,
    pub add_files: Vec<CustomFile>,
    pub models: Vec<DataModel>,
    pub add_service_names: Vec<String>,
    pub remove_folders: Vec<String>,
    pub remove_files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootOptions {
    pub mode: String,
    pub name: String,
    pub path: String,
    pub git_init: bool,
    pub module: String,
}

// ── Normalizer ───────────────────────────────────────────────────────────────

fn canonical(value: &str) -> String {
    value.trim().to_lowercase()
}

impl GenerateRequest {
    /// Canonicalize enum-like fields and fill the defaults.
    ///
    /// Pure and infallible: trims and lower-cases language, framework,
    /// architecture, database, root mode and service communication; empty
    /// database becomes `none`, empty root mode becomes `new`, and a new
    /// project without a name gets [`PLACEHOLDER_ROOT_NAME`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.language = canonical(&self.language);
        self.framework = canonical(&self.framework);
        self.architecture = canonical(&self.architecture);
        self.db = canonical(&self.db);
        self.root.mode = canonical(&self.root.mode);
        self.service_communication = canonical(&self.service_communication);

        if self.db.is_empty() {
            self.db = "none".into();
        }
        if self.root.mode.is_empty() {
            self.root.mode = "new".into();
        }
        if self.root.mode == "new" && self.root.name.trim().is_empty() {
            self.root.name = PLACEHOLDER_ROOT_NAME.into();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_canonicalizes_and_defaults() {
        let req = GenerateRequest {
            language: "  Go ".into(),
            framework: "FIBER".into(),
            architecture: " Clean".into(),
            service_communication: " gRPC ".into(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(req.language, "go");
        assert_eq!(req.framework, "fiber");
        assert_eq!(req.architecture, "clean");
        assert_eq!(req.db, "none");
        assert_eq!(req.root.mode, "new");
        assert_eq!(req.root.name, PLACEHOLDER_ROOT_NAME);
        assert_eq!(req.service_communication, "grpc");
    }

    #[test]
    fn normalizer_leaves_existing_root_unnamed() {
        let mut req = GenerateRequest::default();
        req.root.mode = "EXISTING".into();
        let req = req.normalized();
        assert_eq!(req.root.mode, "existing");
        assert!(req.root.name.is_empty());
    }

    #[test]
    fn toggles_default_to_enabled() {
        let toggles = FileToggles {
            readme: Some(false),
            ..Default::default()
        };
        assert!(toggles.enabled(Toggle::Env));
        assert!(!toggles.enabled(Toggle::Readme));
    }

    #[test]
    fn wire_aliases_are_accepted() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"language":"go","database":"mysql","infra":{"redis":true,"kafka":true,"nats":false}}"#,
        )
        .unwrap();
        assert_eq!(req.db, "mysql");
        assert!(req.infra.cache);
        assert!(req.infra.broker);
        assert!(!req.infra.lightweight_broker);
    }
}
