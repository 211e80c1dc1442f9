//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `STACKFORGE_<SECTION>__<KEY>`
//! 3. The file given with `--config`; otherwise `.stackforge.toml` in the
//!    working directory, then the user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stackforge_core::prelude::GenerateRequest;

use crate::{
    cli::Emit,
    error::{CliError, CliResult},
};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STACKFORGE";

/// Config file name used when no platform config directory exists.
pub const LOCAL_CONFIG_FILE: &str = ".stackforge.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values applied to requests that leave them empty.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Generation settings.
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `*.tmpl` files overriding the builtin templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Default for `generate --emit`.
    pub emit: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            emit: "script".into(),
        }
    }
}

/// Every key `config get` and `config set` accept.
pub const KEYS: &[&str] = &[
    "defaults.language",
    "defaults.framework",
    "defaults.architecture",
    "defaults.db",
    "output.no_color",
    "output.format",
    "templates.override_dir",
    "generation.emit",
];

impl AppConfig {
    /// Load configuration.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the user config file and a local `.stackforge.toml` are read if
    /// present, the local file winning.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).map_err(|e| CliError::config("invalid built-in defaults", e))?,
        );

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading explicit config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = Self::config_path();
                debug!(path = %path.display(), "loading user config file if present");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
                builder = builder.add_source(
                    File::from(Path::new(LOCAL_CONFIG_FILE))
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| CliError::config("failed to load configuration", e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stackforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stackforge", "stackforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The configured default emit mode, if it names one.
    pub fn default_emit(&self) -> CliResult<Emit> {
        <Emit as clap::ValueEnum>::from_str(&self.generation.emit, true).map_err(|_| {
            CliError::InvalidInput {
                message: format!(
                    "generation.emit must be one of script, powershell, json, paths (got '{}')",
                    self.generation.emit
                ),
                source: None,
            }
        })
    }

    /// Fill fields the request left empty from `[defaults]`.
    pub fn apply_defaults(&self, request: &mut GenerateRequest) {
        let fill = |field: &mut String, default: &Option<String>| {
            if field.trim().is_empty() {
                if let Some(value) = default {
                    field.clone_from(value);
                }
            }
        };
        fill(&mut request.language, &self.defaults.language);
        fill(&mut request.framework, &self.defaults.framework);
        fill(&mut request.architecture, &self.defaults.architecture);
        fill(&mut request.db, &self.defaults.db);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_emit_a_script() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_emit().unwrap(), Emit::Script);
        assert!(cfg.defaults.language.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nlanguage = \"go\"\nframework = \"fiber\"\n\n[generation]\nemit = \"paths\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.language.as_deref(), Some("go"));
        assert_eq!(cfg.defaults.framework.as_deref(), Some("fiber"));
        assert_eq!(cfg.default_emit().unwrap(), Emit::Paths);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/no/such/stackforge.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn unknown_emit_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.generation.emit = "zip".into();
        assert!(cfg.default_emit().is_err());
    }

    #[test]
    fn defaults_only_fill_empty_fields() {
        let mut cfg = AppConfig::default();
        cfg.defaults.language = Some("python".into());
        cfg.defaults.framework = Some("fastapi".into());
        cfg.defaults.db = Some("postgresql".into());

        let mut req = GenerateRequest {
            framework: "django".into(),
            ..Default::default()
        };
        cfg.apply_defaults(&mut req);
        assert_eq!(req.language, "python");
        assert_eq!(req.framework, "django");
        assert_eq!(req.db, "postgresql");
        assert!(req.architecture.is_empty());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }

    #[test]
    fn serialised_keys_match_known_keys() {
        let mut cfg = AppConfig::default();
        cfg.defaults.language = Some("go".into());
        cfg.defaults.framework = Some("gin".into());
        cfg.defaults.architecture = Some("mvp".into());
        cfg.defaults.db = Some("none".into());
        cfg.templates.override_dir = Some(PathBuf::from("tpl"));

        let value = toml::Value::try_from(&cfg).unwrap();
        for key in KEYS {
            let mut node = &value;
            for part in key.split('.') {
                node = node.get(part).unwrap_or_else(|| panic!("missing {key}"));
            }
        }
    }
}
