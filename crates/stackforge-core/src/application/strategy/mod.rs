//! Per-language generation strategies.
//!
//! Every target language implements [`LanguageStrategy`]: four phases that
//! run in a fixed order over one [`GenerationContext`], plus the init
//! command placed in the script and the configuration warnings attached
//! before the phases run. Dispatch goes through the closed [`Strategy`]
//! enum, so adding a language is a compile error until every match is
//! updated.

pub mod go;
pub mod node;
pub mod python;
pub mod shared;

use crate::{
    application::services::{context::GenerationContext, script::Shell},
    domain::{Blueprint, Language, Warning},
    error::ForgeResult,
};

pub use go::GoStrategy;
pub use node::NodeStrategy;
pub use python::PythonStrategy;

/// One target language.
pub trait LanguageStrategy {
    /// Entry points, placeholder endpoints, manifests and cross-cutting
    /// helpers for every deployable unit.
    fn generate_architecture(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()>;

    /// Persistence scaffolding, one artifact set per resolved model, and the
    /// marker injection that wires those artifacts into the entry points.
    fn generate_models(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()>;

    /// Cache and broker stubs, environment files, container descriptors and
    /// the compose file.
    fn generate_infra(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()>;

    /// Ignore file, readme, CI, task file and API doc stub.
    fn generate_dev_tools(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()>;

    /// Language initialization command for a new project, newline terminated.
    fn init_command(&self, blueprint: &Blueprint, shell: Shell) -> String;

    /// Dependency setup for a new project, run once every file is on disk.
    fn setup_command(&self, _blueprint: &Blueprint, _shell: Shell) -> String {
        String::new()
    }

    /// Warnings that depend only on the blueprint.
    fn config_warnings(&self, _blueprint: &Blueprint) -> Vec<Warning> {
        Vec::new()
    }
}

/// Closed set of strategies, one per [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Go(GoStrategy),
    Node(NodeStrategy),
    Python(PythonStrategy),
}

impl Strategy {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Go => Self::Go(GoStrategy),
            Language::Node => Self::Node(NodeStrategy),
            Language::Python => Self::Python(PythonStrategy),
        }
    }

    fn inner(&self) -> &dyn LanguageStrategy {
        match self {
            Self::Go(s) => s,
            Self::Node(s) => s,
            Self::Python(s) => s,
        }
    }
}

impl LanguageStrategy for Strategy {
    fn generate_architecture(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        self.inner().generate_architecture(ctx)
    }

    fn generate_models(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        self.inner().generate_models(ctx)
    }

    fn generate_infra(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        self.inner().generate_infra(ctx)
    }

    fn generate_dev_tools(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        self.inner().generate_dev_tools(ctx)
    }

    fn init_command(&self, blueprint: &Blueprint, shell: Shell) -> String {
        self.inner().init_command(blueprint, shell)
    }

    fn setup_command(&self, blueprint: &Blueprint, shell: Shell) -> String {
        self.inner().setup_command(blueprint, shell)
    }

    fn config_warnings(&self, blueprint: &Blueprint) -> Vec<Warning> {
        self.inner().config_warnings(blueprint)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by the strategy tests.

    use serde_json::Value;

    use crate::{
        application::ports::TemplateRenderer,
        domain::{Blueprint, DomainValidator, GenerateRequest, rules::apply_rules},
        error::ForgeResult,
    };

    /// Renders every key as a small file naming the key. Entry points get
    /// both markers so injection succeeds.
    pub struct KeyEcho;

    impl TemplateRenderer for KeyEcho {
        fn render(&self, key: &str, bindings: &Value) -> ForgeResult<String> {
            let model = bindings
                .get("model")
                .and_then(|m| m.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("-");
            if key.ends_with("/main") {
                let c = if key.starts_with("python/") { "#" } else { "//" };
                Ok(format!("{key}\n{c} marker:imports\n{c} marker:routes\n"))
            } else {
                Ok(format!("{key} {model}\n"))
            }
        }
    }

    pub fn blueprint(edit: impl FnOnce(&mut GenerateRequest)) -> Blueprint {
        let mut req = GenerateRequest::default();
        edit(&mut req);
        let (req, _) = apply_rules(req.normalized());
        DomainValidator::validate(&req).unwrap()
    }
}
