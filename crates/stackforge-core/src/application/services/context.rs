//! Request-scoped build state shared by the generation phases.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    application::{ports::TemplateRenderer, services::injector},
    domain::{
        Blueprint, Decision, FileTree, ModelSet, ResolvedModel, Severity, Warning,
        entities::codes, resolve_models,
    },
    error::ForgeResult,
};

// ── Deployable unit ──────────────────────────────────────────────────────────

/// One independently deployable tree: the monolith at the project root, or
/// one service under `services/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Path prefix, empty for the monolith.
    pub root: String,
    /// `app` for the monolith, the service name otherwise.
    pub name: String,
    pub port: u64,
    /// Go module path (ignored by the other languages).
    pub module: String,
    pub is_service: bool,
}

/// Port every monolith listens on.
pub const MONOLITH_PORT: u64 = 8080;

impl Unit {
    /// `rel` placed inside this unit.
    pub fn path(&self, rel: &str) -> String {
        if self.root.is_empty() {
            rel.to_string()
        } else {
            format!("{}/{rel}", self.root)
        }
    }
}

// ── Context ──────────────────────────────────────────────────────────────────

/// Everything one generation mutates. Created per call, never shared.
pub struct GenerationContext<'a> {
    pub blueprint: &'a Blueprint,
    pub tree: FileTree,
    renderer: &'a dyn TemplateRenderer,
    models: ModelSet,
    warnings: Vec<Warning>,
    decisions: Vec<Decision>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(blueprint: &'a Blueprint, renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            blueprint,
            tree: FileTree::new(),
            renderer,
            models: resolve_models(&blueprint.models),
            warnings: Vec::new(),
            decisions: Vec::new(),
        }
    }

    /// Resolved models; never empty.
    pub fn models(&self) -> &[ResolvedModel] {
        &self.models.models
    }

    pub fn placeholder_models(&self) -> bool {
        self.models.placeholder
    }

    /// Deployable units in service order.
    pub fn units(&self) -> Vec<Unit> {
        let bp = self.blueprint;
        if bp.architecture.is_microservices() {
            bp.services
                .iter()
                .map(|svc| Unit {
                    root: format!("services/{}", svc.name),
                    name: svc.name.clone(),
                    port: svc.port,
                    module: format!("stackforge/{}", svc.name),
                    is_service: true,
                })
                .collect()
        } else {
            vec![Unit {
                root: String::new(),
                name: "app".into(),
                port: MONOLITH_PORT,
                module: go_module(bp),
                is_service: false,
            }]
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, key: &str, bindings: &Value) -> ForgeResult<String> {
        debug!(key, "render template");
        self.renderer.render(key, bindings)
    }

    /// Render `key` and write it at `path`.
    pub fn render_to(&mut self, path: &str, key: &str, bindings: &Value) -> ForgeResult<()> {
        let body = self.render(key, bindings)?;
        self.tree.add_file(path, body);
        Ok(())
    }

    pub fn add_file(&mut self, path: &str, content: impl Into<String>) {
        self.tree.add_file(path, content);
    }

    // ── Diagnostics ──────────────────────────────────────────────────────

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn decide(&mut self, decision: Decision) {
        self.decisions.push(decision);
    }

    /// Inject `payload` into the file at `path` below `marker`.
    ///
    /// A missing file or marker leaves the tree alone and records an
    /// `INJECTION_MARKER_MISSING` warning. `unit` names the service in the
    /// warning message.
    pub fn inject(&mut self, path: &str, marker: &str, payload: &str, unit: &Unit) {
        let current = self.tree.get(path).unwrap_or_default().to_string();
        match injector::inject_by_marker(&current, marker, payload) {
            Ok(updated) => {
                if updated != current {
                    self.tree.replace(path, updated);
                }
            }
            Err(err) => {
                warn!(path, marker, "injection marker missing");
                let mut message = format!("Failed to inject dynamic {marker}");
                if unit.is_service {
                    message.push_str(&format!(" for service {}", unit.name));
                }
                self.warn(Warning::new(
                    codes::INJECTION_MARKER_MISSING,
                    Severity::Error,
                    message,
                    err.to_string(),
                ));
            }
        }
    }

    /// Hand the accumulated state to the caller.
    pub fn finish(self) -> (FileTree, Vec<Warning>, Vec<Decision>) {
        (self.tree, self.warnings, self.decisions)
    }
}

/// Fallback module when neither `root.module` nor `root.name` is set.
pub const DEFAULT_GO_MODULE: &str = "stackforge/app";

/// `root.module`, else the last segment of `root.name`, else the default.
pub fn go_module(bp: &Blueprint) -> String {
    let module = bp.root.module.trim();
    if !module.is_empty() {
        return module.to_string();
    }
    bp.root
        .name
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GO_MODULE)
        .to_string()
}
