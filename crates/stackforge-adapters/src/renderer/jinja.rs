use std::path::Path;

use minijinja::{AutoEscape, Environment, ErrorKind};
use serde_json::Value;
use tracing::{debug, info, instrument};

use stackforge_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    error::ForgeResult,
};

use crate::{builtin_templates, error::AdapterError, template_loader::TemplateLoader};

/// Renders templates from a preloaded `minijinja` environment.
///
/// Templates are plain text, so auto-escaping is off. Block tags strip their
/// own line and a template's final newline is kept.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
    overrides: usize,
}

impl MiniJinjaRenderer {
    /// Renderer over the builtin template set.
    pub fn new() -> ForgeResult<Self> {
        let mut env = base_environment();
        for &(key, source) in builtin_templates::BUILTIN {
            env.add_template(key, source).map_err(|e| AdapterError::TemplateLoad {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        }
        debug!(count = builtin_templates::BUILTIN.len(), "builtin templates compiled");
        Ok(Self { env, overrides: 0 })
    }

    /// Builtin templates plus every `*.tmpl` under `dir`. An override with
    /// the same key as a builtin replaces it.
    ///
    /// # Errors
    ///
    /// Fails if `dir` cannot be read or any override does not compile. A
    /// broken override is never silently replaced by the builtin.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn with_overrides(dir: impl AsRef<Path>) -> ForgeResult<Self> {
        let mut renderer = Self::new()?;
        let sources = TemplateLoader::new(dir.as_ref()).load_all()?;

        for template in sources {
            let replaced = builtin_templates::get(&template.key).is_some();
            renderer
                .env
                .add_template_owned(template.key.clone(), template.source)
                .map_err(|e| AdapterError::TemplateLoad {
                    key: template.key.clone(),
                    reason: e.to_string(),
                })?;
            debug!(key = %template.key, replaced, "override template compiled");
            renderer.overrides += 1;
        }

        info!(count = renderer.overrides, "Loaded template overrides");
        Ok(renderer)
    }

    pub fn override_count(&self) -> usize {
        self.overrides
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, key: &str, bindings: &Value) -> ForgeResult<String> {
        let template = self.env.get_template(key).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => ApplicationError::TemplateNotFound {
                key: key.to_string(),
            },
            _ => ApplicationError::rendering(key, e),
        })?;

        template
            .render(bindings)
            .map_err(|e| ApplicationError::rendering(key, e).into())
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stackforge_core::error::ForgeError;
    use std::fs;
    use tempfile::TempDir;

    fn overrides(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    #[test]
    fn builtin_set_compiles() {
        let renderer = MiniJinjaRenderer::new().unwrap();
        assert_eq!(renderer.override_count(), 0);
    }

    #[test]
    fn missing_key_is_template_not_found() {
        let err = MiniJinjaRenderer::new()
            .unwrap()
            .render("cobol/mvp/main", &json!({}))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::TemplateNotFound { ref key }) if key == "cobol/mvp/main"
        ));
    }

    #[test]
    fn override_replaces_builtin() {
        let dir = overrides(&[("go/common/logger.tmpl", "package logger // {{ service }}\n")]);
        let renderer = MiniJinjaRenderer::with_overrides(dir.path()).unwrap();
        assert_eq!(renderer.override_count(), 1);

        let out = renderer
            .render("go/common/logger", &json!({ "service": "users" }))
            .unwrap();
        assert_eq!(out, "package logger // users\n");
    }

    #[test]
    fn block_tags_do_not_leave_blank_lines() {
        let dir = overrides(&[(
            "extra/list.tmpl",
            "start\n{% for m in models %}\n- {{ m }}\n{% endfor %}\nend\n",
        )]);
        let renderer = MiniJinjaRenderer::with_overrides(dir.path()).unwrap();
        let out = renderer
            .render("extra/list", &json!({ "models": ["user", "order"] }))
            .unwrap();
        assert_eq!(out, "start\n- user\n- order\nend\n");
    }

    #[test]
    fn output_is_not_html_escaped() {
        let dir = overrides(&[("extra/raw.tmpl", "{{ value }}")]);
        let renderer = MiniJinjaRenderer::with_overrides(dir.path()).unwrap();
        let out = renderer
            .render("extra/raw", &json!({ "value": "<a href=\"x\">&</a>" }))
            .unwrap();
        assert_eq!(out, "<a href=\"x\">&</a>");
    }

    #[test]
    fn broken_override_fails_construction() {
        let dir = overrides(&[("go/clean/main.tmpl", "{% if %}\n")]);
        let err = MiniJinjaRenderer::with_overrides(dir.path()).err().unwrap();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::TemplateSource { ref source_name, .. }) if source_name == "go/clean/main"
        ));
    }

    #[test]
    fn runtime_failure_is_rendering_failed() {
        let dir = overrides(&[("extra/bad.tmpl", "{{ no_such_function() }}\n")]);
        let renderer = MiniJinjaRenderer::with_overrides(dir.path()).unwrap();
        let err = renderer.render("extra/bad", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::RenderingFailed { ref key, .. }) if key == "extra/bad"
        ));
    }

    #[test]
    fn missing_override_dir_is_an_error() {
        assert!(MiniJinjaRenderer::with_overrides("/no/such/overrides").is_err());
    }
}
