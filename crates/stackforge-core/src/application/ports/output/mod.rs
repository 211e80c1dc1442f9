//! Driven (output) ports - implemented by infrastructure.
//!
//! The `stackforge-adapters` crate provides implementations.

use serde_json::Value;

use crate::error::ForgeResult;

/// Port for template rendering.
///
/// Implemented by:
/// - `stackforge_adapters::renderer::MiniJinjaRenderer` (builtin set plus overrides)
///
/// ## Contract
///
/// - `key` is a slash separated template name such as `go/clean/main`
/// - `bindings` is always a JSON object
/// - an unknown key is `ApplicationError::TemplateNotFound`
/// - any error is fatal to the generation that asked for it
///
/// Implementations hold an immutable, preloaded template set so one
/// renderer can serve concurrent generations.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, key: &str, bindings: &Value) -> ForgeResult<String>;
}
