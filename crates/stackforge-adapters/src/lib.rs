//! Infrastructure adapters for stackforge.
//!
//! Implements the `TemplateRenderer` port from `stackforge-core` and the
//! I/O at the edges of the pipeline: override templates on disk and request
//! documents from files or stdin.

pub mod builtin_templates;
pub mod error;
pub mod renderer;
pub mod request_source;
pub mod template_loader;

pub use error::{AdapterError, AdapterResult};
pub use renderer::MiniJinjaRenderer;
pub use template_loader::TemplateLoader;
