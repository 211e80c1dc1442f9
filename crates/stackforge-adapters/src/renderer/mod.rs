//! Template renderers.
//!
//! [`MiniJinjaRenderer`] is the only implementation of the core
//! `TemplateRenderer` port. It is built once, with the builtin template set
//! and any overrides compiled up front, and never mutated afterwards.

mod jinja;

pub use jinja::MiniJinjaRenderer;
