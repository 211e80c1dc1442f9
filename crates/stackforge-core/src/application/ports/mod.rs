//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackforge-adapters` implement
//! these.
//!
//! - **Driven (Output) Ports**: called by the pipeline, implemented by
//!   infrastructure
//!   - `TemplateRenderer`: boilerplate text by key
//! - **Driving (Input) Ports**: `GenerationService` is called directly by the
//!   CLI; no trait is needed while it has one implementation.

pub mod output;

pub use output::TemplateRenderer;

#[cfg(test)]
pub use output::MockTemplateRenderer;
