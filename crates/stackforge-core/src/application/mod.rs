//! Application layer for stackforge.
//!
//! This layer contains:
//! - **Services**: pipeline orchestration (`GenerationService`) and its steps
//! - **Strategy**: one generator per target language
//! - **Ports**: the template renderer the pipeline depends on
//! - **Errors**: generation failures
//!
//! Request rules and validation live in `crate::domain`; this layer only
//! sequences them and turns a `Blueprint` into files.

pub mod error;
pub mod ports;
pub mod services;
pub mod strategy;

pub use services::{GenerateResponse, GenerationService};

// Re-export port traits (for adapter implementation)
pub use ports::TemplateRenderer;

pub use error::ApplicationError;
