//! Application services - orchestrate use cases.
//!
//! [`GenerationService`] runs the pipeline; the other modules are the
//! pieces it composes: the per-request context, marker injection, the user
//! overlay, diagnostic merging and script serialization.

pub mod context;
pub mod customizer;
pub mod generation_service;
pub mod injector;
pub mod metadata;
pub mod script;

pub use generation_service::{GenerateResponse, GenerationService};
