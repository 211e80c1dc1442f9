//! stackforge Core - the generation pipeline.
//!
//! This crate turns a declarative project request into a virtual file tree
//! and a shell script that recreates it, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackforge-cli (CLI)           │
//! │      (calls GenerationService)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (GenerationService, Strategy phases,   │
//! │   injector, customizer, script)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │          (TemplateRenderer)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackforge-adapters (Infrastructure) │
//! │  (MiniJinjaRenderer, request_source)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (GenerateRequest, rules, Blueprint,    │
//! │   complexity, FileTree, models)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stackforge_core::prelude::*;
//!
//! # fn demo(renderer: Box<dyn TemplateRenderer>) -> ForgeResult<()> {
//! let service = GenerationService::new(renderer);
//! let response = service.generate(GenerateRequest {
//!     language: "go".into(),
//!     framework: "gin".into(),
//!     architecture: "clean".into(),
//!     ..Default::default()
//! })?;
//! println!("{}", response.bash_script);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, GenerateResponse, GenerationService, ports::TemplateRenderer,
    };
    pub use crate::domain::{
        Architecture, ComplexityReport, Database, Decision, Framework, GenerateRequest, Language,
        RiskLevel, Severity, Warning,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
