// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for stackforge.
//!
//! Pure request handling: normalization, rule rewriting, validation, model
//! resolution, complexity scoring and the virtual file tree. Templating and
//! I/O are behind ports defined in the application layer.
//!
//! ## Rules of the layer
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network or process access
//! - **Pure functions**: every operation here is deterministic in its input
//! - **Typed after validation**: strings stop at [`validation::Blueprint`]

pub mod capabilities;
pub mod complexity;
pub mod entities;
pub mod error;
pub mod request;
pub mod rules;
pub mod validation;
pub mod value_objects;

pub use entities::{
    common::RelativePath,
    diagnostics::{ComplexityReport, ComplexityWeights, Decision, RiskLevel, Severity, Warning},
    file_tree::FileTree,
    model::{DataField, DataModel, ModelSet, ResolvedField, ResolvedModel, resolve_models},
};

pub use error::{DomainError, ErrorCategory};

pub use request::{
    CustomFile, CustomOverlay, FeatureFlags, FileToggles, GenerateRequest, InfraOptions,
    RootOptions, ServiceSpec, Toggle,
};

pub use validation::{Blueprint, DomainValidator, Overlay, RootTarget, Service};

pub use value_objects::{
    Architecture, Database, Framework, Language, RootMode, ServiceCommunication,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            language: " Python ".into(),
            framework: "FastAPI".into(),
            architecture: "microservices".into(),
            use_orm: true,
            ..Default::default()
        }
    }

    // ========================================================================
    // Normalize → rules → validate
    // ========================================================================

    #[test]
    fn front_half_of_pipeline_composes() {
        let (req, decisions) = rules::apply_rules(request().normalized());
        let blueprint = DomainValidator::validate(&req).unwrap();

        assert_eq!(blueprint.language, Language::Python);
        assert_eq!(blueprint.framework, Framework::FastApi);
        assert_eq!(blueprint.services.len(), 2);
        assert_eq!(blueprint.services[0].name, "users");
        assert_eq!(blueprint.services[1].port, 8082);
        assert!(!blueprint.use_orm);

        let codes: Vec<_> = decisions.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                entities::codes::DEFAULT_SERVICES_INJECTED,
                entities::codes::ORM_DISABLED_NO_DATABASE
            ]
        );
    }

    #[test]
    fn rules_run_before_validation() {
        // Without the default-services rule this would fail the 2..=5 check.
        let (req, _) = rules::apply_rules(request().normalized());
        assert!(DomainValidator::validate(&req).is_ok());
        assert!(DomainValidator::validate(&request().normalized()).is_err());
    }

    #[test]
    fn analysis_runs_on_rewritten_request() {
        let (req, _) = rules::apply_rules(request().normalized());
        let report = complexity::analyze(&req);
        assert_eq!(report.weights.architecture, 40);
        assert_eq!(report.weights.services, 0);
    }
}
