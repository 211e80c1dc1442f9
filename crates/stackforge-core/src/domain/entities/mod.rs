pub mod common;
pub mod diagnostics;
pub mod file_tree;
pub mod model;

pub use crate::domain::DomainError;
pub use diagnostics::{
    ComplexityReport, ComplexityWeights, Decision, RiskLevel, Severity, Warning, codes,
};
pub use file_tree::FileTree;
pub use model::{DataField, DataModel, ModelSet, ResolvedField, ResolvedModel};
