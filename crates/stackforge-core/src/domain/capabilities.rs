//! Framework capability registry.
//!
//! Each framework is described exactly once by its [`FrameworkDef`]. The
//! validator, the CLI listing and the strategies all derive their view of
//! "which framework belongs to which language" from [`FRAMEWORK_REGISTRY`].
//!
//! # Adding a New Framework
//!
//! 1. Add a variant to `Framework` in `value_objects.rs`
//! 2. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]
//! 3. Teach the owning language strategy what to emit for it

use crate::domain::value_objects::{Framework, Language};

// ── Framework definitions ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FrameworkDef {
    /// The framework variant this entry describes.
    pub framework: Framework,

    /// The language it is written for.
    pub language: Language,

    /// One-line description shown by `stackforge frameworks`.
    pub summary: &'static str,
}

/// Single source of truth for framework capabilities.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    FrameworkDef {
        framework: Framework::Gin,
        language: Language::Go,
        summary: "Gin HTTP web framework",
    },
    FrameworkDef {
        framework: Framework::Fiber,
        language: Language::Go,
        summary: "Fiber, Express-inspired framework on fasthttp",
    },
    FrameworkDef {
        framework: Framework::Express,
        language: Language::Node,
        summary: "Express minimal web framework",
    },
    FrameworkDef {
        framework: Framework::Fastify,
        language: Language::Node,
        summary: "Fastify low-overhead web framework",
    },
    FrameworkDef {
        framework: Framework::FastApi,
        language: Language::Python,
        summary: "FastAPI with pydantic models",
    },
    FrameworkDef {
        framework: Framework::Django,
        language: Language::Python,
        summary: "Django with Django REST framework",
    },
];

// ── Queries ──────────────────────────────────────────────────────────────────

/// Language that owns `framework`.
pub fn framework_language(framework: Framework) -> Language {
    FRAMEWORK_REGISTRY
        .iter()
        .find(|def| def.framework == framework)
        .map(|def| def.language)
        // every variant has an entry; see the registry_is_complete test
        .unwrap_or(Language::Go)
}

/// All frameworks registered for `language`, in registry order.
pub fn frameworks_for(language: Language) -> impl Iterator<Item = &'static FrameworkDef> {
    FRAMEWORK_REGISTRY
        .iter()
        .filter(move |def| def.language == language)
}

pub fn is_framework_valid_for(framework: Framework, language: Language) -> bool {
    frameworks_for(language).any(|def| def.framework == framework)
}

/// Comma separated framework names for `language`, used in error hints.
pub fn framework_names(language: Language) -> String {
    frameworks_for(language)
        .map(|def| def.framework.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_complete() {
        for fw in [
            Framework::Gin,
            Framework::Fiber,
            Framework::Express,
            Framework::Fastify,
            Framework::FastApi,
            Framework::Django,
        ] {
            assert!(
                FRAMEWORK_REGISTRY.iter().any(|d| d.framework == fw),
                "{fw} missing from registry"
            );
        }
    }

    #[test]
    fn frameworks_belong_to_one_language() {
        assert_eq!(framework_language(Framework::Fiber), Language::Go);
        assert_eq!(framework_language(Framework::Fastify), Language::Node);
        assert_eq!(framework_language(Framework::Django), Language::Python);
        assert!(is_framework_valid_for(Framework::Gin, Language::Go));
        assert!(!is_framework_valid_for(Framework::Gin, Language::Python));
    }

    #[test]
    fn names_for_hints() {
        assert_eq!(framework_names(Language::Node), "express, fastify");
    }
}
