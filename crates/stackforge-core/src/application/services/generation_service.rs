//! Generation Service - the pipeline orchestrator.
//!
//! One call runs the whole pipeline:
//! 1. Normalize the request and apply the rewrite rules
//! 2. Validate into a [`Blueprint`]
//! 3. Score complexity (advisory)
//! 4. Run the four strategy phases over a fresh context
//! 5. Apply the user overlay, merge diagnostics, serialize scripts
//!
//! Nothing survives between calls, so one service can be shared by threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ports::TemplateRenderer,
        services::{
            context::GenerationContext,
            customizer, metadata,
            script::{self, ScriptPreamble, Shell},
        },
        strategy::{LanguageStrategy, Strategy},
    },
    domain::{
        Blueprint, ComplexityReport, Decision, DomainValidator, GenerateRequest, Warning,
        complexity, entities::codes, entities::model::PLACEHOLDER_MODEL, rules,
    },
    error::ForgeResult,
};

/// Everything a successful generation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub bash_script: String,
    pub powershell_script: String,
    /// Sorted; directories carry a trailing `/`.
    pub file_paths: Vec<String>,
    pub warnings: Vec<Warning>,
    pub decisions: Vec<Decision>,
    pub complexity_report: ComplexityReport,
}

/// Pipeline entry point.
pub struct GenerationService {
    renderer: Box<dyn TemplateRenderer>,
}

impl GenerationService {
    pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Generate a project from `request`.
    ///
    /// Validation failures return before anything is rendered. A render
    /// failure aborts the run; no partial tree is returned.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            language = %request.language,
            architecture = %request.architecture,
        )
    )]
    pub fn generate(&self, request: GenerateRequest) -> ForgeResult<GenerateResponse> {
        let (request, rule_decisions) = rules::apply_rules(request.normalized());
        debug!(decisions = rule_decisions.len(), "rules applied");

        let blueprint = DomainValidator::validate(&request)?;
        let complexity_report = complexity::analyze(&request);
        info!(
            score = complexity_report.score,
            risk = %complexity_report.risk_level,
            "Request validated"
        );

        let strategy = Strategy::for_language(blueprint.language);
        let config_warnings = strategy.config_warnings(&blueprint);

        let mut ctx = GenerationContext::new(&blueprint, self.renderer.as_ref());
        strategy.generate_architecture(&mut ctx)?;
        strategy.generate_models(&mut ctx)?;
        strategy.generate_infra(&mut ctx)?;
        strategy.generate_dev_tools(&mut ctx)?;
        if ctx.placeholder_models() {
            ctx.decide(Decision::new(
                codes::MODEL_PLACEHOLDER_SUBSTITUTED,
                format!("No usable data models were supplied; generated the {PLACEHOLDER_MODEL} model."),
                "custom.models",
            ));
        }
        let (mut tree, mut phase_warnings, phase_decisions) = ctx.finish();
        info!(files = tree.file_count(), "Generation phases completed");

        phase_warnings.extend(customizer::apply_overlay(&mut tree, &blueprint.custom));
        tree.ensure_placeholders();

        let warnings = metadata::merge_warnings(config_warnings, phase_warnings);
        let decisions = metadata::merge_decisions(rule_decisions, phase_decisions);

        let bash_script = script::build_bash(&preamble(&blueprint, strategy, Shell::Bash), &tree);
        let powershell_script =
            script::build_powershell(&preamble(&blueprint, strategy, Shell::PowerShell), &tree);

        info!(
            files = tree.file_count(),
            dirs = tree.dir_count(),
            warnings = warnings.len(),
            "Generation completed"
        );

        Ok(GenerateResponse {
            bash_script,
            powershell_script,
            file_paths: tree.paths(),
            warnings,
            decisions,
            complexity_report,
        })
    }

    /// Score `request` without generating. Accepts requests that would fail
    /// validation.
    #[instrument(skip_all)]
    pub fn analyze(request: &GenerateRequest) -> ComplexityReport {
        let (request, _) = rules::apply_rules(request.clone().normalized());
        complexity::analyze(&request)
    }
}

fn preamble(blueprint: &Blueprint, strategy: Strategy, shell: Shell) -> ScriptPreamble {
    let is_new = blueprint.root.is_new();
    ScriptPreamble {
        root_dir: blueprint.root.directory().to_string(),
        git_init: is_new && blueprint.root.git_init,
        init_command: if is_new {
            strategy.init_command(blueprint, shell)
        } else {
            String::new()
        },
        setup_command: if is_new {
            strategy.setup_command(blueprint, shell)
        } else {
            String::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockTemplateRenderer, strategy::test_support::KeyEcho};
    use crate::domain::{CustomFile, DataField, DataModel, RiskLevel, Severity};
    use crate::error::ForgeError;

    fn service() -> GenerationService {
        GenerationService::new(Box::new(KeyEcho))
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            language: "go".into(),
            framework: "gin".into(),
            architecture: "mvp".into(),
            ..Default::default()
        }
    }

    #[test]
    fn identical_requests_give_identical_output() {
        let a = service().generate(request()).unwrap();
        let b = service().generate(request()).unwrap();
        assert_eq!(a.bash_script, b.bash_script);
        assert_eq!(a.file_paths, b.file_paths);
    }

    #[test]
    fn validation_failure_renders_nothing() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let service = GenerationService::new(Box::new(renderer));

        let err = service
            .generate(GenerateRequest {
                framework: String::new(),
                ..request()
            })
            .unwrap_err();
        assert!(matches!(err, ForgeError::Domain(_)));
    }

    #[test]
    fn render_failure_aborts() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|key, _| {
            Err(ApplicationError::TemplateNotFound { key: key.to_string() }.into())
        });
        let service = GenerationService::new(Box::new(renderer));

        let err = service.generate(request()).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn placeholder_substitution_is_recorded() {
        let resp = service().generate(request()).unwrap();
        assert!(resp
            .decisions
            .iter()
            .any(|d| d.code == codes::MODEL_PLACEHOLDER_SUBSTITUTED));

        let resp = service()
            .generate(GenerateRequest {
                custom: crate::domain::CustomOverlay {
                    models: vec![DataModel {
                        name: "User".into(),
                        fields: vec![DataField::new("Email", "string")],
                    }],
                    ..Default::default()
                },
                ..request()
            })
            .unwrap();
        assert!(resp.decisions.iter().all(|d| d.code != codes::MODEL_PLACEHOLDER_SUBSTITUTED));
    }

    #[test]
    fn custom_file_collision_keeps_generated_content() {
        let mut req = request();
        req.custom.add_files = vec![
            CustomFile {
                path: "./go.mod".into(),
                content: "module hijack\n".into(),
            },
            CustomFile {
                path: "notes/todo.txt".into(),
                content: "ship it\n".into(),
            },
        ];
        let resp = service().generate(req).unwrap();

        let dup: Vec<_> = resp
            .warnings
            .iter()
            .filter(|w| w.code == codes::DUPLICATE_CUSTOM_FILE)
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].severity, Severity::Warn);
        assert!(!resp.bash_script.contains("module hijack"));
        assert!(resp.file_paths.contains(&"notes/todo.txt".to_string()));
        assert!(resp.file_paths.contains(&"notes/".to_string()));
    }

    #[test]
    fn existing_root_skips_git_and_init() {
        let mut req = request();
        req.root.mode = "existing".into();
        req.root.path = "/srv/app".into();
        req.root.git_init = true;
        let resp = service().generate(req).unwrap();
        assert!(resp.bash_script.contains("ROOT_DIR=\"/srv/app\"\n"));
        assert!(!resp.bash_script.contains("git init"));
        assert!(!resp.bash_script.contains("go mod init"));
    }

    #[test]
    fn new_root_runs_init_command() {
        let mut req = request();
        req.root.git_init = true;
        let resp = service().generate(req).unwrap();
        assert!(resp.bash_script.contains("cd \"$ROOT_DIR\"\n\ngit init\ngo mod init \"stackforge-app\"\n"));
        assert!(resp.powershell_script.contains("go mod init 'stackforge-app'\n"));
    }

    #[test]
    fn python_installs_after_requirements_are_written() {
        let mut req = request();
        req.language = "python".into();
        req.framework = "fastapi".into();
        let resp = service().generate(req).unwrap();
        let script = &resp.bash_script;
        let written = script.find("cat > \"requirements.txt\"").unwrap();
        let installed = script.find("pip install -r requirements.txt").unwrap();
        assert!(script.find("python -m venv venv").unwrap() < written);
        assert!(installed > written);
    }

    #[test]
    fn removed_folder_drops_nested_files() {
        let mut req = request();
        req.custom.remove_folders = vec!["internal/middleware".into()];
        let resp = service().generate(req).unwrap();
        assert!(!resp.file_paths.iter().any(|p| p.starts_with("internal/middleware")));
    }

    #[test]
    fn analyze_tolerates_invalid_requests() {
        let report = GenerationService::analyze(&GenerateRequest {
            language: "cobol".into(),
            architecture: "mvp".into(),
            ..Default::default()
        });
        assert!(report.score <= 10);
        assert_eq!(report.risk_level, RiskLevel::Low);
    }
}
