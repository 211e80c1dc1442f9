//! `stackforge generate`: run the pipeline and emit one artifact.
//!
//! The generated script is printed or written, never executed.

use std::{fs, path::Path};

use tracing::{debug, info, instrument};

use stackforge_adapters::MiniJinjaRenderer;
use stackforge_core::{
    application::ApplicationError,
    prelude::{ForgeError, GenerateResponse, GenerationService},
};

use crate::{
    cli::{Emit, GenerateArgs},
    commands::load_request,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(request = %args.request))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let emit = match args.emit {
        Some(emit) => emit,
        None => config.default_emit()?,
    };
    let request = load_request(&args.request, &config)?;

    let override_dir = args.templates.as_deref().or(config.templates.override_dir.as_deref());
    let renderer = build_renderer(override_dir)?;
    let service = GenerationService::new(Box::new(renderer));

    let spinner = output.spinner("Generating project...");
    let result = service.generate(request);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let response = result.with_cli_context(|| format!("generating from {}", args.request))?;

    report_diagnostics(&response, &output)?;
    let content = render_artifact(&response, emit)?;

    match &args.output {
        Some(path) => {
            write_output(path, &content, args.force, &output)?;
            #[cfg(unix)]
            if emit == Emit::Script {
                make_executable(path)?;
            }
            output.success(&format!(
                "Wrote {} ({} paths, {} warnings)",
                path.display(),
                response.file_paths.len(),
                response.warnings.len()
            ))?;
        }
        None => output.emit(&content)?,
    }

    info!(emit = ?emit, paths = response.file_paths.len(), "Generate completed");
    Ok(())
}

fn build_renderer(override_dir: Option<&Path>) -> CliResult<MiniJinjaRenderer> {
    let renderer = match override_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "using template overrides");
            MiniJinjaRenderer::with_overrides(dir)?
        }
        None => MiniJinjaRenderer::new()?,
    };
    Ok(renderer)
}

/// Warnings go to stderr; decisions are logged at info level.
fn report_diagnostics(response: &GenerateResponse, output: &OutputManager) -> CliResult<()> {
    for warning in &response.warnings {
        output.warning(&format!(
            "[{}] {}: {}",
            warning.severity, warning.code, warning.message
        ))?;
    }
    for decision in &response.decisions {
        info!(
            code = %decision.code,
            triggered_by = %decision.triggered_by,
            "{}",
            decision.description
        );
    }
    Ok(())
}

pub(crate) fn render_artifact(response: &GenerateResponse, emit: Emit) -> CliResult<String> {
    let content = match emit {
        Emit::Script => response.bash_script.clone(),
        Emit::Powershell => response.powershell_script.clone(),
        Emit::Json => serde_json::to_string_pretty(response).map_err(|e| {
            ForgeError::from(ApplicationError::Serialization {
                artifact: "response",
                reason: e.to_string(),
            })
        })?,
        Emit::Paths => {
            let mut paths = response.file_paths.join("\n");
            paths.push('\n');
            paths
        }
    };
    Ok(content)
}

fn write_output(path: &Path, content: &str, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force && !confirm_overwrite(path, output)? {
        return Err(CliError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, content).with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(path: &Path, output: &OutputManager) -> CliResult<bool> {
    if !output.is_interactive() {
        return Ok(false);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {}?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })?;
    if confirmed {
        Ok(true)
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_path: &Path, _output: &OutputManager) -> CliResult<bool> {
    Ok(false)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> CliResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_cli_context(|| format!("Failed to stat '{}'", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
        .with_cli_context(|| format!("Failed to mark '{}' executable", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::prelude::{ComplexityReport, RiskLevel};

    fn response() -> GenerateResponse {
        GenerateResponse {
            bash_script: "#!/usr/bin/env bash\n".into(),
            powershell_script: "$ErrorActionPreference = 'Stop'\n".into(),
            file_paths: vec!["cmd/".into(), "cmd/main.go".into()],
            warnings: vec![],
            decisions: vec![],
            complexity_report: ComplexityReport {
                score: 10,
                weights: Default::default(),
                risk_level: RiskLevel::Low,
                notes: vec![],
            },
        }
    }

    #[test]
    fn each_emit_mode_picks_its_artifact() {
        let resp = response();
        assert_eq!(render_artifact(&resp, Emit::Script).unwrap(), resp.bash_script);
        assert_eq!(render_artifact(&resp, Emit::Powershell).unwrap(), resp.powershell_script);
        assert_eq!(render_artifact(&resp, Emit::Paths).unwrap(), "cmd/\ncmd/main.go\n");

        let json: serde_json::Value =
            serde_json::from_str(&render_artifact(&resp, Emit::Json).unwrap()).unwrap();
        assert_eq!(json["file_paths"][1], "cmd/main.go");
    }
}
