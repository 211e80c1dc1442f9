//! `stackforge analyze`: complexity report for a request.
//!
//! Scoring is advisory and accepts requests that would fail validation, so
//! this command only fails when the request cannot be read.

use owo_colors::OwoColorize;
use tracing::instrument;

use stackforge_core::{
    domain::complexity::MAX_SCORE,
    prelude::{ComplexityReport, GenerationService, RiskLevel},
};

use crate::{
    cli::{AnalyzeArgs, OutputFormat},
    commands::load_request,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(request = %args.request))]
pub fn execute(args: AnalyzeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = load_request(&args.request, &config)?;
    let report = GenerationService::analyze(&request);

    if output.format() == OutputFormat::Json {
        let value = serde_json::to_value(&report).map_err(std::io::Error::other)?;
        output.json(&value)?;
        return Ok(());
    }

    for line in report_lines(&report, output.supports_color()) {
        output.emit(&line)?;
    }
    Ok(())
}

fn report_lines(report: &ComplexityReport, color: bool) -> Vec<String> {
    let risk = report.risk_level.as_str();
    let risk = if color {
        match report.risk_level {
            RiskLevel::Low => risk.green().bold().to_string(),
            RiskLevel::Moderate => risk.yellow().bold().to_string(),
            RiskLevel::High => risk.red().bold().to_string(),
        }
    } else {
        risk.to_string()
    };

    let w = &report.weights;
    let mut lines = vec![
        "Complexity report".to_string(),
        format!("  Score:  {} / {MAX_SCORE}", report.score),
        format!("  Risk:   {risk}"),
        "  Weights:".to_string(),
    ];
    for (name, weight) in [
        ("architecture", w.architecture),
        ("database", w.database),
        ("infrastructure", w.infrastructure),
        ("services", w.services),
        ("models", w.models),
    ] {
        lines.push(format!("    {name:<16}{weight:>3}"));
    }
    if !report.notes.is_empty() {
        lines.push("  Notes:".to_string());
        lines.extend(report.notes.iter().map(|n| format!("    - {n}")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::domain::ComplexityWeights;

    #[test]
    fn plain_report_lists_every_weight() {
        let report = ComplexityReport {
            score: 47,
            weights: ComplexityWeights {
                architecture: 25,
                database: 10,
                infrastructure: 5,
                services: 0,
                models: 7,
            },
            risk_level: RiskLevel::Moderate,
            notes: vec!["Hexagonal adds port and adapter layers".into()],
        };
        let lines = report_lines(&report, false);
        assert_eq!(lines[1], "  Score:  47 / 100");
        assert_eq!(lines[2], "  Risk:   moderate");
        assert!(lines.contains(&"    architecture     25".to_string()));
        assert_eq!(lines.last().unwrap(), "    - Hexagonal adds port and adapter layers");
    }
}
