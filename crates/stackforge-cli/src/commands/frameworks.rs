//! `stackforge frameworks`: what the pipeline can generate.

use serde_json::json;

use stackforge_core::domain::{
    Architecture, Database, Language,
    capabilities::{FrameworkDef, frameworks_for},
};

use crate::{
    cli::{FrameworksArgs, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: FrameworksArgs, output: OutputManager) -> CliResult<()> {
    let languages: Vec<Language> = match args.language {
        Some(lang) => vec![lang.into()],
        None => Language::ALL.to_vec(),
    };

    if output.format() == OutputFormat::Json {
        output.json(&as_json(&languages))?;
        return Ok(());
    }

    output.header("Languages and frameworks:")?;
    for lang in &languages {
        output.print(&format!("  {lang}"))?;
        for FrameworkDef { framework, summary, .. } in frameworks_for(*lang) {
            output.print(&format!("    {:<10}{summary}", framework.as_str()))?;
        }
    }
    output.print("")?;
    output.print(&format!("Architectures: {}", joined(Architecture::ALL.iter().map(|a| a.as_str()))))?;
    output.print(&format!("Databases:     {}", joined(Database::ALL.iter().map(|d| d.as_str()))))?;
    Ok(())
}

fn joined<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn as_json(languages: &[Language]) -> serde_json::Value {
    let languages: Vec<_> = languages
        .iter()
        .map(|lang| {
            let frameworks: Vec<_> = frameworks_for(*lang)
                .map(|def| json!({ "name": def.framework.as_str(), "summary": def.summary }))
                .collect();
            json!({ "name": lang.as_str(), "frameworks": frameworks })
        })
        .collect();

    json!({
        "languages": languages,
        "architectures": Architecture::ALL.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
        "databases": Database::ALL.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lists_frameworks_per_language() {
        let value = as_json(&[Language::Python]);
        let langs = value["languages"].as_array().unwrap();
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0]["name"], "python");

        let names: Vec<_> = langs[0]["frameworks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["fastapi", "django"]);
        assert_eq!(value["architectures"][3], "modular-monolith");
        assert_eq!(value["databases"].as_array().unwrap().len(), 4);
    }
}
