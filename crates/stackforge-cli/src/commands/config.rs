//! `stackforge config`: read and write configuration values.
//!
//! `get` and `list` show the effective configuration (defaults, file and
//! environment merged). `set` edits only the file, so a value shadowed by a
//! `STACKFORGE_*` variable keeps reading back as the variable's value.

use std::{fs, path::PathBuf};

use tracing::debug;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::{AppConfig, KEYS},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = config_file.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit(&value.unwrap_or_default())?;
        }

        ConfigCommands::Set { key, value } => {
            let existing = if path.exists() {
                fs::read_to_string(&path)
                    .with_cli_context(|| format!("Failed to read '{}'", path.display()))?
            } else {
                String::new()
            };
            let updated = set_config_value(&existing, &key, &value)?;

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
            }
            fs::write(&path, updated)
                .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
            debug!(key = %key, path = %path.display(), "config value written");
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                let value = serde_json::to_value(&config).map_err(std::io::Error::other)?;
                output.json(&value)?;
            } else {
                let serialised = toml::to_string_pretty(&config)
                    .map_err(|e| CliError::config("Failed to serialise config", e))?;
                output.emit(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.emit(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn check_key(key: &str) -> CliResult<()> {
    if KEYS.contains(&key) {
        Ok(())
    } else {
        Err(CliError::UnknownConfigKey { key: key.into() })
    }
}

/// Effective value of `key`, or `None` when it is unset.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Option<String>> {
    check_key(key)?;
    let root = toml::Value::try_from(config)
        .map_err(|e| CliError::config("Failed to serialise config", e))?;

    let mut node = &root;
    for part in key.split('.') {
        match node.get(part) {
            Some(next) => node = next,
            None => return Ok(None),
        }
    }
    Ok(Some(match node {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Return `document` with `key` set to `raw`, after checking the result
/// still loads.
fn set_config_value(document: &str, key: &str, raw: &str) -> CliResult<String> {
    check_key(key)?;
    let mut table: toml::Table = document
        .parse()
        .map_err(|e| CliError::config("Existing config file is not valid TOML", e))?;

    let value = match key {
        "output.no_color" => toml::Value::Boolean(raw.parse().map_err(|_| CliError::InvalidInput {
            message: format!("{key} must be true or false, got '{raw}'"),
            source: None,
        })?),
        _ => toml::Value::String(raw.to_string()),
    };

    let (section, field) = key.split_once('.').unwrap_or(("", key));
    let section_table = table
        .entry(section.to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let Some(section_table) = section_table.as_table_mut() else {
        return Err(CliError::config(
            format!("[{section}] is not a table"),
            std::io::Error::from(std::io::ErrorKind::InvalidData),
        ));
    };
    section_table.insert(field.to_string(), value);

    let checked: AppConfig = toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e| CliError::config("Value does not fit the config schema", e))?;
    checked.default_emit()?;

    toml::to_string_pretty(&table).map_err(|e| CliError::config("Failed to serialise config", e))
}

// ── tests ─────────────────────────────────────────────────────────────────────
