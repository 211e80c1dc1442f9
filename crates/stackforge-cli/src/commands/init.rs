//! `stackforge init`: write a default configuration file.

use std::{fs, path::PathBuf};

use crate::{
    cli::InitArgs,
    config::{AppConfig, ENV_PREFIX, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, config_file: Option<PathBuf>, output: OutputManager) -> CliResult<()> {
    let path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        config_file.unwrap_or_else(AppConfig::config_path)
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let contents = default_document()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    fs::write(&path, contents)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn default_document() -> CliResult<String> {
    let body = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| CliError::config("Failed to serialise default config", e))?;

    Ok(format!(
        "# stackforge {version} configuration, created {created}\n\
         # Any key can be overridden with {ENV_PREFIX}_<SECTION>__<KEY>,\n\
         # e.g. {ENV_PREFIX}_DEFAULTS__LANGUAGE=go\n\n{body}",
        version = env!("CARGO_PKG_VERSION"),
        created = chrono::Local::now().format("%Y-%m-%d %H:%M"),
    ))
}
