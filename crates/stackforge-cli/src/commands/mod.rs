//! Command handlers, one module per subcommand.

pub mod analyze;
pub mod completions;
pub mod config;
pub mod frameworks;
pub mod generate;
pub mod init;

use stackforge_adapters::request_source;
use stackforge_core::prelude::GenerateRequest;

use crate::{config::AppConfig, error::CliResult};

/// Read the request named on the command line and fill it from `[defaults]`.
pub(crate) fn load_request(source: &str, config: &AppConfig) -> CliResult<GenerateRequest> {
    let mut request = request_source::load(source)?;
    config.apply_defaults(&mut request);
    Ok(request)
}
