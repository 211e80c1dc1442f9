//! Loading a [`GenerateRequest`] from disk or stdin.
//!
//! The format comes from the file extension (`.json`, `.toml`). Stdin and
//! files with any other extension are sniffed: a document whose first
//! non-whitespace character is `{` is JSON, anything else is TOML.

use std::{
    fmt,
    fs,
    io::{self, Read},
    path::Path,
};

use stackforge_core::prelude::GenerateRequest;
use tracing::{debug, instrument};

use crate::error::{AdapterError, AdapterResult};

/// Argument value that means "read from stdin".
pub const STDIN: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Toml,
}

impl RequestFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Toml
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

impl fmt::Display for RequestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Load a request from `source`, a file path or [`STDIN`].
#[instrument]
pub fn load(source: &str) -> AdapterResult<GenerateRequest> {
    if source == STDIN {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AdapterError::io("<stdin>", e))?;
        return parse(&text, None, "<stdin>");
    }

    let path = Path::new(source);
    let text = fs::read_to_string(path).map_err(|e| AdapterError::io(path, e))?;
    parse(&text, RequestFormat::from_extension(path), source)
}

/// Parse `text` as a request. Without a `format` the text is sniffed.
pub fn parse(text: &str, format: Option<RequestFormat>, origin: &str) -> AdapterResult<GenerateRequest> {
    let format = format.unwrap_or_else(|| RequestFormat::sniff(text));
    debug!(%format, origin, "parsing request");

    let parse_error = |reason: String| AdapterError::Parse {
        origin: origin.to_string(),
        format: format.name(),
        reason,
    };
    match format {
        RequestFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        RequestFormat::Toml => toml::from_str(text).map_err(|e| parse_error(e.to_string())),
    }
}
