use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project-relative, forward-slash path.
///
/// Invariant: never empty, never absolute, never contains `..`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// Canonical spelling of `raw`: trimmed, `\` turned into `/`, leading
    /// `./` and trailing `/` removed. Does not validate.
    pub fn normalize(raw: &str) -> String {
        let mut path = raw.trim().replace('\\', "/");
        while let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        }
        while path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        path
    }

    /// `true` when an already normalized path stays inside the project root:
    /// non-empty, not absolute and without a `..` segment.
    pub fn is_contained(path: &str) -> bool {
        !path.is_empty() && !path.starts_with('/') && !path.split('/').any(|seg| seg == "..")
    }

    /// Fallible constructor. `kind` names the request field in the error.
    pub fn try_new(kind: &'static str, raw: &str) -> Result<Self, DomainError> {
        let unsafe_path = || DomainError::UnsafePath {
            kind,
            path: raw.to_string(),
        };

        let candidate = raw.trim().replace('\\', "/");
        if candidate.is_empty() || candidate.starts_with('/') || candidate.contains("..") {
            return Err(unsafe_path());
        }

        let path = Self::normalize(&candidate);
        if path.is_empty() || path == "." {
            return Err(unsafe_path());
        }
        Ok(Self(path))
    }

    /// Join a segment. The caller guarantees `segment` is itself relative.
    pub fn join(&self, segment: &str) -> Self {
        Self(format!("{}/{}", self.0, Self::normalize(segment)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
