//! Filesystem template overrides.
//!
//! Walks a directory tree and collects every `*.tmpl` file as a template
//! source. The key is the path relative to the directory, with forward
//! slashes and without the extension:
//!
//! ```text
//! overrides/
//! ├── go/
//! │   └── clean/
//! │       └── main.tmpl      → go/clean/main
//! └── python/
//!     └── common/
//!         └── health.tmpl    → python/common/health
//! ```
//!
//! Keys that match a builtin template replace it; other keys are added.
//! Files with any other extension are ignored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::{AdapterError, AdapterResult};

const EXTENSION: &str = "tmpl";

/// One template source read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub key: String,
    pub source: String,
    pub path: PathBuf,
}

/// Loads override templates from a directory.
///
/// ```no_run
/// use stackforge_adapters::template_loader::TemplateLoader;
///
/// let sources = TemplateLoader::new("./overrides").load_all()?;
/// println!("Loaded {} override templates", sources.len());
/// # Ok::<(), stackforge_adapters::AdapterError>(())
/// ```
pub struct TemplateLoader {
    templates_dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Read every `*.tmpl` file under the directory, sorted by key.
    ///
    /// # Errors
    ///
    /// [`AdapterError::Io`] when the directory is missing or a file cannot
    /// be read. Unlike a malformed template, a half-read override set is
    /// never returned.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> AdapterResult<Vec<TemplateSource>> {
        if !self.templates_dir.is_dir() {
            return Err(AdapterError::io(
                &self.templates_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "templates directory not found"),
            ));
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(&self.templates_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.templates_dir).to_path_buf();
                AdapterError::io(path, e.into())
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }

            let Some(key) = self.key_for(path) else {
                continue;
            };
            let source = fs::read_to_string(path).map_err(|e| AdapterError::io(path, e))?;
            debug!(key = %key, "override template found");
            sources.push(TemplateSource {
                key,
                source,
                path: path.to_path_buf(),
            });
        }

        sources.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(count = sources.len(), "finished loading override templates");
        Ok(sources)
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.templates_dir).ok()?.with_extension("");
        let key = normalize_path(&rel.to_string_lossy());
        (!key.is_empty()).then_some(key)
    }
}

/// Forward slashes everywhere so keys are the same on Windows and Unix.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let full = dir.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    #[test]
    fn missing_dir_is_an_error() {
        let err = TemplateLoader::new("/absolutely/does/not/exist")
            .load_all()
            .unwrap_err();
        assert!(matches!(err, AdapterError::Io { .. }));
    }

    #[test]
    fn keys_are_relative_paths_without_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "go/clean/main.tmpl", "package main\n");
        write(temp.path(), "python/common/health.tmpl", "ok\n");

        let sources = TemplateLoader::new(temp.path()).load_all().unwrap();
        let keys: Vec<_> = sources.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["go/clean/main", "python/common/health"]);
        assert_eq!(sources[0].source, "package main\n");
    }

    #[test]
    fn other_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "README.md", "# notes\n");
        write(temp.path(), "go/clean/main.go", "package main\n");
        write(temp.path(), "node/mvp/main.tmpl", "app\n");

        let sources = TemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].key, "node/mvp/main");
    }

    #[test]
    fn empty_dir_loads_nothing() {
        let temp = TempDir::new().unwrap();
        assert!(TemplateLoader::new(temp.path()).load_all().unwrap().is_empty());
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path(r"go\clean\main"), "go/clean/main");
    }
}
