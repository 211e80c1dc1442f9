//! The virtual project: normalized relative paths → content, plus directories.
//!
//! Both collections are ordered (`BTreeMap` / `BTreeSet`), so iteration is
//! lexicographic and every consumer (script serializer, path listing) is
//! deterministic without sorting on its own.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{trace, warn};

use super::common::RelativePath;

/// Name of the empty file dropped into directories that hold no files.
pub const PLACEHOLDER_FILE: &str = ".gitkeep";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Writes ───────────────────────────────────────────────────────────

    /// Write `content` at `path`, replacing any previous content, and
    /// register every ancestor directory.
    ///
    /// A path that would leave the project root (absolute, or with a `..`
    /// segment) is refused and `false` is returned.
    pub fn add_file(&mut self, path: &str, content: impl Into<String>) -> bool {
        let path = RelativePath::normalize(path);
        if !RelativePath::is_contained(&path) {
            warn!(path = %path, "refusing file outside the project root");
            return false;
        }
        trace!(path = %path, "add file");
        self.register_parents(&path);
        self.files.insert(path, content.into());
        true
    }

    /// Write only if nothing exists at `path` yet. Returns `false` (and keeps
    /// the existing content) when the path is taken or refused.
    pub fn add_file_if_absent(&mut self, path: &str, content: impl Into<String>) -> bool {
        let normalized = RelativePath::normalize(path);
        if self.files.contains_key(&normalized) {
            return false;
        }
        self.add_file(&normalized, content)
    }

    /// Register a directory (and its ancestors). Idempotent. Paths outside
    /// the project root are ignored.
    pub fn add_dir(&mut self, path: &str) {
        let path = RelativePath::normalize(path);
        if path == "." || !RelativePath::is_contained(&path) {
            return;
        }
        self.register_parents(&path);
        self.dirs.insert(path);
    }

    /// Replace the content of an existing file. Returns `false` if absent.
    pub fn replace(&mut self, path: &str, content: String) -> bool {
        match self.files.get_mut(&RelativePath::normalize(path)) {
            Some(slot) => {
                *slot = content;
                true
            }
            None => false,
        }
    }

    /// Remove a directory, every directory below it and every file nested
    /// under it.
    pub fn remove_dir(&mut self, path: &str) {
        let dir = RelativePath::normalize(path);
        let prefix = format!("{dir}/");
        self.dirs.retain(|d| *d != dir && !d.starts_with(&prefix));
        self.files
            .retain(|f, _| *f != dir && !f.starts_with(&prefix));
    }

    /// Remove one file by exact path. No-op if absent.
    pub fn remove_file(&mut self, path: &str) {
        self.files.remove(&RelativePath::normalize(path));
    }

    /// Give every directory with no file beneath it an empty
    /// [`PLACEHOLDER_FILE`] so the layout survives archiving.
    ///
    /// Deepest directories are handled first, so a parent whose only content
    /// is an empty child directory is satisfied by the child's placeholder.
    pub fn ensure_placeholders(&mut self) {
        let dirs: Vec<String> = self.dirs.iter().rev().cloned().collect();
        for dir in dirs {
            let prefix = format!("{dir}/");
            let has_file = self
                .files
                .range(prefix.clone()..)
                .next()
                .is_some_and(|(f, _)| f.starts_with(&prefix));
            if !has_file {
                self.files
                    .insert(format!("{prefix}{PLACEHOLDER_FILE}"), String::new());
            }
        }
    }

    fn register_parents(&mut self, path: &str) {
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            if parent.is_empty() {
                break;
            }
            self.dirs.insert(parent.to_string());
            current = parent;
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(&RelativePath::normalize(path))
            .map(String::as_str)
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.files.contains_key(&RelativePath::normalize(path))
    }

    pub fn contains_dir(&self, path: &str) -> bool {
        self.dirs.contains(&RelativePath::normalize(path))
    }

    /// Files in lexicographic path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Directories in lexicographic order.
    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Every file path plus every directory (with a trailing `/`), sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .files
            .keys()
            .cloned()
            .chain(self.dirs.iter().map(|d| format!("{d}/")))
            .collect();
        out.sort();
        out
    }
}
