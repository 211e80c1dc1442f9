//! User overlay application.

use tracing::{debug, warn};

use crate::domain::{FileTree, Overlay, Severity, Warning, entities::codes};

/// Apply `overlay` to `tree` after every generation phase has run.
///
/// Order is fixed: add folders, add files, remove folders, remove files. A
/// custom file whose path is already taken is dropped with a
/// `DUPLICATE_CUSTOM_FILE` warning and the existing content stays.
pub fn apply_overlay(tree: &mut FileTree, overlay: &Overlay) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for dir in &overlay.add_folders {
        tree.add_dir(dir.as_str());
    }

    for (path, content) in &overlay.add_files {
        if tree.add_file_if_absent(path.as_str(), content.clone()) {
            debug!(path = %path, "custom file added");
        } else {
            warn!(path = %path, "custom file collides with generated file");
            warnings.push(Warning::new(
                codes::DUPLICATE_CUSTOM_FILE,
                Severity::Warn,
                format!("Duplicate custom file path detected and ignored: {path}"),
                "A generated file already exists at this path; the generated content was kept.",
            ));
        }
    }

    for dir in &overlay.remove_folders {
        tree.remove_dir(dir.as_str());
    }

    for file in &overlay.remove_files {
        tree.remove_file(file.as_str());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RelativePath;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new("test path", p).unwrap()
    }

    #[test]
    fn duplicate_file_keeps_generated_content() {
        let mut tree = FileTree::new();
        tree.add_file("a.txt", "generated");
        let overlay = Overlay {
            add_files: vec![(rel("./a.txt"), "user".into())],
            ..Default::default()
        };

        let warnings = apply_overlay(&mut tree, &overlay);
        assert_eq!(tree.get("a.txt"), Some("generated"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, codes::DUPLICATE_CUSTOM_FILE);
        assert_eq!(warnings[0].severity, Severity::Warn);
    }

    #[test]
    fn adds_run_before_removes() {
        let mut tree = FileTree::new();
        tree.add_file("docs/guide.md", "");
        tree.add_file("Makefile", "");
        let overlay = Overlay {
            add_folders: vec![rel("scripts/local")],
            add_files: vec![(rel("docs/extra.md"), "x".into()), (rel("notes.md"), "n".into())],
            remove_folders: vec![rel("docs")],
            remove_files: vec![rel("Makefile"), rel("missing.txt")],
        };

        let warnings = apply_overlay(&mut tree, &overlay);
        assert!(warnings.is_empty());
        assert!(tree.contains_dir("scripts/local"));
        assert!(tree.contains_file("notes.md"));
        assert!(!tree.contains_file("docs/extra.md"));
        assert!(!tree.contains_dir("docs"));
        assert!(!tree.contains_file("Makefile"));
    }
}
