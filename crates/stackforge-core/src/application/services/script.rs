//! Script serialization.
//!
//! Turns a finished [`FileTree`] into a bash script (and a PowerShell twin)
//! that recreates it on disk. Both outputs are byte-deterministic: the tree
//! iterates in lexicographic order and nothing else feeds the text.

use std::fmt::Write as _;

use crate::domain::FileTree;

/// Heredoc terminator. Generated files must not contain it on a line of its
/// own.
pub const HEREDOC_DELIMITER: &str = "STACKFORGE_EOF_7f3a91";

const SUCCESS_LINE: &str = "stackforge: project generated successfully.";
const RUN_HINT: &str = "Run: docker compose up --build";

/// Target shell for init commands and quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    PowerShell,
}

/// Where the script starts and what it runs before writing files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptPreamble {
    /// Directory created and entered first.
    pub root_dir: String,
    /// Run `git init` (new projects only).
    pub git_init: bool,
    /// Language init command, newline terminated; empty for existing roots.
    pub init_command: String,
    /// Runs after the last file is written; empty for existing roots.
    pub setup_command: String,
}

// ── Bash ─────────────────────────────────────────────────────────────────────

/// `value` as a double-quoted bash word.
pub fn bash_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

pub fn build_bash(preamble: &ScriptPreamble, tree: &FileTree) -> String {
    let mut b = String::new();
    b.push_str("#!/usr/bin/env bash\n");
    b.push_str("set -euo pipefail\n\n");
    let _ = writeln!(b, "ROOT_DIR={}", bash_quote(&preamble.root_dir));
    b.push_str("mkdir -p \"$ROOT_DIR\"\n");
    b.push_str("cd \"$ROOT_DIR\"\n\n");

    if preamble.git_init {
        b.push_str("git init\n");
    }
    b.push_str(&preamble.init_command);

    let mut any_dir = false;
    for dir in tree.dirs() {
        let _ = writeln!(b, "mkdir -p {}", bash_quote(dir));
        any_dir = true;
    }
    if any_dir {
        b.push('\n');
    }

    for (path, content) in tree.files() {
        let _ = writeln!(b, "cat > {} <<'{HEREDOC_DELIMITER}'", bash_quote(path));
        b.push_str(content);
        if !content.ends_with('\n') {
            b.push('\n');
        }
        let _ = writeln!(b, "{HEREDOC_DELIMITER}\n");
    }

    if !preamble.setup_command.is_empty() {
        b.push_str(&preamble.setup_command);
        b.push('\n');
    }

    let _ = writeln!(b, "echo {}", bash_quote(SUCCESS_LINE));
    let _ = writeln!(b, "echo {}", bash_quote(RUN_HINT));
    b
}

// ── PowerShell ───────────────────────────────────────────────────────────────

/// `value` as a single-quoted PowerShell string.
pub fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn build_powershell(preamble: &ScriptPreamble, tree: &FileTree) -> String {
    let mut b = String::new();
    b.push_str("$ErrorActionPreference = 'Stop'\n\n");
    let _ = writeln!(b, "$RootDir = {}", powershell_quote(&preamble.root_dir));
    b.push_str("New-Item -ItemType Directory -Path $RootDir -Force | Out-Null\n");
    b.push_str("Set-Location $RootDir\n\n");

    if preamble.git_init {
        b.push_str("git init\n");
    }
    b.push_str(&preamble.init_command);

    let mut any_dir = false;
    for dir in tree.dirs() {
        let _ = writeln!(
            b,
            "New-Item -ItemType Directory -Path {} -Force | Out-Null",
            powershell_quote(dir)
        );
        any_dir = true;
    }
    if any_dir {
        b.push('\n');
    }

    for (path, content) in tree.files() {
        let body = content.strip_suffix('\n').unwrap_or(content);
        let _ = writeln!(
            b,
            "@'\n{body}\n'@ | Set-Content -NoNewline {}\n",
            powershell_quote(path)
        );
    }

    if !preamble.setup_command.is_empty() {
        b.push_str(&preamble.setup_command);
        b.push('\n');
    }

    let _ = writeln!(b, "Write-Host {}", powershell_quote(SUCCESS_LINE));
    let _ = writeln!(b, "Write-Host {}", powershell_quote(RUN_HINT));
    b
}
