//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

use stackforge_core::domain::Language as CoreLanguage;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackforge",
    bin_name = "stackforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Backend project generator",
    long_about = "stackforge turns a declarative project request into a shell \
                  script that recreates a backend project tree. It never runs \
                  the script itself.",
    after_help = "EXAMPLES:\n\
        \x20 stackforge generate request.json > scaffold.sh\n\
        \x20 stackforge generate request.toml --emit powershell -o scaffold.ps1\n\
        \x20 cat request.json | stackforge generate - --emit paths\n\
        \x20 stackforge analyze request.json\n\
        \x20 stackforge frameworks --language python",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project script from a request.
    #[command(
        visible_alias = "gen",
        about = "Generate a project script from a request",
        after_help = "EXAMPLES:\n\
            \x20 stackforge generate request.json\n\
            \x20 stackforge generate request.toml --emit json\n\
            \x20 stackforge generate - --templates ./my-templates < request.json"
    )]
    Generate(GenerateArgs),

    /// Score the complexity of a request without generating.
    #[command(
        about = "Report the complexity of a request",
        after_help = "EXAMPLES:\n\
            \x20 stackforge analyze request.json\n\
            \x20 stackforge --output-format json analyze request.toml"
    )]
    Analyze(AnalyzeArgs),

    /// List supported languages, frameworks, architectures and databases.
    #[command(
        visible_alias = "ls",
        about = "List supported stacks",
        after_help = "EXAMPLES:\n\
            \x20 stackforge frameworks\n\
            \x20 stackforge frameworks --language go"
    )]
    Frameworks(FrameworksArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackforge completions bash > ~/.local/share/bash-completion/completions/stackforge\n\
            \x20 stackforge completions zsh  > ~/.zfunc/_stackforge\n\
            \x20 stackforge completions fish > ~/.config/fish/completions/stackforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the stackforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackforge config get defaults.language\n\
            \x20 stackforge config set defaults.language go\n\
            \x20 stackforge config list"
    )]
    Config(ConfigCommands),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stackforge init           # user config location\n\
            \x20 stackforge init --local   # .stackforge.toml in CWD"
    )]
    Init(InitArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Request document (JSON or TOML), or `-` for stdin.
    #[arg(value_name = "REQUEST", help = "Request file, or - for stdin")]
    pub request: String,

    /// What to print. Defaults to `generation.emit` from the config.
    #[arg(short = 'e', long = "emit", value_enum, help = "Artifact to emit")]
    pub emit: Option<Emit>,

    /// Write the artifact to a file instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write to FILE instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite `--output` without asking.
    #[arg(long = "force", help = "Overwrite an existing output file")]
    pub force: bool,

    /// Directory of `*.tmpl` overrides. Takes precedence over
    /// `templates.override_dir`.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template override directory"
    )]
    pub templates: Option<PathBuf>,
}

/// Artifact printed by `generate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Bash script.
    #[default]
    Script,
    /// PowerShell script.
    Powershell,
    /// The full response as JSON.
    Json,
    /// One generated path per line.
    Paths,
}

// ── analyze ───────────────────────────────────────────────────────────────────

/// Arguments for `stackforge analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Request document (JSON or TOML), or `-` for stdin.
    #[arg(value_name = "REQUEST", help = "Request file, or - for stdin")]
    pub request: String,
}

// ── frameworks ────────────────────────────────────────────────────────────────

/// Arguments for `stackforge frameworks`.
#[derive(Debug, Args)]
pub struct FrameworksArgs {
    /// Only list this language.
    #[arg(short = 'l', long = "language", value_enum, help = "Filter by language")]
    pub language: Option<Language>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stackforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.language`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Language {
    #[value(alias = "golang")]
    Go,
    /// Also accepted as `js`.
    #[value(alias = "js")]
    Node,
    /// Also accepted as `py`.
    #[value(alias = "py")]
    Python,
}

impl From<Language> for CoreLanguage {
    fn from(lang: Language) -> Self {
        match lang {
            Language::Go => CoreLanguage::Go,
            Language::Node => CoreLanguage::Node,
            Language::Python => CoreLanguage::Python,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(CoreLanguage::from(*self).as_str())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn language_display() {
        assert_eq!(Language::Go.to_string(), "go");
        assert_eq!(Language::Node.to_string(), "node");
        assert_eq!(Language::Python.to_string(), "python");
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "stackforge",
            "generate",
            "req.json",
            "--emit",
            "powershell",
            "-o",
            "out.ps1",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.request, "req.json");
        assert_eq!(args.emit, Some(Emit::Powershell));
        assert_eq!(args.output, Some(PathBuf::from("out.ps1")));
        assert!(!args.force);
    }

    #[test]
    fn stdin_dash_is_a_request() {
        let cli = Cli::parse_from(["stackforge", "gen", "-"]);
        assert!(matches!(cli.command, Commands::Generate(GenerateArgs { ref request, .. }) if request == "-"));
    }

    #[test]
    fn language_aliases() {
        let cli = Cli::parse_from(["stackforge", "frameworks", "-l", "py"]);
        let Commands::Frameworks(args) = cli.command else {
            panic!("expected Frameworks command");
        };
        assert_eq!(args.language, Some(Language::Python));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "stackforge",
            "analyze",
            "req.toml",
            "--log-format",
            "json",
            "--output-format",
            "json",
        ]);
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stackforge", "--quiet", "--verbose", "frameworks"]);
        assert!(result.is_err());
    }
}
