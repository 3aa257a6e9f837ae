//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackgen",
    bin_name = "stackgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Service scaffolding from a declarative registry",
    long_about = "stackgen reads a service registry and generates each service's \
                  directory skeleton, Dockerfile, Helm chart, ArgoCD application \
                  and CI workflow, then syncs shared schemas and dashboards.",
    after_help = "EXAMPLES:\n\
        \x20 stackgen generate\n\
        \x20 stackgen generate --root ../platform --registry registry/prod.yaml\n\
        \x20 stackgen list --format json\n\
        \x20 stackgen completions bash > /usr/share/bash-completion/completions/stackgen",
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

impl Cli {
    /// Repository root the command operates on.
    pub fn root(&self) -> &Path {
        match &self.command {
            Commands::Generate(args) => &args.target.root,
            Commands::List(args) => &args.target.root,
            Commands::Init(args) => &args.root,
            Commands::Config { root, .. } => root,
            Commands::Check | Commands::Completions(_) => Path::new("."),
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full scaffolding pipeline.
    #[command(
        visible_alias = "gen",
        about = "Generate every service in the registry",
        after_help = "EXAMPLES:\n\
            \x20 stackgen generate\n\
            \x20 stackgen gen --root ./platform\n\
            \x20 stackgen generate --registry registry/staging.yaml"
    )]
    Generate(GenerateArgs),

    /// Probe the required tools without generating anything.
    #[command(
        about = "Check that required tools are installed",
        after_help = "EXAMPLES:\n\
            \x20 stackgen check\n\
            \x20 stackgen check --output-format json"
    )]
    Check,

    /// Print the records of the registry.
    #[command(
        visible_alias = "ls",
        about = "List services in the registry",
        after_help = "EXAMPLES:\n\
            \x20 stackgen list\n\
            \x20 stackgen list --format csv\n\
            \x20 stackgen ls --registry registry/staging.yaml --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stackgen init           # ./stackgen.toml\n\
            \x20 stackgen init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        after_help = "EXAMPLES:\n\
            \x20 stackgen config get registry.path\n\
            \x20 stackgen config list\n\
            \x20 stackgen config path"
    )]
    Config {
        /// Repository root whose `stackgen.toml` is read.
        #[arg(long = "root", value_name = "DIR", default_value = ".", global = true)]
        root: PathBuf,

        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackgen completions bash > ~/.local/share/bash-completion/completions/stackgen\n\
            \x20 stackgen completions zsh  > ~/.zfunc/_stackgen\n\
            \x20 stackgen completions fish > ~/.config/fish/completions/stackgen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where the repository and its registry live.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Repository root; every generated path is relative to it.
    #[arg(
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Repository root"
    )]
    pub root: PathBuf,

    /// Registry file, overriding `registry.path` from configuration.
    #[arg(
        short = 'r',
        long = "registry",
        value_name = "FILE",
        help = "Service registry file (default: registry/services.yaml)"
    )]
    pub registry: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory that receives `stackgen.toml`.
    #[arg(long = "root", value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackgen completions`.
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

/// Subcommands for `stackgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the project configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
