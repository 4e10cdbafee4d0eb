//! CLI parsing and command dispatch.

use std::{io, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::{
    commands,
    error::Result,
    palette::{fmt_logo, fmt_muted},
    paths,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(name = "rely", version, about = "Add Rely UI components to your Vue project")]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long)]
    verbose: bool,
    /// Project root (defaults to the current directory).
    #[arg(long)]
    cwd: Option<PathBuf>,
    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Add components and their dependencies to the project.
    Add {
        /// Names of components to add (prompts when omitted).
        components: Vec<String>,
        /// Registry base URL, overriding rely.toml.
        #[arg(long)]
        registry: Option<String>,
        /// Skip the Vue project and path alias checks.
        #[arg(long)]
        skip_checks: bool,
    },
    /// Build registry documents from a templates directory.
    Build {
        /// Directory containing `core/` and `components/` templates.
        #[arg(long, default_value = "templates")]
        templates: PathBuf,
        /// Output directory for the registry documents.
        #[arg(long, short = 'o', default_value = "public/registry")]
        out: PathBuf,
    },
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let color = cli.color.into_choice();
    print_banner(color.enabled());
    let project_root = paths::project_root(cli.cwd.as_deref())?;

    // Match arms are ordered alphabetically - maintain this order.
    match cli.command {
        Command::Add {
            components,
            registry,
            skip_checks,
        } => commands::add::run(color, &project_root, components, registry, skip_checks).await,
        Command::Build { templates, out } => {
            commands::build::run(color, &project_root, templates, out).await
        }
    }
}

/// Print the logo, version and tagline.
fn print_banner(use_color: bool) {
    println!();
    println!(
        "  {}  {}",
        fmt_logo(use_color),
        fmt_muted(concat!("v", env!("CARGO_PKG_VERSION")), use_color)
    );
    println!(
        "  {}",
        fmt_muted("The Universal Vue Component Library", use_color)
    );
    println!();
}

/// Install the log subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "rely_ui=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}
