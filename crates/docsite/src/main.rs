//! docsite CLI - documentation site toolkit.
//!
//! Provides commands for:
//! - `check`: Validate navigation of every project page
//! - `nav`: Print the navigation tree of a page
//! - `version`: Extract or rewrite the version of a URL
//! - `switcher`: Print version-switcher options of a page
//! - `projects`: List documented projects

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ProjectsArgs, SiteArgs, SwitcherArgs, VersionArgs};
use output::Output;

/// docsite - documentation site toolkit.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the navigation of every project page and report failures.
    Check(CheckArgs),
    /// Print the navigation tree of a page as JSON.
    Nav(NavArgs),
    /// Print the version of a URL, or rewrite it to another version.
    Version(VersionArgs),
    /// Print version-switcher options of a page as JSON.
    Switcher(SwitcherArgs),
    /// List documented projects.
    Projects(ProjectsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.site.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&cli.site),
        Commands::Nav(args) => args.execute(&cli.site),
        Commands::Version(args) => args.execute(&cli.site),
        Commands::Switcher(args) => args.execute(&cli.site),
        Commands::Projects(args) => args.execute(&cli.site),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
