//! CLI command implementations.

mod check;
mod nav;
mod projects;
mod switcher;
mod version;

use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config};
use docsite_site::{PageCatalog, Project, ProjectRegistry};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use projects::ProjectsArgs;
pub(crate) use switcher::SwitcherArgs;
pub(crate) use version::VersionArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// Projects YAML file (overrides config).
    #[arg(short, long, global = true)]
    projects_file: Option<PathBuf>,

    /// Public site URL (overrides config).
    #[arg(long, env = "DOCSITE_URL", global = true)]
    site_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            projects_file: self.projects_file.clone(),
            site_url: self.site_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load the project registry named by the configuration.
pub(crate) fn load_projects(config: &Config) -> Result<ProjectRegistry, CliError> {
    let registry = ProjectRegistry::load(&config.docs_resolved.projects_file)?;
    tracing::info!(
        projects = registry.len(),
        path = %config.docs_resolved.projects_file.display(),
        "Loaded projects"
    );
    Ok(registry)
}

/// Scan the page catalog from the configured source directory.
pub(crate) fn load_catalog(config: &Config) -> Result<PageCatalog, CliError> {
    let catalog = PageCatalog::scan(&config.docs_resolved.source_dir)?;
    tracing::info!(
        pages = catalog.len(),
        path = %config.docs_resolved.source_dir.display(),
        "Scanned pages"
    );
    Ok(catalog)
}

/// Project owning a documentation URL.
pub(crate) fn project_for<'a>(
    registry: &'a ProjectRegistry,
    config: &Config,
    url: &str,
) -> Result<&'a Project, CliError> {
    registry
        .for_url(url, &config.docs_resolved.area)
        .ok_or_else(|| CliError::Validation(format!("No project found for {url}")))
}
