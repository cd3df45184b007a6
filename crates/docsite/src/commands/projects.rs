//! `docsite projects` command implementation.

use clap::Args;
use docsite_site::{Project, VersionVariant, version};
use serde::Serialize;

use super::{SiteArgs, load_projects};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the projects command.
#[derive(Args)]
pub(crate) struct ProjectsArgs {
    /// Print projects as JSON.
    #[arg(long)]
    json: bool,
}

/// Project overview printed by the command.
#[derive(Debug, Serialize)]
struct ProjectSummary<'a> {
    name: &'a str,
    description: &'a str,
    versions: Vec<VersionVariant>,
    fallback: Option<&'a str>,
    latest: String,
    github: String,
}

impl<'a> ProjectSummary<'a> {
    fn new(project: &'a Project, area: &str, org: &str) -> Self {
        Self {
            name: &project.name,
            description: &project.description,
            versions: version::version_variants(project),
            fallback: version::resolve_fallback(project),
            latest: project.latest_path(area),
            github: project.github_url(org),
        }
    }

    /// Versions as `code` or `code (name)` when they differ.
    fn versions_line(&self) -> String {
        if self.versions.is_empty() {
            return "unversioned".to_owned();
        }
        self.versions
            .iter()
            .map(|v| {
                if v.code == v.name {
                    v.code.clone()
                } else {
                    format!("{} ({})", v.code, v.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ProjectsArgs {
    /// List projects from the projects file.
    pub(crate) fn execute(self, site: &SiteArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = site.load_config()?;
        let registry = load_projects(&config)?;

        let summaries: Vec<ProjectSummary<'_>> = registry
            .iter()
            .map(|p| ProjectSummary::new(p, &config.docs_resolved.area, &config.site.github_org))
            .collect();

        if self.json {
            output.data(&serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        for summary in &summaries {
            output.highlight(summary.name);
            if !summary.description.is_empty() {
                output.info(&format!("  {}", summary.description));
            }
            output.info(&format!("  Versions: {}", summary.versions_line()));
            if let Some(fallback) = summary.fallback {
                output.info(&format!("  Fallback: {fallback}"));
            }
            output.info(&format!("  Latest:   {}", summary.latest));
            output.info(&format!("  GitHub:   {}", summary.github));
        }
        output.success(&format!("{} projects", summaries.len()));
        Ok(())
    }
}
