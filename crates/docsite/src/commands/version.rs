//! `docsite version` command implementation.

use clap::Args;
use docsite_site::version;

use super::{SiteArgs, load_projects, project_for};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the version command.
#[derive(Args)]
pub(crate) struct VersionArgs {
    /// Documentation URL (e.g. /gems/dry-types/1.2/getting-started/).
    url: String,

    /// Rewrite the URL to this version instead of printing its version.
    #[arg(long)]
    to: Option<String>,
}

impl VersionArgs {
    pub(crate) fn execute(self, site: &SiteArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = site.load_config()?;
        let registry = load_projects(&config)?;
        let project = project_for(&registry, &config, &self.url)?;

        if let Some(target) = &self.to {
            let rewritten = version::rewrite_version(&self.url, target, project)?;
            output.data(&rewritten);
            return Ok(());
        }

        if let Some(found) = version::url_version(&self.url, project) {
            output.data(found);
        } else if let Some(fallback) = version::resolve_fallback(project) {
            output.warning(&format!("No version in URL, using fallback {fallback}"));
            output.data(fallback);
        } else {
            output.warning(&format!("{} has no versions", project.name));
        }
        Ok(())
    }
}
