//! `docsite switcher` command implementation.

use clap::Args;
use docsite_site::version;

use super::{SiteArgs, load_projects, project_for};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the switcher command.
#[derive(Args)]
pub(crate) struct SwitcherArgs {
    /// Page URL (e.g. /gems/dry-types/1.2/getting-started/).
    url: String,
}

impl SwitcherArgs {
    /// Print version-switcher options for the page as JSON.
    pub(crate) fn execute(self, site: &SiteArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = site.load_config()?;
        let registry = load_projects(&config)?;
        let project = project_for(&registry, &config, &self.url)?;

        if !project.is_versioned() {
            output.warning(&format!("{} has no versions", project.name));
        }

        let options = version::version_switcher(&self.url, project)?;
        output.data(&serde_json::to_string_pretty(&options)?);
        Ok(())
    }
}
