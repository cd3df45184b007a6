//! `docsite nav` command implementation.

use clap::Args;
use docsite_site::{NavigationBuilder, page_title};

use super::{SiteArgs, load_catalog, load_projects};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Page URL (e.g. /gems/dry-types/1.2/getting-started/).
    url: String,
}

impl NavArgs {
    /// Print the navigation tree of the page as JSON.
    pub(crate) fn execute(self, site: &SiteArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = site.load_config()?;
        let registry = load_projects(&config)?;
        let catalog = load_catalog(&config)?;

        let project = registry.for_url(&self.url, &config.docs_resolved.area);
        let nav = NavigationBuilder::new(&catalog, project).build_for_url(&self.url)?;

        output.highlight(&page_title(
            &config.site.title,
            &catalog,
            project,
            &self.url,
        ));
        output.data(&serde_json::to_string_pretty(&nav)?);
        Ok(())
    }
}
