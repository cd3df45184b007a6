//! `docsite check` command implementation.

use clap::Args;
use docsite_site::{NavigationBuilder, PageCatalog, ProjectRegistry, project_name, version};

use super::{SiteArgs, load_catalog, load_projects};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Also check pages outside the project area.
    #[arg(long)]
    all: bool,
}

/// Page that failed to check.
#[derive(Debug)]
struct PageFailure {
    url: String,
    message: String,
}

/// Outcome of checking a catalog.
#[derive(Debug, Default)]
struct CheckReport {
    checked: usize,
    failures: Vec<PageFailure>,
}

impl CheckArgs {
    /// Build navigation and version options for every selected page.
    pub(crate) fn execute(self, site: &SiteArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = site.load_config()?;
        let registry = load_projects(&config)?;
        let catalog = load_catalog(&config)?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Projects: {} ({})",
            registry.len(),
            config.docs_resolved.projects_file.display()
        ));

        let area = &config.docs_resolved.area;
        let area_prefix = format!("/{area}/");
        let report = check_pages(&catalog, &registry, area, |url| {
            self.all || url.starts_with(&area_prefix)
        });

        for failure in &report.failures {
            output.error(&format!("{}: {}", failure.url, failure.message));
        }

        if report.failures.is_empty() {
            output.success(&format!("Checked {} pages", report.checked));
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} of {} pages failed",
                report.failures.len(),
                report.checked
            )))
        }
    }
}

/// Check every page accepted by `select`.
///
/// Pages under `/<area>/<project>/` must belong to a registered project and
/// produce version-switcher options; every page must build its navigation.
fn check_pages(
    catalog: &PageCatalog,
    registry: &ProjectRegistry,
    area: &str,
    select: impl Fn(&str) -> bool,
) -> CheckReport {
    let mut report = CheckReport::default();

    for page in catalog.iter().filter(|page| select(&page.url)) {
        report.checked += 1;
        if let Err(message) = check_page(catalog, registry, area, &page.url) {
            tracing::debug!(url = %page.url, %message, "Page check failed");
            report.failures.push(PageFailure {
                url: page.url.clone(),
                message,
            });
        }
    }

    report
}

fn check_page(
    catalog: &PageCatalog,
    registry: &ProjectRegistry,
    area: &str,
    url: &str,
) -> Result<(), String> {
    let project = registry.for_url(url, area);
    if let Some(name) = project_name(url, area)
        && project.is_none()
    {
        return Err(format!("Unknown project {name:?}"));
    }

    NavigationBuilder::new(catalog, project)
        .build_for_url(url)
        .map_err(|e| e.to_string())?;

    if let Some(project) = project {
        version::version_switcher(url, project).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use docsite_site::{Page, Project, Version};
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> ProjectRegistry {
        ProjectRegistry::new(vec![
            Project::new("dry-types")
                .with_versions(vec![Version::Bare("1.2".to_owned())])
                .with_fallback("1.2"),
            Project::new("dry-core"),
        ])
        .unwrap()
    }

    #[test]
    fn test_check_pages_reports_failures() {
        let catalog = PageCatalog::from_pages([
            Page::new("/", "dry-rb"),
            Page::new("/gems/dry-types/1.2/", "Introduction").with_sections(["getting-started"]),
            Page::new("/gems/dry-types/1.2/getting-started/", "Getting Started"),
            Page::new("/gems/dry-core/", "Introduction").with_sections(["extensions"]),
            Page::new("/gems/dry-logic/", "Introduction"),
        ]);

        let report = check_pages(&catalog, &registry(), "gems", |url| {
            url.starts_with("/gems/")
        });

        assert_eq!(report.checked, 4);
        let failed: Vec<&str> = report.failures.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(failed, vec!["/gems/dry-core/", "/gems/dry-logic/"]);
        assert!(report.failures[0].message.contains("extensions"));
        assert!(report.failures[1].message.contains("dry-logic"));
    }

    #[test]
    fn test_check_pages_all_valid() {
        let catalog = PageCatalog::from_pages([
            Page::new("/gems/dry-core/", "Introduction").with_sections(["extensions"]),
            Page::new("/gems/dry-core/extensions/", "Extensions"),
        ]);

        let report = check_pages(&catalog, &registry(), "gems", |_| true);

        assert_eq!(report.checked, 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_check_pages_outside_area_need_no_project() {
        let catalog = PageCatalog::from_pages([
            Page::new("/learn/", "Learn").with_sections(["forms"]),
            Page::new("/learn/forms/", "Forms"),
            Page::new("/gems/dry-core/", "Introduction"),
        ]);

        let report = check_pages(&catalog, &registry(), "gems", |_| true);

        assert_eq!(report.checked, 3);
        assert!(report.failures.is_empty(), "{:?}", report.failures);
    }
}
