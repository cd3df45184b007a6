//! Sidebar navigation built from declared page sections.
//!
//! A page lists its children by name in `sections`; each name resolves to
//! the child page whose path below the declaring page contains it. The resulting [`NavLink`] tree
//! follows `sections` order, not catalog order.
//!
//! Unresolvable roots and sections are authoring errors and abort the build.

use serde::Serialize;

use crate::catalog::{Page, PageCatalog};
use crate::project::Project;
use crate::version::{self, VersionError};

/// Segments forming the navigation root of an unversioned URL
/// (`"", area, project`).
const ROOT_SEGMENTS: usize = 3;

/// Navigation link with children for the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display title.
    pub title: String,
    /// Link target (version-resolved, no trailing slash).
    pub url: String,
    /// True when this link points at the page being rendered.
    pub active: bool,
    /// Whether children render inside their own sub-list.
    ///
    /// False only for the root link, whose children are rendered flat.
    pub nested: bool,
    /// Child links in `sections` order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavLink>,
}

/// Error raised while assembling navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// No page at the navigation root prefix.
    #[error("Page for {prefix} not found")]
    PageNotFound { prefix: String },
    /// A declared section matches no child page.
    #[error("Section {section:?} declared by {page} not found")]
    SectionNotFound { section: String, page: String },
    /// Link version could not be resolved.
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Builds [`NavLink`] trees from a read-only page catalog.
pub struct NavigationBuilder<'a> {
    catalog: &'a PageCatalog,
    project: Option<&'a Project>,
}

impl<'a> NavigationBuilder<'a> {
    /// Create a builder; `project` is the project owning the rendered page, if any.
    #[must_use]
    pub fn new(catalog: &'a PageCatalog, project: Option<&'a Project>) -> Self {
        Self { catalog, project }
    }

    /// URL of the navigation root for `current_url`.
    ///
    /// Versioned project URLs keep the version segment
    /// (`/gems/dry-types/1.2/`), everything else stops after the third
    /// segment (`/gems/dry-core/`).
    #[must_use]
    pub fn root_url(&self, current_url: &str) -> String {
        let versioned = self
            .project
            .is_some_and(|project| version::url_version(current_url, project).is_some());
        let count = if versioned {
            ROOT_SEGMENTS + 1
        } else {
            ROOT_SEGMENTS
        };

        let prefix = current_url.split('/').take(count).collect::<Vec<_>>().join("/");
        if prefix.ends_with('/') {
            prefix
        } else {
            format!("{prefix}/")
        }
    }

    /// Find the navigation root page for `current_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::PageNotFound`] if no page exists at the root URL.
    pub fn root_for(&self, current_url: &str) -> Result<&'a Page, NavigationError> {
        let prefix = self.root_url(current_url);
        self.catalog
            .get(&prefix)
            .ok_or(NavigationError::PageNotFound { prefix })
    }

    /// Build the navigation tree for the page at `current_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if the root page or a declared section is missing.
    pub fn build_for_url(&self, current_url: &str) -> Result<NavLink, NavigationError> {
        let root = self.root_for(current_url)?;
        self.build(root, current_url)
    }

    /// Build the navigation tree below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if a declared section is missing.
    pub fn build(&self, root: &Page, current_url: &str) -> Result<NavLink, NavigationError> {
        tracing::debug!(root = %root.url, current = %current_url, "Building navigation");
        self.link(root, current_url, false)
    }

    fn link(&self, page: &Page, current_url: &str, nested: bool) -> Result<NavLink, NavigationError> {
        let children = match &page.sections {
            Some(sections) => sections
                .iter()
                .map(|name| {
                    let child = self.resolve_section(page, name)?;
                    self.link(child, current_url, true)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(NavLink {
            title: page.title.clone(),
            url: self.link_url(&page.url)?,
            active: page.url == current_url,
            nested,
            children,
        })
    }

    /// Resolve a section name to a child of `page`.
    ///
    /// Candidates are ordered by ascending path length, then URL; the first
    /// whose path contains `name` wins. Only the part of the path below the
    /// directory of `page` is compared, so `types` does not match every
    /// child of `dry-types/` through its ancestor directory.
    fn resolve_section(&self, page: &Page, name: &str) -> Result<&'a Page, NavigationError> {
        let mut candidates = self.catalog.children(&page.url);
        candidates.sort_by(|a, b| {
            a.path
                .len()
                .cmp(&b.path.len())
                .then_with(|| a.url.cmp(&b.url))
        });

        let base_dir = page.path.rsplit_once('/').map_or("", |(dir, _)| dir);
        candidates
            .into_iter()
            .find(|child| {
                child
                    .path
                    .strip_prefix(base_dir)
                    .unwrap_or(child.path.as_str())
                    .contains(name)
            })
            .ok_or_else(|| NavigationError::SectionNotFound {
                section: name.to_owned(),
                page: page.url.clone(),
            })
    }

    /// Link target for a page URL.
    ///
    /// Version-less links of a versioned project point at its fallback version.
    fn link_url(&self, url: &str) -> Result<String, NavigationError> {
        let resolved = match self.project {
            Some(project) if version::url_version(url, project).is_none() => {
                match version::resolve_fallback(project) {
                    Some(fallback) => version::rewrite_version(url, fallback, project)?,
                    None => url.to_owned(),
                }
            }
            _ => url.to_owned(),
        };
        Ok(normalize_link(&resolved))
    }
}

/// Drop the trailing slash and collapse doubled slashes.
fn normalize_link(url: &str) -> String {
    let mut normalized = url.strip_suffix('/').unwrap_or(url).to_owned();
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    if normalized.is_empty() {
        "/".to_owned()
    } else {
        normalized
    }
}

/// Sidebar heading for a URL: the project segment (`/gems/<name>/`).
#[must_use]
pub fn nav_header(url: &str) -> Option<&str> {
    url.split('/').nth(2).filter(|s| !s.is_empty())
}

/// Full HTML title for the page at `url`.
///
/// Joins the site title, a header (`<project> v1.2` for project pages, the
/// inherited display name otherwise) and the page title with `" - "`.
#[must_use]
pub fn page_title(
    site_title: &str,
    catalog: &PageCatalog,
    project: Option<&Project>,
    url: &str,
) -> String {
    let header = match project {
        Some(project) => {
            let version = version::url_version(url, project)
                .or_else(|| version::resolve_fallback(project));
            Some(match version {
                Some(v) => format!("{} {}", project.name, version::version_label(v)),
                None => project.name.clone(),
            })
        }
        None => catalog.display_name(url).map(str::to_owned),
    };
    let title = catalog.get(url).map(|page| page.title.as_str());

    [Some(site_title), header.as_deref(), title]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::project::Version;

    fn docs_catalog() -> PageCatalog {
        PageCatalog::from_pages([
            Page::new("/docs/", "Docs").with_sections(["usage", "install"]),
            Page::new("/docs/install/", "Install"),
            Page::new("/docs/usage/", "Usage"),
        ])
    }

    fn versioned_project() -> Project {
        Project::new("dry-types")
            .with_versions(vec![
                Version::Bare("1.2".to_owned()),
                Version::Bare("1.1".to_owned()),
            ])
            .with_fallback("1.2")
    }

    fn titles(links: &[NavLink]) -> Vec<&str> {
        links.iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn test_children_follow_sections_order() {
        let catalog = docs_catalog();
        let builder = NavigationBuilder::new(&catalog, None);
        let root = catalog.get("/docs/").unwrap();

        let nav = builder.build(root, "/docs/").unwrap();

        assert_eq!(nav.title, "Docs");
        assert_eq!(titles(&nav.children), vec!["Usage", "Install"]);
        assert_eq!(nav.children[0].url, "/docs/usage");
    }

    #[test]
    fn test_missing_section_is_error() {
        let catalog = PageCatalog::from_pages([
            Page::new("/docs/", "Docs").with_sections(["usage", "changelog"]),
            Page::new("/docs/usage/", "Usage"),
        ]);
        let builder = NavigationBuilder::new(&catalog, None);

        let err = builder
            .build(catalog.get("/docs/").unwrap(), "/docs/")
            .unwrap_err();

        assert!(
            matches!(err, NavigationError::SectionNotFound { ref section, ref page } if section == "changelog" && page == "/docs/")
        );
        assert!(err.to_string().contains("changelog"));
    }

    #[test]
    fn test_active_flag_is_exact_match() {
        let catalog = docs_catalog();
        let builder = NavigationBuilder::new(&catalog, None);
        let root = catalog.get("/docs/").unwrap();

        let nav = builder.build(root, "/docs/install/").unwrap();

        assert!(!nav.active);
        assert!(!nav.children[0].active);
        assert!(nav.children[1].active);

        let nav = builder.build(root, "/docs/install/extra/").unwrap();
        assert!(nav.children.iter().all(|l| !l.active));
    }

    #[test]
    fn test_root_is_flat_and_descendants_nested() {
        let catalog = PageCatalog::from_pages([
            Page::new("/docs/", "Docs").with_sections(["guide"]),
            Page::new("/docs/guide/", "Guide").with_sections(["advanced"]),
            Page::new("/docs/guide/advanced/", "Advanced"),
        ]);
        let builder = NavigationBuilder::new(&catalog, None);

        let nav = builder
            .build(catalog.get("/docs/").unwrap(), "/docs/guide/advanced/")
            .unwrap();

        assert!(!nav.nested);
        let guide = &nav.children[0];
        assert!(guide.nested);
        assert_eq!(titles(&guide.children), vec!["Advanced"]);
        assert!(guide.children[0].nested);
        assert!(guide.children[0].active);
    }

    #[test]
    fn test_shorter_path_wins_section_match() {
        let catalog = PageCatalog::from_pages([
            Page::new("/docs/", "Docs").with_sections(["types", "custom-types"]),
            Page::new("/docs/custom-types/", "Custom Types"),
            Page::new("/docs/types/", "Types"),
        ]);
        let builder = NavigationBuilder::new(&catalog, None);

        let nav = builder
            .build(catalog.get("/docs/").unwrap(), "/docs/")
            .unwrap();

        assert_eq!(titles(&nav.children), vec!["Types", "Custom Types"]);
    }

    #[test]
    fn test_section_match_ignores_parent_directories() {
        let catalog = PageCatalog::from_pages([
            Page::new("/gems/dry-types/", "Introduction").with_sections(["types", "extensions"]),
            Page::new("/gems/dry-types/extensions/", "Extensions"),
            Page::new("/gems/dry-types/built-in-types/", "Built-in Types"),
        ]);
        let builder = NavigationBuilder::new(&catalog, None);

        let nav = builder.build_for_url("/gems/dry-types/").unwrap();

        assert_eq!(titles(&nav.children), vec!["Built-in Types", "Extensions"]);
    }

    #[test]
    fn test_leaf_without_sections_has_no_children() {
        let catalog = docs_catalog();
        let builder = NavigationBuilder::new(&catalog, None);

        let nav = builder
            .build(catalog.get("/docs/usage/").unwrap(), "/docs/usage/")
            .unwrap();

        assert!(nav.children.is_empty());
    }

    #[test]
    fn test_root_url_for_unversioned_and_versioned_urls() {
        let catalog = PageCatalog::default();
        let project = versioned_project();

        let plain = NavigationBuilder::new(&catalog, None);
        assert_eq!(plain.root_url("/gems/dry-core/guide/"), "/gems/dry-core/");
        assert_eq!(plain.root_url("/gems/dry-types/1.2/guide/"), "/gems/dry-types/");
        assert_eq!(plain.root_url("/news/"), "/news/");
        assert_eq!(plain.root_url("/"), "/");

        let versioned = NavigationBuilder::new(&catalog, Some(&project));
        assert_eq!(
            versioned.root_url("/gems/dry-types/1.2/guide/"),
            "/gems/dry-types/1.2/"
        );
        assert_eq!(
            versioned.root_url("/gems/dry-types/guide/"),
            "/gems/dry-types/"
        );
    }

    #[test]
    fn test_missing_root_is_page_not_found() {
        let catalog = docs_catalog();
        let builder = NavigationBuilder::new(&catalog, None);

        let err = builder.build_for_url("/gems/dry-core/guide/").unwrap_err();

        assert!(
            matches!(err, NavigationError::PageNotFound { ref prefix } if prefix == "/gems/dry-core/")
        );
    }

    #[test]
    fn test_versioned_project_navigation() {
        let project = versioned_project();
        let catalog = PageCatalog::from_pages([
            Page::new("/gems/dry-types/1.1/", "Introduction")
                .with_sections(["getting-started"]),
            Page::new("/gems/dry-types/1.1/getting-started/", "Getting Started"),
            Page::new("/gems/dry-types/1.2/", "Introduction")
                .with_sections(["getting-started"]),
            Page::new("/gems/dry-types/1.2/getting-started/", "Getting Started (1.2)"),
        ]);
        let builder = NavigationBuilder::new(&catalog, Some(&project));

        let nav = builder
            .build_for_url("/gems/dry-types/1.1/getting-started/")
            .unwrap();

        assert_eq!(nav.url, "/gems/dry-types/1.1");
        assert_eq!(nav.children[0].url, "/gems/dry-types/1.1/getting-started");
        assert_eq!(nav.children[0].title, "Getting Started");
        assert!(nav.children[0].active);
    }

    #[test]
    fn test_versionless_links_point_at_fallback() {
        let project = versioned_project();
        let catalog = PageCatalog::from_pages([
            Page::new("/gems/dry-types/", "Introduction").with_sections(["guide"]),
            Page::new("/gems/dry-types/guide/", "Guide"),
        ]);
        let builder = NavigationBuilder::new(&catalog, Some(&project));

        let nav = builder.build_for_url("/gems/dry-types/guide/").unwrap();

        assert_eq!(nav.url, "/gems/dry-types/1.2");
        assert_eq!(nav.children[0].url, "/gems/dry-types/1.2/guide");
        assert!(nav.children[0].active);
    }

    #[test]
    fn test_unversioned_project_links_unchanged() {
        let project = Project::new("dry-core");
        let catalog = PageCatalog::from_pages([
            Page::new("/gems/dry-core/", "Introduction").with_sections(["extensions"]),
            Page::new("/gems/dry-core/extensions/", "Extensions"),
        ]);
        let builder = NavigationBuilder::new(&catalog, Some(&project));

        let nav = builder.build_for_url("/gems/dry-core/").unwrap();

        assert_eq!(nav.url, "/gems/dry-core");
        assert_eq!(nav.children[0].url, "/gems/dry-core/extensions");
    }

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link("/docs/usage/"), "/docs/usage");
        assert_eq!(normalize_link("/docs//usage"), "/docs/usage");
        assert_eq!(normalize_link("/"), "/");
    }

    #[test]
    fn test_nav_link_serialization_skips_empty_children() {
        let link = NavLink {
            title: "Usage".to_owned(),
            url: "/docs/usage".to_owned(),
            active: false,
            nested: true,
            children: Vec::new(),
        };

        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Usage",
                "url": "/docs/usage",
                "active": false,
                "nested": true,
            })
        );
    }

    #[test]
    fn test_nav_header() {
        assert_eq!(nav_header("/gems/dry-types/1.2/guide/"), Some("dry-types"));
        assert_eq!(nav_header("/news/"), None);
    }

    #[test]
    fn test_page_title_for_project_page() {
        let project = versioned_project();
        let catalog = PageCatalog::from_pages([Page::new(
            "/gems/dry-types/1.1/getting-started/",
            "Getting Started",
        )]);

        assert_eq!(
            page_title(
                "dry-rb",
                &catalog,
                Some(&project),
                "/gems/dry-types/1.1/getting-started/"
            ),
            "dry-rb - dry-types v1.1 - Getting Started"
        );
    }

    #[test]
    fn test_page_title_uses_inherited_name() {
        let catalog = PageCatalog::from_pages([
            Page::new("/learn/", "Learn").with_name("Guides"),
            Page::new("/learn/forms/", "Forms"),
        ]);

        assert_eq!(
            page_title("dry-rb", &catalog, None, "/learn/forms/"),
            "dry-rb - Guides - Forms"
        );
        assert_eq!(page_title("dry-rb", &catalog, None, "/missing/"), "dry-rb");
    }
}
