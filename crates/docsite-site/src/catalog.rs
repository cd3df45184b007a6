//! Page catalog for the documentation sitemap.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by indices. A page's parent is the nearest ancestor URL present in
//! the catalog, so `/gems/dry-types/1.2/guide/` hangs under
//! `/gems/dry-types/1.2/` even when intermediate directories have no page.
//!
//! The catalog is immutable once built and can be shared across threads.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A page in the documentation sitemap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Rendered URL (e.g. `/gems/dry-types/1.2/guide/`).
    pub url: String,
    /// Output path relative to the build directory
    /// (e.g. `gems/dry-types/1.2/guide/index.html`).
    pub path: String,
    /// Page title.
    pub title: String,
    /// Display name for this page and its descendants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered child section names (index pages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<String>>,
    /// Page type used for listings.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    /// Listing group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Listing order within a type or group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Page {
    /// Create a page with an output path derived from its URL.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let url = url.into();
        let path = output_path_for_url(&url);
        Self {
            url,
            path,
            title: title.into(),
            name: None,
            sections: None,
            page_type: None,
            group: None,
            order: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare ordered child sections.
    #[must_use]
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = Some(sections.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Output path for a directory-index URL.
///
/// - `"/"` -> `"index.html"`
/// - `"/docs/usage/"` -> `"docs/usage/index.html"`
/// - `"/feed.xml"` -> `"feed.xml"`
pub(crate) fn output_path_for_url(url: &str) -> String {
    let trimmed = url.trim_start_matches('/');
    if trimmed.is_empty() {
        "index.html".to_owned()
    } else if trimmed.ends_with('/') {
        format!("{trimmed}index.html")
    } else {
        trimmed.to_owned()
    }
}

/// Parent URL candidate one level up.
///
/// `"/a/b/"` -> `"/a/"`, `"/a/"` -> `"/"`, `"/"` -> `None`.
fn parent_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .rsplit_once('/')
        .map(|(parent, _)| format!("{parent}/"))
}

/// Error raised while building the catalog from a source tree.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid front matter block.
    #[error("Invalid front matter in {}: {message}", .path.display())]
    FrontMatter { path: PathBuf, message: String },
}

/// Read-only collection of all documentation pages.
#[derive(Debug, Default)]
pub struct PageCatalog {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    url_index: HashMap<String, usize>,
}

impl PageCatalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build a catalog from a list of pages.
    #[must_use]
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        let mut builder = CatalogBuilder::new();
        for page in pages {
            builder.add_page(page);
        }
        builder.build()
    }

    /// Get page by URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.url_index.get(url).map(|&i| &self.pages[i])
    }

    /// Nearest ancestor page.
    #[must_use]
    pub fn parent(&self, url: &str) -> Option<&Page> {
        let &idx = self.url_index.get(url)?;
        self.parents[idx].map(|p| &self.pages[p])
    }

    /// Direct children in catalog order.
    #[must_use]
    pub fn children(&self, url: &str) -> Vec<&Page> {
        self.url_index
            .get(url)
            .map(|&idx| self.children[idx].iter().map(|&c| &self.pages[c]).collect())
            .unwrap_or_default()
    }

    /// Display name inherited from the nearest page (self included) with `name` set.
    #[must_use]
    pub fn display_name(&self, url: &str) -> Option<&str> {
        let mut current = self.url_index.get(url).copied();
        while let Some(idx) = current {
            if let Some(name) = self.pages[idx].name.as_deref() {
                return Some(name);
            }
            current = self.parents[idx];
        }
        None
    }

    /// Pages of a given type, sorted by `order` then URL.
    #[must_use]
    pub fn pages_by_type(&self, page_type: &str) -> Vec<&Page> {
        self.sorted_listing(|page| page.page_type.as_deref() == Some(page_type))
    }

    /// Pages of a given group, sorted by `order` then URL.
    #[must_use]
    pub fn pages_by_group(&self, group: &str) -> Vec<&Page> {
        self.sorted_listing(|page| page.group.as_deref() == Some(group))
    }

    fn sorted_listing(&self, filter: impl Fn(&Page) -> bool) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().filter(|p| filter(p)).collect();
        // Pages without an order sort last
        pages.sort_by(|a, b| {
            a.order
                .is_none()
                .cmp(&b.order.is_none())
                .then_with(|| a.order.cmp(&b.order))
                .then_with(|| a.url.cmp(&b.url))
        });
        pages
    }

    /// All pages in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> IntoIterator for &'a PageCatalog {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Builder for constructing [`PageCatalog`] instances.
#[derive(Default)]
pub struct CatalogBuilder {
    pages: Vec<Page>,
    url_index: HashMap<String, usize>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. A second page with an already known URL is ignored.
    pub fn add_page(&mut self, page: Page) -> &mut Self {
        if self.url_index.contains_key(&page.url) {
            tracing::warn!(url = %page.url, path = %page.path, "Duplicate page URL ignored");
            return self;
        }
        self.url_index.insert(page.url.clone(), self.pages.len());
        self.pages.push(page);
        self
    }

    /// Link parents and children and freeze the catalog.
    #[must_use]
    pub fn build(self) -> PageCatalog {
        let Self { pages, url_index } = self;

        let parents: Vec<Option<usize>> = pages
            .iter()
            .map(|page| {
                let mut candidate = parent_url(&page.url);
                while let Some(url) = candidate {
                    if let Some(&idx) = url_index.get(&url) {
                        return Some(idx);
                    }
                    candidate = parent_url(&url);
                }
                None
            })
            .collect();

        let mut children = vec![Vec::new(); pages.len()];
        for (idx, parent) in parents.iter().enumerate() {
            if let Some(parent) = *parent {
                children[parent].push(idx);
            }
        }

        tracing::debug!(pages = pages.len(), "Built page catalog");

        PageCatalog {
            pages,
            children,
            parents,
            url_index,
        }
    }
}
