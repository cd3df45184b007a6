//! Project registry, version resolution and navigation for the docs site.
//!
//! This crate provides:
//! - [`ProjectRegistry`]: project metadata loaded from `projects.yaml`
//! - [`version`]: version tokens in documentation URLs
//! - [`PageCatalog`]: pages discovered from the source tree
//! - [`NavigationBuilder`]: sidebar trees from declared page sections
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docsite_site::{NavigationBuilder, PageCatalog, ProjectRegistry};
//!
//! let registry = ProjectRegistry::load(Path::new("data/projects.yaml"))?;
//! let catalog = PageCatalog::scan(Path::new("source"))?;
//!
//! let url = "/gems/dry-types/1.2/getting-started/";
//! let builder = NavigationBuilder::new(&catalog, registry.for_url(url, "gems"));
//! let nav = builder.build_for_url(url)?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod catalog;
pub(crate) mod navigation;
pub(crate) mod project;
mod scanner;
pub mod typography;
pub mod version;

pub use catalog::{CatalogBuilder, CatalogError, Page, PageCatalog};
pub use navigation::{NavLink, NavigationBuilder, NavigationError, nav_header, page_title};
pub use project::{ConfigurationError, Project, ProjectRegistry, Seo, Version, project_name};
pub use version::{VersionError, VersionOption, VersionVariant};
