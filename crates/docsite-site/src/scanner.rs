//! Page discovery by filesystem walking.
//!
//! Markdown sources map to directory-index URLs:
//! - `index.html.md` -> `/`
//! - `news.html.md` -> `/news/`
//! - `gems/dry-types/1.2/index.html.md` -> `/gems/dry-types/1.2/`
//! - `gems/dry-types/1.2/extensions.html.md` -> `/gems/dry-types/1.2/extensions/`
//!
//! Page attributes come from a YAML front matter block delimited by `---`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::{CatalogError, CatalogBuilder, Page, PageCatalog, output_path_for_url};

/// Front matter fields recognized on a page.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    name: Option<String>,
    sections: Option<Vec<String>>,
    #[serde(rename = "type")]
    page_type: Option<String>,
    group: Option<String>,
    order: Option<i64>,
}

impl PageCatalog {
    /// Build a catalog from the markdown files under `source_dir`.
    ///
    /// Hidden files and directories are skipped. A missing source directory
    /// yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a file cannot be read or has malformed
    /// front matter.
    pub fn scan(source_dir: &Path) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new();
        if source_dir.is_dir() {
            scan_directory(source_dir, "", &mut builder)?;
        } else {
            tracing::warn!(path = %source_dir.display(), "Source directory not found");
        }
        Ok(builder.build())
    }
}

fn scan_directory(
    dir_path: &Path,
    url_prefix: &str,
    builder: &mut CatalogBuilder,
) -> Result<(), CatalogError> {
    let mut entries: Vec<_> = fs::read_dir(dir_path)
        .map_err(io_error(dir_path))?
        .filter_map(Result::ok)
        .collect();
    // Sorted for a reproducible catalog order
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_prefix = format!("{url_prefix}{file_name}/");
            scan_directory(&path, &child_prefix, builder)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            let content = fs::read_to_string(&path).map_err(io_error(&path))?;
            let page = build_page(&path, &file_name, url_prefix, &content)?;
            tracing::debug!(url = %page.url, source = %path.display(), "Discovered page");
            builder.add_page(page);
        }
    }

    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError {
    let path = path.to_path_buf();
    move |source| CatalogError::Io { path, source }
}

/// Create a page from a markdown source file.
fn build_page(
    path: &Path,
    file_name: &str,
    url_prefix: &str,
    content: &str,
) -> Result<Page, CatalogError> {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    let url = if stem == "index" {
        format!("/{url_prefix}")
    } else {
        format!("/{url_prefix}{stem}/")
    };

    let front_matter =
        extract_front_matter(content).map_err(|message| CatalogError::FrontMatter {
            path: PathBuf::from(path),
            message,
        })?;

    let title = front_matter
        .title
        .unwrap_or_else(|| fallback_title(&url));

    Ok(Page {
        path: output_path_for_url(&url),
        url,
        title,
        name: front_matter.name,
        sections: front_matter.sections,
        page_type: front_matter.page_type,
        group: front_matter.group,
        order: front_matter.order,
    })
}

/// Parse the leading `---` YAML block, if any.
fn extract_front_matter(source: &str) -> Result<FrontMatter, String> {
    let trimmed = source.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok(FrontMatter::default());
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return Err("unclosed front matter block, missing closing ---".to_owned());
    };

    let yaml = after_open[..close_pos].trim();
    if yaml.is_empty() {
        return Ok(FrontMatter::default());
    }

    serde_yaml::from_str(yaml).map_err(|e| format!("Invalid YAML: {e}"))
}

/// Title derived from the last URL segment (`getting-started` -> `Getting Started`).
fn fallback_title(url: &str) -> String {
    let Some(segment) = url.trim_end_matches('/').rsplit('/').next().filter(|s| !s.is_empty())
    else {
        return "Home".to_owned();
    };

    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
