//! Version tokens embedded in documentation URLs.
//!
//! Project documentation lives under `/<area>/<project>/<version>/...`.
//! A numeric version token is the first run of a digit followed by digits
//! and dots that ends in a slash (`1.2.0/`), wherever it appears in the URL.
//! Branch names such as `master` never match the numeric pattern; they are
//! recognized only at the version position (segment 3) when the project
//! lists them or they are a conventional branch name.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::project::Project;

/// Numeric version token followed by a slash.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d[\d.]*)/").unwrap());

/// A complete numeric version code.
static NUMERIC_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d[\d.]*$").unwrap());

/// Branch names accepted as version tokens without being listed.
const BRANCH_NAMES: [&str; 2] = ["master", "main"];

/// Index of the version segment in `"/area/project/version/..".split('/')`.
const VERSION_SEGMENT: usize = 3;

/// Version used when a project has no numeric release.
const DEFAULT_BRANCH: &str = "main";

/// Error returned by URL version rewriting.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// URL has too few segments to hold a version.
    #[error("Invalid documentation path {url:?}: expected /<area>/<project>/...")]
    InvalidPath { url: String },
    /// Target version is neither numeric, a branch, nor listed by the project.
    #[error("Unknown version {version:?} for project {project}")]
    UnknownVersion { version: String, project: String },
}

/// Uniform display entry for a project version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionVariant {
    pub code: String,
    pub name: String,
}

/// Entry of the version-switcher dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionOption {
    pub code: String,
    pub name: String,
    /// Current URL rewritten to this version.
    pub url: String,
    pub selected: bool,
}

/// Extract the numeric version token from a URL.
///
/// Returns the first digit-and-dot run followed by a slash, without the slash.
///
/// ```
/// use docsite_site::version::extract_version;
///
/// assert_eq!(extract_version("/gems/dry-types/1.2.0/index.html"), Some("1.2.0"));
/// assert_eq!(extract_version("/gems/dry-types/master/index.html"), None);
/// ```
#[must_use]
pub fn extract_version(url: &str) -> Option<&str> {
    version_match(url).map(|m| m.as_str())
}

/// Whether the URL carries a numeric version token.
#[must_use]
pub fn has_version(url: &str) -> bool {
    extract_version(url).is_some()
}

fn version_match(url: &str) -> Option<regex::Match<'_>> {
    VERSION_RE.captures(url).and_then(|caps| caps.get(1))
}

/// Fallback version of a project, `None` when the project is unversioned.
#[must_use]
pub fn resolve_fallback(project: &Project) -> Option<&str> {
    if project.is_versioned() {
        project.fallback_version.as_deref()
    } else {
        None
    }
}

/// Explicitly configured current version.
#[must_use]
pub fn current_version(project: &Project) -> Option<&str> {
    project.current_version.as_deref()
}

/// Normalize the version list into `{code, name}` pairs, keeping order.
#[must_use]
pub fn version_variants(project: &Project) -> Vec<VersionVariant> {
    project
        .versions
        .iter()
        .map(|v| VersionVariant {
            code: v.code().to_owned(),
            name: v.name().to_owned(),
        })
        .collect()
}

/// Version a URL points at for `project`.
///
/// Prefers a numeric token anywhere in the URL, then a branch or listed
/// code at the version segment.
#[must_use]
pub fn url_version<'a>(url: &'a str, project: &Project) -> Option<&'a str> {
    extract_version(url).or_else(|| {
        url.split('/')
            .nth(VERSION_SEGMENT)
            .filter(|segment| is_named_version(segment, project))
    })
}

/// Rewrite `url` to point at `new_version`.
///
/// Unversioned projects get the URL back unchanged. An existing version
/// token is replaced in place; otherwise the version is inserted as the
/// segment after `/<area>/<project>/`.
///
/// # Errors
///
/// Returns [`VersionError::UnknownVersion`] if `new_version` would not be
/// recognized as a version afterwards, and [`VersionError::InvalidPath`] if
/// a version must be inserted into a URL with fewer than three segments.
pub fn rewrite_version(
    url: &str,
    new_version: &str,
    project: &Project,
) -> Result<String, VersionError> {
    if !project.is_versioned() {
        return Ok(url.to_owned());
    }

    if !is_version_token(new_version, project) {
        return Err(VersionError::UnknownVersion {
            version: new_version.to_owned(),
            project: project.name.clone(),
        });
    }

    if let Some(token) = version_match(url) {
        return Ok(format!(
            "{}{new_version}{}",
            &url[..token.start()],
            &url[token.end()..]
        ));
    }

    let mut segments: Vec<&str> = url.split('/').collect();
    if segments.len() < VERSION_SEGMENT {
        return Err(VersionError::InvalidPath {
            url: url.to_owned(),
        });
    }

    match segments.get(VERSION_SEGMENT) {
        Some(segment) if is_version_token(segment, project) => {
            segments[VERSION_SEGMENT] = new_version;
        }
        _ => segments.insert(VERSION_SEGMENT, new_version),
    }

    Ok(segments.join("/"))
}

/// Display label for a version: `v1.2` for releases, branch names verbatim.
#[must_use]
pub fn version_label(version: &str) -> String {
    if NUMERIC_VERSION_RE.is_match(version) {
        format!("v{version}")
    } else {
        version.to_owned()
    }
}

/// Highest numeric version code, or `main` when there is none.
#[must_use]
pub fn latest_version(project: &Project) -> String {
    project
        .versions
        .iter()
        .map(crate::project::Version::code)
        .filter(|code| NUMERIC_VERSION_RE.is_match(code))
        .max_by(|a, b| compare_versions(a, b))
        .unwrap_or(DEFAULT_BRANCH)
        .to_owned()
}

/// Link target for a `docs::section` markdown reference.
#[must_use]
pub fn docs_link(area: &str, project: &str, version: &str, section: &str) -> String {
    format!("/{area}/{project}/{version}/{section}")
}

/// Options for the version-switcher dropdown of the page at `url`.
///
/// The selected option is the version the URL points at, or the project's
/// fallback when the URL carries none.
///
/// # Errors
///
/// Propagates [`VersionError`] from rewriting the URL.
pub fn version_switcher(url: &str, project: &Project) -> Result<Vec<VersionOption>, VersionError> {
    let selected = url_version(url, project).or_else(|| resolve_fallback(project));

    project
        .versions
        .iter()
        .map(|version| {
            Ok(VersionOption {
                code: version.code().to_owned(),
                name: version.name().to_owned(),
                url: rewrite_version(url, version.code(), project)?,
                selected: selected == Some(version.code()),
            })
        })
        .collect()
}

/// Whether `token` is a numeric version, branch name, or listed code.
fn is_version_token(token: &str, project: &Project) -> bool {
    NUMERIC_VERSION_RE.is_match(token) || is_named_version(token, project)
}

/// Whether a non-numeric segment names a version of `project`.
fn is_named_version(segment: &str, project: &Project) -> bool {
    !segment.is_empty() && (BRANCH_NAMES.contains(&segment) || project.lists_version(segment))
}

/// Compare dotted numeric versions component by component.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            a.get(i)
                .copied()
                .unwrap_or(0)
                .cmp(&b.get(i).copied().unwrap_or(0))
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
