//! Documented projects and their version lists.
//!
//! Projects are loaded once from `projects.yaml` into a [`ProjectRegistry`]
//! and never mutated afterwards.
//!
//! # File Format
//!
//! ```yaml
//! - name: dry-types
//!   desc: Flexible type system for Ruby
//!   versions:
//!     - "0.15"
//!     - code: "1.0"
//!       name: "1.0 beta3"
//!   current_version: "1.0"
//!   fallback_version: "1.0"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A documentation version entry.
///
/// Either a bare code (displayed as-is) or a code with a separate display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Version {
    /// Version whose code doubles as its display name.
    Bare(String),
    /// Version with a display alias (e.g. code `1.0` shown as "1.0 beta3").
    Alias {
        /// Code used in URLs.
        code: String,
        /// Display name.
        name: String,
    },
}

impl Version {
    /// Code used in URLs.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Bare(code) | Self::Alias { code, .. } => code,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Alias { name, .. } => name,
        }
    }
}

/// SEO overrides for a project's landing page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Seo {
    /// Meta description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One documented library.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Unique project name, also its URL segment.
    pub name: String,
    /// Short description.
    #[serde(default, rename = "desc", alias = "description")]
    pub description: String,
    /// Documented versions in display order.
    #[serde(default)]
    pub versions: Vec<Version>,
    /// Version considered latest/stable.
    #[serde(default)]
    pub current_version: Option<String>,
    /// Version substituted when a URL carries none.
    #[serde(default)]
    pub fallback_version: Option<String>,
    /// SEO overrides.
    #[serde(default)]
    pub seo: Option<Seo>,
}

impl Project {
    /// Create an unversioned project.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            versions: Vec::new(),
            current_version: None,
            fallback_version: None,
            seo: None,
        }
    }

    /// Set the version list.
    #[must_use]
    pub fn with_versions(mut self, versions: Vec<Version>) -> Self {
        self.versions = versions;
        self
    }

    /// Set the fallback version.
    #[must_use]
    pub fn with_fallback(mut self, version: impl Into<String>) -> Self {
        self.fallback_version = Some(version.into());
        self
    }

    /// Set the current version.
    #[must_use]
    pub fn with_current(mut self, version: impl Into<String>) -> Self {
        self.current_version = Some(version.into());
        self
    }

    /// Whether the project lists any versions.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        !self.versions.is_empty()
    }

    /// Whether `code` is one of the configured version codes.
    #[must_use]
    pub fn lists_version(&self, code: &str) -> bool {
        self.versions.iter().any(|v| v.code() == code)
    }

    /// Path to the latest documentation, e.g. `/gems/dry-types/1.2`.
    #[must_use]
    pub fn latest_path(&self, area: &str) -> String {
        format!("/{area}/{}/{}", self.name, crate::version::latest_version(self))
    }

    /// Git clone URL.
    #[must_use]
    pub fn repo_url(&self, org: &str) -> String {
        format!("https://github.com/{org}/{}.git", self.name)
    }

    /// GitHub repository page.
    #[must_use]
    pub fn github_url(&self, org: &str) -> String {
        format!("https://github.com/{org}/{}", self.name)
    }

    #[must_use]
    pub fn rubygems_url(&self) -> String {
        format!("https://rubygems.org/gems/{}", self.name)
    }

    #[must_use]
    pub fn issues_url(&self, org: &str) -> String {
        format!("{}/issues", self.github_url(org))
    }

    #[must_use]
    pub fn pulls_url(&self, org: &str) -> String {
        format!("{}/pulls", self.github_url(org))
    }

    /// GitHub edit link for a documentation page.
    ///
    /// `page_url` is the rendered URL (`/gems/dry-types/1.2/extensions/`);
    /// segments after the version map to the docsite source file.
    #[must_use]
    pub fn edit_url(&self, org: &str, branch: &str, page_url: &str) -> String {
        let file_path = page_url
            .split('/')
            .skip(4)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let file_path = if file_path.is_empty() {
            "index"
        } else {
            file_path.as_str()
        };
        format!(
            "{}/edit/{branch}/docsite/source/{file_path}.html.md",
            self.github_url(org)
        )
    }

    /// Check configuration invariants.
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::Parse(
                "project name cannot be empty".to_owned(),
            ));
        }

        if self.versions.iter().any(|v| v.code().is_empty()) {
            return Err(ConfigurationError::EmptyVersion {
                project: self.name.clone(),
            });
        }

        if self.is_versioned() {
            let fallback =
                self.fallback_version
                    .as_deref()
                    .ok_or_else(|| ConfigurationError::MissingFallback {
                        project: self.name.clone(),
                    })?;
            if !self.lists_version(fallback) {
                return Err(ConfigurationError::UnlistedFallback {
                    project: self.name.clone(),
                    version: fallback.to_owned(),
                });
            }
        }

        if let Some(current) = self.current_version.as_deref()
            && !self.lists_version(current)
        {
            tracing::warn!(
                project = %self.name,
                version = %current,
                "current_version is not listed in versions"
            );
        }

        Ok(())
    }
}

/// Error raised while loading project data.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Projects file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed YAML or project entry.
    #[error("Invalid project data: {0}")]
    Parse(String),
    /// Two projects share a name.
    #[error("Duplicate project name: {0}")]
    DuplicateProject(String),
    /// Version entry with an empty code.
    #[error("Project {project} has a version with an empty code")]
    EmptyVersion { project: String },
    /// Versioned project without a fallback.
    #[error("Project {project} lists versions but has no fallback_version")]
    MissingFallback { project: String },
    /// Fallback not among the version codes.
    #[error("Project {project}: fallback_version {version:?} is not listed in versions")]
    UnlistedFallback { project: String, version: String },
}

/// Project segment of a URL under `/<area>/`.
///
/// `("/gems/dry-types/1.2/", "gems")` -> `dry-types`; URLs outside the area
/// have no project.
#[must_use]
pub fn project_name<'a>(url: &'a str, area: &str) -> Option<&'a str> {
    let mut segments = url.split('/').skip(1);
    if segments.next() != Some(area) {
        return None;
    }
    segments.next().filter(|name| !name.is_empty())
}

/// Read-only collection of projects with lookup by name.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    by_name: HashMap<String, usize>,
}

impl ProjectRegistry {
    /// Build a registry, validating every project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] on duplicate names or a project that
    /// breaks a version invariant.
    pub fn new(projects: Vec<Project>) -> Result<Self, ConfigurationError> {
        let mut by_name = HashMap::with_capacity(projects.len());
        for (idx, project) in projects.iter().enumerate() {
            project.validate()?;
            if by_name.insert(project.name.clone(), idx).is_some() {
                return Err(ConfigurationError::DuplicateProject(project.name.clone()));
            }
        }
        Ok(Self { projects, by_name })
    }

    /// Parse and validate projects from YAML content.
    ///
    /// Empty content yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the YAML is malformed or a project is invalid.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigurationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let projects: Vec<Project> = serde_yaml::from_str(trimmed)
            .map_err(|e| ConfigurationError::Parse(format!("Invalid YAML: {e}")))?;
        Self::new(projects)
    }

    /// Load projects from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), count = registry.len(), "Loaded projects");
        Ok(registry)
    }

    /// All projects in file order.
    #[must_use]
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    /// Find a project by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.by_name.get(name).map(|&i| &self.projects[i])
    }

    /// Find the project a documentation URL under `/<area>/` belongs to.
    #[must_use]
    pub fn for_url(&self, url: &str, area: &str) -> Option<&Project> {
        project_name(url, area).and_then(|name| self.get(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProjectRegistry {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}
