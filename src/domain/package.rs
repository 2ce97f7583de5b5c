//! Package metadata records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Computes the identity string for a package
///
/// `name==version` when the version is known, bare `name` otherwise. This is
/// the key a resolved package gets in the output tree. Packages whose version
/// could not be determined collapse under the bare name.
pub fn identity_of(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}=={}", name, version),
        None => name.to_string(),
    }
}

/// Metadata for one successfully queried package
///
/// Immutable once constructed; owned by the metadata cache and shared
/// read-only with resolver tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name as queried
    pub name: String,
    /// Installed version, if the provider reported one
    pub version: Option<String>,
    /// Declared dependencies: name plus optionally-known version
    pub dependencies: Vec<(String, Option<String>)>,
    /// One-line package summary
    pub summary: String,
    /// Project home page URL
    pub home_page: String,
    /// Author name
    pub author: String,
    /// License identifier
    pub license: String,
    /// Install location on disk
    pub location: String,
    /// Raw `Requires` field as reported by the provider
    pub requires_raw: String,
    /// Raw `Required-by` field as reported by the provider
    pub required_by_raw: String,
}

impl PackageRecord {
    /// Creates an empty record for the given package name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            dependencies: Vec::new(),
            summary: String::new(),
            home_page: String::new(),
            author: String::new(),
            license: String::new(),
            location: String::new(),
            requires_raw: String::new(),
            required_by_raw: String::new(),
        }
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the declared dependency names, versions unknown (builder pattern)
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = names.into_iter().map(|n| (n.into(), None)).collect();
        self
    }

    /// Sets the summary (builder pattern)
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Returns the identity string for this record
    pub fn identity(&self) -> String {
        identity_of(&self.name, self.version.as_deref())
    }

    /// Returns the declared dependency names in order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())
    }
}
