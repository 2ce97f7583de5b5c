//! Resolved dependency tree structures
//!
//! The tree maps identity strings (`name==version` or bare `name`) to
//! resolved nodes. Serialized as-is, it is the exact shape an external
//! renderer consumes.

use super::PackageRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from package identity string to its resolved node
pub type DependencyTree = IndexMap<String, ResolvedNode>;

/// Informational fields carried by a resolved node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
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
    /// Raw `Requires` field
    pub requires: String,
    /// Raw `Required-by` field
    pub required_by: String,
}

impl NodeInfo {
    /// Builds the info subset from a full package record
    pub fn from_record(record: &PackageRecord) -> Self {
        Self {
            summary: record.summary.clone(),
            home_page: record.home_page.clone(),
            author: record.author.clone(),
            license: record.license.clone(),
            location: record.location.clone(),
            requires: record.requires_raw.clone(),
            required_by: record.required_by_raw.clone(),
        }
    }
}

/// One resolved package in the dependency tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNode {
    /// Identity strings of the declared dependencies, in declaration order
    pub dependencies: Vec<String>,
    /// Informational fields from the package record
    pub info: NodeInfo,
}

/// A package whose metadata query failed during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    /// Package name as queried
    pub package: String,
    /// Human-readable failure description
    pub error: String,
}

/// The outcome of one resolution run
///
/// The tree silently omits failed packages; the failure list is the side
/// channel for callers that need exact-cause reporting.
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// The resolved dependency tree
    pub tree: DependencyTree,
    /// Per-package query failures encountered during the run
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    /// Returns true if any package query failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of resolved packages in the tree
    pub fn package_count(&self) -> usize {
        self.tree.len()
    }
}
