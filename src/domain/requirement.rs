//! Requirement specification structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered mapping from package name to optional version constraint
///
/// Duplicate names overwrite earlier entries; insertion order is preserved
/// for deterministic reporting.
pub type Requirements = IndexMap<String, Option<String>>;

/// A single declared top-level requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSpec {
    /// Package name
    pub name: String,
    /// Version constraint, `None` when the requirement is a bare name
    pub constraint: Option<String>,
}

impl RequirementSpec {
    /// Creates a new requirement with a version constraint
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: Some(constraint.into()),
        }
    }

    /// Creates a bare requirement with no constraint
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    /// Returns the constraint, or "latest" when none was declared
    pub fn constraint_or_latest(&self) -> &str {
        self.constraint.as_deref().unwrap_or("latest")
    }
}

impl fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.constraint_or_latest())
    }
}
