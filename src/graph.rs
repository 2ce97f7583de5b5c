//! Node/edge graph export
//!
//! Converts a resolved dependency tree into a directed graph structure for
//! external renderers: one node per identity string, one edge per
//! (package, dependency) pair. No layout, no drawing.

use crate::domain::DependencyTree;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A directed edge from a package to one of its dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Identity string of the depending package
    pub from: String,
    /// Identity string of the dependency
    pub to: String,
}

/// Directed dependency graph in renderer-consumable form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Node identity strings, tree order first, then leaf-only references
    pub nodes: Vec<String>,
    /// Directed edges in tree order
    pub edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Builds the graph from a resolved tree
    ///
    /// Dependency references that never became tree entries (failed or
    /// depth-bounded packages) still appear as leaf nodes, so every edge
    /// endpoint is a node.
    pub fn from_tree(tree: &DependencyTree) -> Self {
        let mut nodes: IndexSet<String> = IndexSet::new();
        let mut edges = Vec::new();

        for (identity, node) in tree {
            nodes.insert(identity.clone());
            for dependency in &node.dependencies {
                nodes.insert(dependency.clone());
                edges.push(Edge {
                    from: identity.clone(),
                    to: dependency.clone(),
                });
            }
        }

        Self {
            nodes: nodes.into_iter().collect(),
            edges,
        }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
