//! Graphviz DOT output formatter
//!
//! Serializes the exported node/edge graph as a DOT digraph for external
//! renderers. Layout and drawing are the renderer's job.

use crate::domain::ResolutionReport;
use crate::graph::DependencyGraph;
use crate::output::OutputFormatter;
use std::io::Write;

/// DOT formatter for external graph renderers
pub struct DotFormatter;

impl DotFormatter {
    /// Create a new DOT formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a node identity for use inside a double-quoted DOT string
fn escape(identity: &str) -> String {
    identity.replace('\\', "\\\\").replace('"', "\\\"")
}

impl OutputFormatter for DotFormatter {
    fn format(&self, report: &ResolutionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let graph = DependencyGraph::from_tree(&report.tree);

        writeln!(writer, "digraph dependencies {{")?;
        writeln!(writer, "    rankdir=LR;")?;
        writeln!(writer, "    node [shape=box];")?;

        for node in &graph.nodes {
            writeln!(writer, "    \"{}\";", escape(node))?;
        }
        for edge in &graph.edges {
            writeln!(writer, "    \"{}\" -> \"{}\";", escape(&edge.from), escape(&edge.to))?;
        }

        writeln!(writer, "}}")
    }
}
