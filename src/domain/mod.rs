//! Core domain models for depviz
//!
//! This module contains the fundamental types used throughout the application:
//! - Requirement specifications parsed from a requirements listing
//! - Package metadata records returned by a provider
//! - The resolved dependency tree and its per-run report

mod package;
mod requirement;
mod tree;

pub use package::{identity_of, PackageRecord};
pub use requirement::{RequirementSpec, Requirements};
pub use tree::{DependencyTree, NodeInfo, ResolutionFailure, ResolutionReport, ResolvedNode};
