//! Metadata providers for package queries
//!
//! This module provides:
//! - The provider trait the resolver queries through
//! - `pip show` adapter (local installed-package metadata)
//! - PyPI JSON API adapter (registry metadata over HTTP)
//! - HTTP client shared foundation with retry logic

mod client;
mod pip;
mod pypi;

pub use client::HttpClient;
pub use pip::PipShowProvider;
pub use pypi::PyPiProvider;

use crate::domain::PackageRecord;
use crate::error::ProviderError;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for package metadata providers
///
/// A failed fetch is non-fatal to resolution: the resolver records the
/// failure and treats the package as a leaf with no tree entry.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short name of the metadata source, used in errors and logs
    fn source_name(&self) -> &'static str;

    /// Fetch metadata for a package by name
    async fn fetch(&self, package: &str) -> Result<PackageRecord, ProviderError>;
}

/// Selectable metadata source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MetadataSource {
    /// Query the local pip installation (`pip show`)
    #[default]
    Pip,
    /// Query the PyPI JSON API
    Pypi,
}

/// Create a metadata provider for the given source
pub fn create_provider(source: MetadataSource) -> Result<Arc<dyn MetadataProvider>, ProviderError> {
    match source {
        MetadataSource::Pip => Ok(Arc::new(PipShowProvider::new())),
        MetadataSource::Pypi => Ok(Arc::new(PyPiProvider::new(HttpClient::new()?))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_pip() {
        let provider = create_provider(MetadataSource::Pip).unwrap();
        assert_eq!(provider.source_name(), "pip");
    }

    #[test]
    fn test_create_provider_pypi() {
        let provider = create_provider(MetadataSource::Pypi).unwrap();
        assert_eq!(provider.source_name(), "PyPI");
    }

    #[test]
    fn test_metadata_source_default() {
        assert_eq!(MetadataSource::default(), MetadataSource::Pip);
    }
}
