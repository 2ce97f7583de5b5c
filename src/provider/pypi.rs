//! PyPI JSON API adapter
//!
//! Fetches package metadata from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json
//!
//! PyPI does not report an install location or reverse dependencies, so
//! `location` and `required_by` stay empty in records from this source.

use crate::domain::PackageRecord;
use crate::error::ProviderError;
use crate::provider::{HttpClient, MetadataProvider};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPiProvider {
    client: HttpClient,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

/// The `info` block of a PyPI response
#[derive(Debug, Deserialize)]
struct PyPiInfo {
    version: Option<String>,
    summary: Option<String>,
    home_page: Option<String>,
    author: Option<String>,
    license: Option<String>,
    requires_dist: Option<Vec<String>>,
}

impl PyPiProvider {
    /// Create a new PyPI provider
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", PYPI_API_URL, package)
    }
}

#[async_trait]
impl MetadataProvider for PyPiProvider {
    fn source_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch(&self, package: &str) -> Result<PackageRecord, ProviderError> {
        let url = self.build_url(package);
        let response: PyPiResponse = self
            .client
            .get_json(&url, package, self.source_name())
            .await?;

        let info = response.info;
        let dependencies = dependency_names(info.requires_dist.as_deref().unwrap_or(&[]));

        let mut record = PackageRecord::new(package);
        record.version = info.version;
        record.requires_raw = dependencies.join(", ");
        record.dependencies = dependencies.into_iter().map(|name| (name, None)).collect();
        record.summary = info.summary.unwrap_or_default();
        record.home_page = info.home_page.unwrap_or_default();
        record.author = info.author.unwrap_or_default();
        record.license = info.license.unwrap_or_default();

        Ok(record)
    }
}

/// Extract plain dependency names from PEP 508 `requires_dist` entries
///
/// Entries gated behind an extra (e.g. `PySocks>=1.5.6; extra == "socks"`)
/// are skipped; only unconditional dependencies are kept.
fn dependency_names(requires_dist: &[String]) -> Vec<String> {
    let mut names = Vec::new();
    for entry in requires_dist {
        if entry.contains("extra ==") {
            continue;
        }
        let name: String = entry
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            .collect();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
