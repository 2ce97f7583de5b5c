//! `pip show` metadata adapter
//!
//! Queries the local pip installation for package metadata and translates the
//! free-form `Key: value` output into a structured record. The `Requires`
//! field lists dependency names with no version information; each
//! dependency's own installed version is learned by querying that dependency
//! separately.

use crate::domain::PackageRecord;
use crate::error::ProviderError;
use crate::provider::MetadataProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::process::Command;

/// Default pip executable
const DEFAULT_PIP_COMMAND: &str = "pip";

/// Metadata provider backed by `pip show`
pub struct PipShowProvider {
    /// pip executable to invoke
    command: String,
}

impl PipShowProvider {
    /// Create a provider using the default `pip` executable
    pub fn new() -> Self {
        Self {
            command: DEFAULT_PIP_COMMAND.to_string(),
        }
    }

    /// Create a provider using a custom pip executable (e.g. `pip3`)
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for PipShowProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for PipShowProvider {
    fn source_name(&self) -> &'static str {
        "pip"
    }

    async fn fetch(&self, package: &str) -> Result<PackageRecord, ProviderError> {
        let output = Command::new(&self.command)
            .args(["show", package])
            .output()
            .await
            .map_err(|e| ProviderError::command_failed(package, e.to_string()))?;

        if !output.status.success() {
            return Err(ProviderError::package_not_found(package, self.source_name()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_show_output(package, &stdout)
    }
}

/// Parse `pip show` output into a package record
///
/// Only `Key: value` lines are considered; continuation lines of multi-line
/// fields are skipped, matching how pip formats the fields we consume.
pub fn parse_show_output(package: &str, output: &str) -> Result<PackageRecord, ProviderError> {
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for line in output.lines() {
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim(), value.trim());
        }
    }

    if fields.is_empty() {
        return Err(ProviderError::invalid_metadata(
            package,
            "pip show produced no metadata fields",
        ));
    }

    let requires_raw = fields.get("Requires").copied().unwrap_or("");
    let dependencies = split_requires(requires_raw);

    let mut record = PackageRecord::new(package);
    record.version = fields.get("Version").map(|v| v.to_string());
    record.dependencies = dependencies.into_iter().map(|name| (name, None)).collect();
    record.summary = fields.get("Summary").copied().unwrap_or("").to_string();
    record.home_page = fields.get("Home-page").copied().unwrap_or("").to_string();
    record.author = fields.get("Author").copied().unwrap_or("").to_string();
    record.license = fields.get("License").copied().unwrap_or("").to_string();
    record.location = fields.get("Location").copied().unwrap_or("").to_string();
    record.requires_raw = requires_raw.to_string();
    record.required_by_raw = fields.get("Required-by").copied().unwrap_or("").to_string();

    Ok(record)
}

/// Split a comma-separated `Requires` field into dependency names
fn split_requires(requires: &str) -> Vec<String> {
    requires
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS_OUTPUT: &str = "\
Name: requests
Version: 2.31.0
Summary: Python HTTP for Humans.
Home-page: https://requests.readthedocs.io
Author: Kenneth Reitz
Author-email: me@kennethreitz.org
License: Apache 2.0
Location: /usr/lib/python3/site-packages
Requires: certifi, charset-normalizer, idna, urllib3
Required-by: pip-tools, sphinx
";

    #[test]
    fn test_parse_show_output_fields() {
        let record = parse_show_output("requests", REQUESTS_OUTPUT).unwrap();
        assert_eq!(record.name, "requests");
        assert_eq!(record.version.as_deref(), Some("2.31.0"));
        assert_eq!(record.summary, "Python HTTP for Humans.");
        assert_eq!(record.home_page, "https://requests.readthedocs.io");
        assert_eq!(record.author, "Kenneth Reitz");
        assert_eq!(record.license, "Apache 2.0");
        assert_eq!(record.location, "/usr/lib/python3/site-packages");
        assert_eq!(record.requires_raw, "certifi, charset-normalizer, idna, urllib3");
        assert_eq!(record.required_by_raw, "pip-tools, sphinx");
    }

    #[test]
    fn test_parse_show_output_dependencies() {
        let record = parse_show_output("requests", REQUESTS_OUTPUT).unwrap();
        let names: Vec<_> = record.dependency_names().collect();
        assert_eq!(names, vec!["certifi", "charset-normalizer", "idna", "urllib3"]);
        // pip reports no versions in Requires
        assert!(record.dependencies.iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn test_parse_show_output_identity() {
        let record = parse_show_output("requests", REQUESTS_OUTPUT).unwrap();
        assert_eq!(record.identity(), "requests==2.31.0");
    }

    #[test]
    fn test_parse_show_output_empty_requires() {
        let output = "Name: certifi\nVersion: 2023.11.17\nRequires: \nRequired-by: requests\n";
        let record = parse_show_output("certifi", output).unwrap();
        assert!(record.dependencies.is_empty());
        assert_eq!(record.requires_raw, "");
    }

    #[test]
    fn test_parse_show_output_missing_fields() {
        let output = "Name: minimal\nVersion: 0.1\n";
        let record = parse_show_output("minimal", output).unwrap();
        assert_eq!(record.version.as_deref(), Some("0.1"));
        assert_eq!(record.summary, "");
        assert_eq!(record.location, "");
        assert!(record.dependencies.is_empty());
    }

    #[test]
    fn test_parse_show_output_no_version() {
        let output = "Name: local-pkg\nSummary: something\n";
        let record = parse_show_output("local-pkg", output).unwrap();
        assert!(record.version.is_none());
        assert_eq!(record.identity(), "local-pkg");
    }

    #[test]
    fn test_parse_show_output_empty() {
        let err = parse_show_output("ghost", "").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidMetadata { .. }));
    }

    #[test]
    fn test_parse_show_output_value_with_colon() {
        let output = "Name: pkg\nHome-page: https://example.com/pkg\n";
        let record = parse_show_output("pkg", output).unwrap();
        assert_eq!(record.home_page, "https://example.com/pkg");
    }

    #[test]
    fn test_split_requires() {
        assert_eq!(
            split_requires("certifi, idna , urllib3"),
            vec!["certifi", "idna", "urllib3"]
        );
        assert!(split_requires("").is_empty());
        assert!(split_requires("  ").is_empty());
    }

    #[test]
    fn test_provider_source_name() {
        assert_eq!(PipShowProvider::new().source_name(), "pip");
    }

    #[test]
    fn test_provider_with_command() {
        let provider = PipShowProvider::with_command("pip3");
        assert_eq!(provider.command, "pip3");
    }

    #[tokio::test]
    async fn test_fetch_with_missing_executable() {
        let provider = PipShowProvider::with_command("definitely-not-a-real-pip");
        let err = provider.fetch("requests").await.unwrap_err();
        assert!(matches!(err, ProviderError::CommandFailed { .. }));
    }
}
