//! Requirements listing parser
//!
//! Handles the requirements.txt line format:
//! - Versioned: `requests==2.31.0`, `flask>=2.0`, `torch~=2.1`, `pkg@1.0`
//! - Bare name: `requests` (no constraint, resolved as "latest")
//! - Comments (`# ...`) and blank lines are ignored
//!
//! Parsing is lenient: a line matching neither pattern is treated as a bare
//! name rather than aborting the parse.

use crate::domain::Requirements;
use crate::error::RequirementsError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// First operator-looking sequence splits name from constraint. Covers the
// operator set {=, ==, <, <=, >, >=, ~=, !=, @}.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=<>~!]+)(?:[=<>~!]=?|@)(.+)$").unwrap());

/// Parses a requirements file into an ordered name -> constraint mapping
///
/// Fails only when the file is missing or unreadable; malformed lines never
/// abort the parse.
pub fn parse_requirements_file(path: impl AsRef<Path>) -> Result<Requirements, RequirementsError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RequirementsError::not_found(path));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| RequirementsError::read_error(path, e))?;

    Ok(parse_requirements(&content))
}

/// Parses requirements text into an ordered name -> constraint mapping
///
/// Duplicate names overwrite earlier entries; insertion order is preserved.
pub fn parse_requirements(content: &str) -> Requirements {
    let mut requirements = Requirements::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match VERSION_RE.captures(line) {
            Some(caps) => {
                let name = caps[1].trim().to_string();
                let constraint = caps[2].trim().to_string();
                requirements.insert(name, Some(constraint));
            }
            None => {
                requirements.insert(line.to_string(), None);
            }
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_exact_version() {
        let reqs = parse_requirements("requests==2.31.0");
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs["requests"].as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_parse_bare_name() {
        let reqs = parse_requirements("requests");
        assert_eq!(reqs.len(), 1);
        assert!(reqs["requests"].is_none());
    }

    #[test]
    fn test_parse_comment_and_blank_lines() {
        let reqs = parse_requirements("# a comment\n\n   \n# another\n");
        assert!(reqs.is_empty());
    }

    #[test]
    fn test_parse_all_operators() {
        let cases = [
            ("pkg=1.0", "1.0"),
            ("pkg==1.0", "1.0"),
            ("pkg<2.0", "2.0"),
            ("pkg<=2.0", "2.0"),
            ("pkg>1.0", "1.0"),
            ("pkg>=1.0", "1.0"),
            ("pkg~=1.4.2", "1.4.2"),
            ("pkg!=1.5", "1.5"),
            ("pkg@1.0", "1.0"),
        ];
        for (line, expected) in cases {
            let reqs = parse_requirements(line);
            assert_eq!(
                reqs["pkg"].as_deref(),
                Some(expected),
                "failed for line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let reqs = parse_requirements("  requests == 2.31.0  ");
        assert_eq!(reqs["requests"].as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_parse_duplicate_overwrites() {
        let reqs = parse_requirements("requests==2.30.0\nrequests==2.31.0\n");
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs["requests"].as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_parse_preserves_order() {
        let reqs = parse_requirements("zope\nflask>=2.0\nrequests==2.31.0\n");
        let names: Vec<_> = reqs.keys().cloned().collect();
        assert_eq!(names, vec!["zope", "flask", "requests"]);
    }

    #[test]
    fn test_parse_mixed_listing() {
        let content = "\
# production dependencies
requests==2.31.0
flask

# pinned for CVE-2023-xxxxx
urllib3<2.0
";
        let reqs = parse_requirements(content);
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs["requests"].as_deref(), Some("2.31.0"));
        assert!(reqs["flask"].is_none());
        assert_eq!(reqs["urllib3"].as_deref(), Some("2.0"));
    }

    #[test]
    fn test_parse_dashed_and_dotted_names() {
        let reqs = parse_requirements("charset-normalizer>=2.0\nruamel.yaml==0.18.5\n");
        assert_eq!(reqs["charset-normalizer"].as_deref(), Some("2.0"));
        assert_eq!(reqs["ruamel.yaml"].as_deref(), Some("0.18.5"));
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements.txt");
        fs::write(&path, "requests==2.31.0\nflask\n").unwrap();

        let reqs = parse_requirements_file(&path).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs["requests"].as_deref(), Some("2.31.0"));
        assert!(reqs["flask"].is_none());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_requirements_file("/no/such/requirements.txt").unwrap_err();
        assert!(matches!(err, RequirementsError::NotFound { .. }));
    }
}
