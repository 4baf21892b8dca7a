//! Settings descriptor loader
//!
//! Reads the release descriptor (JSON, or YAML by extension) and validates
//! it into a `ReleaseRequest`. Field values are taken verbatim; nothing in
//! the file is interpolated.

use crate::core::error::ReleaseError;
use crate::core::request::ReleaseRequest;
use log::warn;
use std::path::Path;
use tokio::fs;

/// Descriptor syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Json,
    Yaml,
}

impl DescriptorFormat {
    /// `.yaml` and `.yml` files are YAML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Release descriptor loader
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Read and validate the descriptor at `path`
    pub async fn load(path: &Path) -> Result<ReleaseRequest, ReleaseError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ReleaseError::config(format!(
                "failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let request = Self::parse(&content, DescriptorFormat::from_path(path))?;

        Self::validate(&request)?;
        Ok(request)
    }

    /// Parse descriptor text without validation
    pub fn parse(content: &str, format: DescriptorFormat) -> Result<ReleaseRequest, ReleaseError> {
        match format {
            DescriptorFormat::Json => serde_json::from_str(content).map_err(|e| {
                ReleaseError::config(format!("failed to parse JSON settings: {}", e))
            }),
            DescriptorFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                ReleaseError::config(format!("failed to parse YAML settings: {}", e))
            }),
        }
    }

    /// Reject invalid requests, log warnings for suspicious ones
    pub fn validate(request: &ReleaseRequest) -> Result<(), ReleaseError> {
        let validation = request.validate();

        for warning in &validation.warnings {
            warn!("settings: {}: {}", warning.field, warning.message);
        }

        if !validation.is_valid() {
            return Err(ReleaseError::config(format!(
                "invalid settings: {}",
                validation.error_summary()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const RELEASE_JSON: &str = r#"{
        "github_host": "https://github.com",
        "owner": "zerogvt",
        "repo": "ghrelease",
        "files": ["bin/ghrelease_lin", "bin/ghrelease_osx"],
        "tag": "latest",
        "desc": "description"
    }"#;

    #[tokio::test]
    async fn test_load_json_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("release.json");
        std::fs::write(&path, RELEASE_JSON).unwrap();

        let request = DescriptorLoader::load(&path).await.unwrap();

        assert_eq!(request.host_url, "https://github.com");
        assert_eq!(request.owner, "zerogvt");
        assert_eq!(request.repo_name, "ghrelease");
        assert_eq!(
            request.asset_paths,
            vec![
                PathBuf::from("bin/ghrelease_lin"),
                PathBuf::from("bin/ghrelease_osx")
            ]
        );
        assert_eq!(request.tag, "latest");
        assert_eq!(request.description, "description");
    }

    #[tokio::test]
    async fn test_load_yaml_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("release.yml");
        std::fs::write(
            &path,
            "github_host: https://github.example.com\n\
             owner: zerogvt\n\
             repo: ghrelease\n\
             files:\n  - dist/app.tar.gz\n\
             tag: v1.2.0\n",
        )
        .unwrap();

        let request = DescriptorLoader::load(&path).await.unwrap();

        assert_eq!(request.host_url, "https://github.example.com");
        assert_eq!(request.asset_paths, vec![PathBuf::from("dist/app.tar.gz")]);
        assert_eq!(request.description, "");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = DescriptorLoader::load(&path).await.unwrap_err();

        assert_eq!(err.code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    async fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("release.json");
        std::fs::write(&path, "{ \"owner\": ").unwrap();

        let err = DescriptorLoader::load(&path).await.unwrap_err();

        assert!(err.is_preflight());
        assert!(err.to_string().contains("failed to parse JSON settings"));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_request() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("release.json");
        std::fs::write(
            &path,
            r#"{"owner": "", "repo": "ghrelease", "files": ["a"], "tag": "latest"}"#,
        )
        .unwrap();

        let err = DescriptorLoader::load(&path).await.unwrap_err();

        assert!(err.to_string().contains("owner: must not be empty"));
    }

    #[tokio::test]
    async fn test_load_keeps_placeholder_text_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("release.json");
        std::fs::write(
            &path,
            r#"{
                "owner": "zerogvt",
                "repo": "ghrelease",
                "files": ["${DIST_DIR}/ghrelease_lin"],
                "tag": "latest",
                "desc": "Changelog: see ${GITHUB_TOKEN} and ${NOT_SET_ANYWHERE}"
            }"#,
        )
        .unwrap();

        let request = DescriptorLoader::load(&path).await.unwrap();

        assert_eq!(
            request.description,
            "Changelog: see ${GITHUB_TOKEN} and ${NOT_SET_ANYWHERE}"
        );
        assert_eq!(
            request.asset_paths,
            vec![PathBuf::from("${DIST_DIR}/ghrelease_lin")]
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DescriptorFormat::from_path(Path::new("release.json")),
            DescriptorFormat::Json
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("release.YAML")),
            DescriptorFormat::Yaml
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("release")),
            DescriptorFormat::Json
        );
    }

    #[test]
    fn test_parse_round_trip_fields() {
        let request = DescriptorLoader::parse(RELEASE_JSON, DescriptorFormat::Json).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        let reparsed = DescriptorLoader::parse(&json, DescriptorFormat::Json).unwrap();

        assert_eq!(request, reparsed);
    }
}
