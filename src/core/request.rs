//! Release request data model
//!
//! A `ReleaseRequest` is built once from the settings descriptor and is
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Base address of the public GitHub instance
pub const PUBLIC_HOST_URL: &str = "https://github.com";

/// Settings file read when `--settings` is not given
pub const DEFAULT_DESCRIPTOR: &str = "release.json";

fn default_host_url() -> String {
    PUBLIC_HOST_URL.to_string()
}

/// Everything needed to publish one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    /// Hosting platform base address (public instance or enterprise server)
    #[serde(rename = "github_host", default = "default_host_url")]
    pub host_url: String,

    pub owner: String,

    #[serde(rename = "repo")]
    pub repo_name: String,

    /// Files to attach, in upload order
    #[serde(rename = "files", default)]
    pub asset_paths: Vec<PathBuf>,

    pub tag: String,

    /// Release body; may be empty
    #[serde(rename = "desc", default)]
    pub description: String,
}

/// Problem found while validating a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIssue {
    /// Descriptor key (e.g., "owner", "files[1]")
    pub field: String,
    pub message: String,
}

/// Validation result for a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValidation {
    pub errors: Vec<RequestIssue>,
    pub warnings: Vec<RequestIssue>,
}

impl RequestValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors joined into one line, for error messages
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl ReleaseRequest {
    /// Check that every field but the description is set
    ///
    /// Duplicate asset base names are reported as warnings: the host
    /// refuses the second upload of the same name.
    pub fn validate(&self) -> RequestValidation {
        let mut validation = RequestValidation::default();

        let required = [
            ("github_host", &self.host_url),
            ("owner", &self.owner),
            ("repo", &self.repo_name),
            ("tag", &self.tag),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                validation.errors.push(RequestIssue {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.asset_paths.is_empty() {
            validation.errors.push(RequestIssue {
                field: "files".to_string(),
                message: "at least one file is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (index, path) in self.asset_paths.iter().enumerate() {
            let field = format!("files[{}]", index);
            match asset_name(path) {
                None => validation.errors.push(RequestIssue {
                    field,
                    message: format!("'{}' does not name a file", path.display()),
                }),
                Some(name) => {
                    if !seen.insert(name.clone()) {
                        validation.warnings.push(RequestIssue {
                            field,
                            message: format!("asset name '{}' is listed more than once", name),
                        });
                    }
                }
            }
        }

        validation
    }
}

/// Base name used as both asset name and label
pub fn asset_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
