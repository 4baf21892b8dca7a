//! Error handling for release publishing
//!
//! One variant per failure class of a run. Every error is fatal: the CLI
//! prints it together with its suggested actions and exits non-zero.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Remote mutation that failed while replacing a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Create,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("delete"),
            Self::Create => f.write_str("create"),
        }
    }
}

/// Main error type for release publishing
#[derive(Error, Debug)]
pub enum ReleaseError {
    // Pre-flight errors
    #[error("configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("you are in repo '{current}' but trying to release to repo '{expected}'")]
    GuardViolation { current: String, expected: String },

    // Remote errors
    #[error("[{tag}] failed to look up existing release: {message}")]
    RemoteLookupError { tag: String, message: String },

    #[error("[{tag}] failed to {action} release: {message}")]
    RemoteMutationError {
        tag: String,
        action: MutationKind,
        message: String,
    },

    // Asset errors
    #[error("cannot read asset {}: {source}", .path.display())]
    FileAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[{tag}] failed to upload asset '{name}': {message}")]
    AssetUploadError {
        tag: String,
        name: String,
        message: String,
    },
}

impl ReleaseError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// True when the run stopped before any remote call was made
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError { .. } | Self::GuardViolation { .. }
        )
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::ConfigurationError { .. } => vec![
                "Check that the settings file exists and is valid JSON or YAML",
                "Make sure GITHUB_TOKEN is exported",
            ],
            Self::GuardViolation { .. } => vec![
                "Run ghrelease from the checkout of the target repository",
                "Pass --yolo to skip this check",
            ],
            Self::RemoteLookupError { .. } => vec![
                "Check network connectivity to the host",
                "Check that the token can read releases of the repository",
            ],
            Self::RemoteMutationError {
                action: MutationKind::Delete,
                ..
            } => vec!["Check that the token has write access to the repository"],
            Self::RemoteMutationError {
                action: MutationKind::Create,
                ..
            } => vec![
                "The previous release may already be deleted; rerun to recreate it",
                "Check that the token has write access to the repository",
            ],
            Self::FileAccessError { .. } => vec![
                "Check the paths listed under 'files'",
                "The release was created without the remaining assets; rerun after fixing",
            ],
            Self::AssetUploadError { .. } => vec![
                "Check that asset names are unique within the release",
                "The release was created without the remaining assets; rerun after fixing",
            ],
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            Self::GuardViolation { .. } => "GUARD_VIOLATION",
            Self::RemoteLookupError { .. } => "REMOTE_LOOKUP_ERROR",
            Self::RemoteMutationError { .. } => "REMOTE_MUTATION_ERROR",
            Self::FileAccessError { .. } => "FILE_ACCESS_ERROR",
            Self::AssetUploadError { .. } => "ASSET_UPLOAD_ERROR",
        }
    }
}
