//! Core traits and types for release publishing
//!
//! This module defines the hosting-platform capability the publisher drives,
//! together with the remote values exchanged with it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Remote values
// ============================================================================

/// A release as known to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRelease {
    pub id: u64,
    #[serde(rename = "tag_name")]
    pub tag: String,
}

/// Outcome of looking a release up by tag
///
/// Transport and authorization failures are reported through the `Err` arm
/// of the surrounding `Result`, never as `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseLookup {
    Found(RemoteRelease),
    NotFound,
}

/// Release record to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// One file to attach to a release
///
/// The file is opened just before the upload and is streamed from disk;
/// it is closed when the upload consumes or drops it.
#[derive(Debug)]
pub struct AssetUpload {
    pub name: String,
    pub label: String,
    pub file: tokio::fs::File,
    /// File length in bytes, sent as `Content-Length`
    pub size: u64,
}

/// A successfully uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub id: u64,
    pub name: String,
    pub label: String,
    pub release_id: u64,
}

// ============================================================================
// Repository Host Trait
// ============================================================================

/// Release operations of a hosting platform, bound to one repository
///
/// Implementations perform no retries; any retry policy belongs to the
/// caller. The trait is object safe so the publisher can take
/// `&dyn RepositoryHost`.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Host label used in log output (e.g., "github.com")
    fn name(&self) -> &str;

    /// Look up the release published under `tag`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use ghrelease::core::{AssetUpload, NewRelease, ReleaseLookup, RemoteAsset, RemoteRelease, RepositoryHost};
    /// # use async_trait::async_trait;
    /// # struct EmptyHost;
    /// # #[async_trait]
    /// # impl RepositoryHost for EmptyHost {
    /// #   fn name(&self) -> &str { "empty" }
    /// async fn find_release_by_tag(&self, _tag: &str) -> anyhow::Result<ReleaseLookup> {
    ///     Ok(ReleaseLookup::NotFound)
    /// }
    /// #   async fn delete_release(&self, _: u64) -> anyhow::Result<()> { unimplemented!() }
    /// #   async fn create_release(&self, _: &NewRelease) -> anyhow::Result<RemoteRelease> { unimplemented!() }
    /// #   async fn upload_asset(&self, _: u64, _: AssetUpload) -> anyhow::Result<RemoteAsset> { unimplemented!() }
    /// # }
    /// ```
    async fn find_release_by_tag(&self, tag: &str) -> anyhow::Result<ReleaseLookup>;

    /// Remove an existing release by id
    async fn delete_release(&self, release_id: u64) -> anyhow::Result<()>;

    /// Create a release record
    async fn create_release(&self, release: &NewRelease) -> anyhow::Result<RemoteRelease>;

    /// Attach one file to an existing release
    async fn upload_asset(
        &self,
        release_id: u64,
        asset: AssetUpload,
    ) -> anyhow::Result<RemoteAsset>;
}
