//! Release Publisher - replaces a release and uploads its assets
//!
//! The workflow is a fixed sequence against a `RepositoryHost`:
//! - look up the release by tag
//! - delete it if it exists
//! - create a fresh release
//! - upload every listed file, in order
//!
//! Any failure stops the run. Nothing is rolled back: if the delete succeeds
//! and the create fails, the tag is left without a release until the next run.

use crate::core::error::{MutationKind, ReleaseError};
use crate::core::request::{ReleaseRequest, asset_name};
use crate::core::traits::{
    AssetUpload, NewRelease, ReleaseLookup, RemoteAsset, RemoteRelease, RepositoryHost,
};
use log::info;
use std::io;
use std::path::Path;
use std::time::Instant;
use tokio::fs;

/// Branch every release is created against
pub const TARGET_COMMITISH: &str = "main";

/// Report returned after a successful publish
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub tag: String,
    pub release_id: u64,
    /// Id of the release that was deleted to make room, if any
    pub replaced_release_id: Option<u64>,
    pub assets: Vec<RemoteAsset>,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub duration: u64,
}

/// Drives a `RepositoryHost` to exactly one release per tag
pub struct ReleasePublisher<'a> {
    host: &'a dyn RepositoryHost,
}

impl<'a> ReleasePublisher<'a> {
    pub fn new(host: &'a dyn RepositoryHost) -> Self {
        Self { host }
    }

    /// Replace the release for `request.tag` and attach `request.asset_paths`
    ///
    /// # Arguments
    ///
    /// * `request` - A request that already passed validation
    pub async fn publish(&self, request: &ReleaseRequest) -> Result<PublishReport, ReleaseError> {
        let start_time = Instant::now();
        info!("Creating release '{}' on {}", request.tag, self.host.name());

        let replaced_release_id = self.remove_existing(request).await?;
        let release = self.create(request).await?;
        let assets = self.upload_assets(request, &release).await?;

        Ok(PublishReport {
            tag: request.tag.clone(),
            release_id: release.id,
            replaced_release_id,
            assets,
            published_at: chrono::Utc::now(),
            duration: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Delete the release currently published under the tag, if any
    async fn remove_existing(&self, request: &ReleaseRequest) -> Result<Option<u64>, ReleaseError> {
        let lookup = self
            .host
            .find_release_by_tag(&request.tag)
            .await
            .map_err(|e| ReleaseError::RemoteLookupError {
                tag: request.tag.clone(),
                message: format!("{:#}", e),
            })?;

        let existing = match lookup {
            ReleaseLookup::NotFound => return Ok(None),
            ReleaseLookup::Found(existing) => existing,
        };

        info!(
            "Deleting existing release '{}' (id {})",
            existing.tag, existing.id
        );
        self.host
            .delete_release(existing.id)
            .await
            .map_err(|e| ReleaseError::RemoteMutationError {
                tag: request.tag.clone(),
                action: MutationKind::Delete,
                message: format!("{:#}", e),
            })?;

        Ok(Some(existing.id))
    }

    async fn create(&self, request: &ReleaseRequest) -> Result<RemoteRelease, ReleaseError> {
        let new_release = NewRelease {
            tag_name: request.tag.clone(),
            target_commitish: TARGET_COMMITISH.to_string(),
            name: request.tag.clone(),
            body: request.description.clone(),
            draft: false,
            prerelease: false,
        };

        let release = self
            .host
            .create_release(&new_release)
            .await
            .map_err(|e| ReleaseError::RemoteMutationError {
                tag: request.tag.clone(),
                action: MutationKind::Create,
                message: format!("{:#}", e),
            })?;

        info!("Created release '{}' (id {})", request.tag, release.id);
        Ok(release)
    }

    async fn upload_assets(
        &self,
        request: &ReleaseRequest,
        release: &RemoteRelease,
    ) -> Result<Vec<RemoteAsset>, ReleaseError> {
        let mut uploaded = Vec::with_capacity(request.asset_paths.len());

        for path in &request.asset_paths {
            let asset = open_asset(path).await?;
            let name = asset.name.clone();

            info!("Uploading file {} to release '{}'", name, request.tag);
            let remote = self
                .host
                .upload_asset(release.id, asset)
                .await
                .map_err(|e| ReleaseError::AssetUploadError {
                    tag: request.tag.clone(),
                    name,
                    message: format!("{:#}", e),
                })?;

            uploaded.push(remote);
        }

        Ok(uploaded)
    }
}

/// Open one asset for upload; the handle lives only as long as the upload
async fn open_asset(path: &Path) -> Result<AssetUpload, ReleaseError> {
    let access_error = |source: io::Error| ReleaseError::FileAccessError {
        path: path.to_path_buf(),
        source,
    };

    let name = asset_name(path).ok_or_else(|| {
        access_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path does not name a file",
        ))
    })?;

    let file = fs::File::open(path).await.map_err(access_error)?;
    let metadata = file.metadata().await.map_err(access_error)?;
    if !metadata.is_file() {
        return Err(access_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    Ok(AssetUpload {
        label: name.clone(),
        name,
        file,
        size: metadata.len(),
    })
}
