//! GitHub REST implementation of `RepositoryHost`
//!
//! Works against both github.com and GitHub Enterprise Server; the
//! difference is confined to the `HostEndpoint` passed in.

use crate::core::error::ReleaseError;
use crate::core::traits::{
    AssetUpload, NewRelease, ReleaseLookup, RemoteAsset, RemoteRelease, RepositoryHost,
};
use crate::hosts::endpoint::HostEndpoint;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::{Body, Method, StatusCode, Url, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tokio_util::io::ReaderStream;

const USER_AGENT: &str = concat!("ghrelease/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Settings for a `GitHubHost`
pub struct GitHubHostConfig {
    pub endpoint: HostEndpoint,
    pub owner: String,
    pub repo: String,
    pub token: SecretString,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// Error payload returned by the REST API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Asset payload; the API reports a missing label as `null`
#[derive(Debug, Deserialize)]
struct ApiAsset {
    id: u64,
    name: String,
    label: Option<String>,
}

/// Release operations for one GitHub repository
pub struct GitHubHost {
    client: reqwest::Client,
    endpoint: HostEndpoint,
    owner: String,
    repo: String,
    token: SecretString,
}

impl GitHubHost {
    pub fn new(config: GitHubHostConfig) -> Result<Self, ReleaseError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ReleaseError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            owner: config.owner,
            repo: config.repo,
            token: config.token,
        })
    }

    pub fn endpoint(&self) -> &HostEndpoint {
        &self.endpoint
    }

    /// `{base}repos/{owner}/{repo}/{tail...}` with every segment percent-encoded
    fn repo_url(&self, base: &Url, tail: &[&str]) -> anyhow::Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("{} cannot be used as a base URL", base))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(tail);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE)
    }

    /// Turn a non-success response into an error carrying status and API message
    async fn api_error(response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        if message.trim().is_empty() {
            anyhow!("HTTP {}", status)
        } else {
            anyhow!("HTTP {}: {}", status, message.trim())
        }
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    fn name(&self) -> &str {
        &self.endpoint.label
    }

    async fn find_release_by_tag(&self, tag: &str) -> anyhow::Result<ReleaseLookup> {
        let url = self.repo_url(&self.endpoint.api_base, &["releases", "tags", tag])?;
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .context("release lookup request failed")?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ReleaseLookup::NotFound),
            status if status.is_success() => {
                let release = response
                    .json::<RemoteRelease>()
                    .await
                    .context("unexpected release payload")?;
                Ok(ReleaseLookup::Found(release))
            }
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn delete_release(&self, release_id: u64) -> anyhow::Result<()> {
        let id = release_id.to_string();
        let url = self.repo_url(&self.endpoint.api_base, &["releases", &id])?;
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .context("release delete request failed")?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn create_release(&self, release: &NewRelease) -> anyhow::Result<RemoteRelease> {
        let url = self.repo_url(&self.endpoint.api_base, &["releases"])?;
        let response = self
            .request(Method::POST, url)
            .json(release)
            .send()
            .await
            .context("release create request failed")?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<RemoteRelease>()
            .await
            .context("unexpected release payload")
    }

    async fn upload_asset(
        &self,
        release_id: u64,
        asset: AssetUpload,
    ) -> anyhow::Result<RemoteAsset> {
        let id = release_id.to_string();
        let mut url = self.repo_url(&self.endpoint.upload_base, &["releases", &id, "assets"])?;
        url.query_pairs_mut()
            .append_pair("name", &asset.name)
            .append_pair("label", &asset.label);

        let response = self
            .request(Method::POST, url)
            .header(header::CONTENT_TYPE, content_type_for(&asset.name))
            .header(header::CONTENT_LENGTH, asset.size)
            .body(Body::wrap_stream(ReaderStream::new(asset.file)))
            .send()
            .await
            .context("asset upload request failed")?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let uploaded = response
            .json::<ApiAsset>()
            .await
            .context("unexpected asset payload")?;

        Ok(RemoteAsset {
            id: uploaded.id,
            name: uploaded.name,
            label: uploaded.label.unwrap_or_default(),
            release_id,
        })
    }
}

/// Media type sent with an asset, chosen by file extension
pub fn content_type_for(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    let extension = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

    match extension {
        "zip" => "application/zip",
        "gz" | "tgz" => "application/gzip",
        "tar" => "application/x-tar",
        "xz" => "application/x-xz",
        "bz2" => "application/x-bzip2",
        "deb" => "application/vnd.debian.binary-package",
        "rpm" => "application/x-rpm",
        "dmg" => "application/x-apple-diskimage",
        "json" => "application/json",
        "txt" | "md" | "sha256" => "text/plain",
        _ => "application/octet-stream",
    }
}
