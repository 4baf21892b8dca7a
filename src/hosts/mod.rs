//! Hosting-platform bindings for `RepositoryHost`

pub mod endpoint;
pub mod github;

pub use endpoint::HostEndpoint;
pub use github::{GitHubHost, GitHubHostConfig};

use crate::core::error::ReleaseError;
use crate::core::request::ReleaseRequest;
use secrecy::SecretString;
use std::time::Duration;

/// Request timeout applied to every API call made by `connect`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Build the GitHub host for the repository named in `request`
pub fn connect(request: &ReleaseRequest, token: SecretString) -> Result<GitHubHost, ReleaseError> {
    let endpoint = HostEndpoint::for_host(&request.host_url)?;

    GitHubHost::new(GitHubHostConfig {
        endpoint,
        owner: request.owner.clone(),
        repo: request.repo_name.clone(),
        token,
        timeout: Some(DEFAULT_TIMEOUT),
    })
}
