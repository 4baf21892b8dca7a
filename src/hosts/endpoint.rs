//! API endpoint selection
//!
//! The public instance has dedicated API and upload hosts; an enterprise
//! server serves both below its own base address.

use crate::core::error::ReleaseError;
use crate::core::request::PUBLIC_HOST_URL;
use reqwest::Url;

const PUBLIC_API_URL: &str = "https://api.github.com/";
const PUBLIC_UPLOAD_URL: &str = "https://uploads.github.com/";
const ENTERPRISE_API_PATH: &str = "api/v3/";
const ENTERPRISE_UPLOAD_PATH: &str = "api/uploads/";

/// Base URLs for REST calls and asset uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEndpoint {
    pub api_base: Url,
    pub upload_base: Url,
    /// Host label for log output
    pub label: String,
}

impl HostEndpoint {
    /// Pick the endpoint for a `github_host` setting
    ///
    /// # Examples
    ///
    /// ```
    /// use ghrelease::hosts::HostEndpoint;
    ///
    /// let endpoint = HostEndpoint::for_host("https://github.example.com").unwrap();
    /// assert_eq!(endpoint.api_base.as_str(), "https://github.example.com/api/v3/");
    /// assert_eq!(endpoint.upload_base.as_str(), "https://github.example.com/api/uploads/");
    /// ```
    pub fn for_host(host_url: &str) -> Result<Self, ReleaseError> {
        let trimmed = host_url.trim().trim_end_matches('/');

        if trimmed == PUBLIC_HOST_URL {
            return Ok(Self::public());
        }

        let base = Url::parse(&format!("{}/", trimmed)).map_err(|e| {
            ReleaseError::config(format!("invalid github_host '{}': {}", host_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ReleaseError::config(format!(
                "invalid github_host '{}': expected an http(s) URL",
                host_url
            )));
        }

        let api_base = base.join(ENTERPRISE_API_PATH).map_err(|e| {
            ReleaseError::config(format!("invalid github_host '{}': {}", host_url, e))
        })?;
        let upload_base = base.join(ENTERPRISE_UPLOAD_PATH).map_err(|e| {
            ReleaseError::config(format!("invalid github_host '{}': {}", host_url, e))
        })?;

        Ok(Self {
            label: base.host_str().unwrap_or(trimmed).to_string(),
            api_base,
            upload_base,
        })
    }

    /// Endpoint of the public instance
    pub fn public() -> Self {
        Self {
            api_base: Url::parse(PUBLIC_API_URL).expect("valid public API URL"),
            upload_base: Url::parse(PUBLIC_UPLOAD_URL).expect("valid public upload URL"),
            label: "github.com".to_string(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.api_base.as_str() == PUBLIC_API_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_host() {
        let endpoint = HostEndpoint::for_host("https://github.com").unwrap();

        assert!(endpoint.is_public());
        assert_eq!(endpoint.api_base.as_str(), "https://api.github.com/");
        assert_eq!(endpoint.upload_base.as_str(), "https://uploads.github.com/");
        assert_eq!(endpoint.label, "github.com");
    }

    #[test]
    fn test_public_host_with_trailing_slash() {
        let endpoint = HostEndpoint::for_host("https://github.com/").unwrap();
        assert!(endpoint.is_public());
    }

    #[test]
    fn test_enterprise_host() {
        let endpoint = HostEndpoint::for_host("https://git.corp.example").unwrap();

        assert!(!endpoint.is_public());
        assert_eq!(endpoint.api_base.as_str(), "https://git.corp.example/api/v3/");
        assert_eq!(
            endpoint.upload_base.as_str(),
            "https://git.corp.example/api/uploads/"
        );
        assert_eq!(endpoint.label, "git.corp.example");
    }

    #[test]
    fn test_enterprise_host_with_path_prefix() {
        let endpoint = HostEndpoint::for_host("http://127.0.0.1:8080/ghe/").unwrap();

        assert_eq!(endpoint.api_base.as_str(), "http://127.0.0.1:8080/ghe/api/v3/");
        assert_eq!(
            endpoint.upload_base.as_str(),
            "http://127.0.0.1:8080/ghe/api/uploads/"
        );
    }

    #[test]
    fn test_invalid_host() {
        let err = HostEndpoint::for_host("not a url").unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");

        let err = HostEndpoint::for_host("ftp://github.example.com").unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }
}
