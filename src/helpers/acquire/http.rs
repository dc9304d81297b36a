//! HTTP fetching
//!
//! Downloads archives into memory with a blocking `ureq` client.
//!
//! ## Private repository authentication
//!
//! The component library lives in a private repository. Set `GITHUB_TOKEN`
//! before running the bundler:
//! ```bash
//! export GITHUB_TOKEN="ghp_xxxxxxxxxxxxxxxxxxxx"
//! ```
//! Without it the request is still attempted and a 401 is reported as an
//! authentication failure naming the variable.

use super::download;
use crate::core::config::BundleConfig;
use crate::core::output;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("xmlui-bundler/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a URL into the bytes behind it.
///
/// The pipeline only talks to this trait so tests can serve archives from memory.
pub trait Fetcher {
    /// Fetch `url`. `label` is a human-readable name used in progress output.
    fn fetch(&self, url: &str, label: &str) -> Result<Vec<u8>>;
}

/// Fetcher backed by real HTTP(S) GET requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    private_repo_marker: String,
    token_env_var: String,
    token: Option<String>,
}

impl HttpFetcher {
    /// Build a fetcher, reading the credential from the configured environment variable.
    pub fn from_env(config: &BundleConfig) -> Self {
        let token = std::env::var(&config.token_env_var)
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self::with_token(config, token)
    }

    /// Build a fetcher with an explicit credential.
    pub fn with_token(config: &BundleConfig, token: Option<String>) -> Self {
        Self {
            private_repo_marker: config.private_repo_marker.clone(),
            token_env_var: config.token_env_var.clone(),
            token,
        }
    }

    fn requires_auth(&self, url: &str) -> bool {
        !self.private_repo_marker.is_empty() && url.contains(&self.private_repo_marker)
    }

    fn request(&self, url: &str) -> ureq::Request {
        let mut request = ureq::get(url).set("User-Agent", USER_AGENT);

        if self.requires_auth(url) {
            match &self.token {
                Some(token) => {
                    output::detail("Using authentication token for private repository");
                    request = request.set("Authorization", &format!("Bearer {}", token));
                }
                None => output::warning(&format!(
                    "No authentication token found for private repository (set {})",
                    self.token_env_var
                )),
            }
        }

        request
    }

    fn status_error(&self, url: &str, status: u16) -> Error {
        if status == 401 && self.requires_auth(url) {
            Error::Authentication {
                url: url.to_string(),
                status,
                env_var: self.token_env_var.clone(),
            }
        } else {
            Error::RequestFailed {
                status,
                url: url.to_string(),
            }
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        output::action(&format!("Downloading {}...", label));
        output::detail(&format!("From: {}", url));

        let response = self.request(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => self.status_error(url, status),
            ureq::Error::Transport(t) => Error::Network {
                url: url.to_string(),
                message: t.to_string(),
            },
        })?;

        // ureq only reports >= 400 as errors; anything but 200 is still a failure here.
        if response.status() != 200 {
            return Err(self.status_error(url, response.status()));
        }

        let data = download::read_body(response, url)?;
        output::detail(&format!("Downloaded: {} bytes", data.len()));
        Ok(data)
    }
}
