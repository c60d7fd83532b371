//! HTTP client construction for GitHub interactions

use mcpdevops_core::config::{API_VERSION, USER_AGENT};
use mcpdevops_core::{DevopsError, Result};
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Connect timeout; requests themselves are not bounded
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type for JSON API responses
pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Media type used for the log archive endpoint
pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Builds HTTP client with appropriate settings for GitHub
///
/// Log archives are served through a redirect to blob storage, so redirects
/// are followed. reqwest drops the `Authorization` header when a redirect
/// leaves the API host.
pub fn build_client(connect_timeout: Duration) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .redirect(Policy::limited(10))
        .build()
}

/// Authenticated access to one GitHub API base URL
#[derive(Clone, Debug)]
pub struct GithubHttp {
    client: Client,
    base: Url,
}

impl GithubHttp {
    pub fn new(base: Url) -> Result<Self> {
        let client = build_client(CONNECT_TIMEOUT)
            .map_err(|e| DevopsError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// A segment containing `/` stays a single segment (`src/index.js`
    /// becomes `src%2Findex.js`).
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DevopsError::Config(format!("API URL cannot be a base: {}", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts a request carrying the standard GitHub headers.
    pub fn request(&self, method: Method, url: Url, token: &str, accept: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(ACCEPT, accept)
            .header(API_VERSION_HEADER, API_VERSION)
            .bearer_auth(token)
    }
}

/// Sends a request, mapping transport failures to [`DevopsError::Network`].
pub async fn send(request: RequestBuilder) -> Result<Response> {
    request
        .send()
        .await
        .map_err(|e| DevopsError::Network(error_chain(&e.without_url())))
}

/// Joins an error and its sources into one line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Converts a non-2xx response into [`DevopsError::Api`] carrying the body text.
pub async fn ensure_ok(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DevopsError::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}
