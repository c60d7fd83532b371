//! Credential resolution
//!
//! The token comes from configuration; the account it belongs to is looked
//! up once (`GET /user`) and cached for the lifetime of the resolver.
//! Concurrent first callers share a single in-flight lookup. A failed lookup
//! leaves the resolver uninitialized so a later call can retry.

use crate::http::{self, ACCEPT_JSON, GithubHttp};
use crate::models::Account;
use mcpdevops_core::{DevopsError, Result, ResultExt};
use reqwest::Method;
use std::fmt;
use tokio::sync::OnceCell;

/// A token together with the account it authenticates
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub account: Account,
}

impl Credentials {
    pub fn login(&self) -> &str {
        &self.account.login
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("account", &self.account)
            .finish()
    }
}

pub struct CredentialResolver {
    http: GithubHttp,
    token: String,
    ready: OnceCell<Credentials>,
}

impl CredentialResolver {
    pub fn new(http: GithubHttp, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            ready: OnceCell::new(),
        }
    }

    /// Resolves the account on first use and returns the cached credentials after.
    pub async fn ensure_ready(&self) -> Result<&Credentials> {
        self.ready
            .get_or_try_init(|| self.fetch())
            .await
            .context("Failed to initialize GitHub client")
    }

    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    async fn fetch(&self) -> Result<Credentials> {
        let lookup = async {
            let url = self.http.endpoint(&["user"])?;
            let response =
                http::send(self.http.request(Method::GET, url, &self.token, ACCEPT_JSON)).await?;
            let response = http::ensure_ok(response).await?;
            response
                .json::<Account>()
                .await
                .map_err(|e| DevopsError::InvalidResponse(http::error_chain(&e)))
        };

        let account = lookup.await.context("Error getting GitHub user")?;
        tracing::info!(login = %account.login, "resolved GitHub account");

        Ok(Credentials {
            token: self.token.clone(),
            account,
        })
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("base", &self.http.base().as_str())
            .field("ready", &self.ready.get())
            .finish()
    }
}
