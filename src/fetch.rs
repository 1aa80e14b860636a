// src/fetch.rs
// =============================================================================
// This module wraps all network access behind one small client.
//
// The search engine needs two kinds of fetches:
// - fetch_document: the rendered HTML of an article (REST endpoint)
// - fetch_json: a page of the link-listing API (Action API endpoint)
//
// Both go through a single reqwest Client so we get connection pooling,
// a per-request timeout, and an identifying User-Agent on every request.
// The base URL can be overridden, which is how the tests point the client
// at a local mock server instead of Wikipedia.
//
// Rust concepts:
// - async functions: For network I/O
// - Generics: fetch_json works for any Deserialize-able response type
// - Enums with data: FetchError carries the failing URL for diagnostics
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Where we talk to when no override is given.
pub const DEFAULT_WIKI_BASE: &str = "https://en.wikipedia.org";

/// Default request-identification string, sent as the User-Agent.
/// Wikipedia asks bots to identify themselves; users can override this
/// with --contact to include their own contact info.
pub const DEFAULT_CONTACT: &str = "bacon-pathfinder/0.1 (set --contact to identify yourself)";

// Rendered-HTML endpoint, relative to the wiki base
const REST_HTML_PATH: &str = "api/rest_v1/page/html";
// Action API endpoint, relative to the wiki base
const ACTION_API_PATH: &str = "w/api.php";

// How long we wait for a single request before giving up.
// A timed-out page is treated as a dead end by the crawler, not a fatal error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Represents the ways a single fetch can fail
//
// All of these are "network-error kind" failures from the engine's point of
// view: the caller decides whether to skip the page or abort.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connection, DNS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code
    #[error("request to {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be read or decoded into the expected type
    #[error("response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
}

// The HTTP client used for all wiki requests
//
// Cloning is cheap: reqwest::Client is a reference-counted handle, so the
// server can hand a clone to every request without rebuilding the pool.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    base: Url,
}

impl WikiClient {
    /// Creates a client pointed at the real Wikipedia.
    pub fn new(contact: &str) -> Result<Self> {
        Self::with_base(DEFAULT_WIKI_BASE, contact)
    }

    /// Creates a client pointed at an arbitrary base URL.
    ///
    /// Tests use this to aim at a local mockito server.
    pub fn with_base(base: &str, contact: &str) -> Result<Self> {
        // Validate the base URL up front so a typo fails fast,
        // not on the hundredth request
        let base = Url::parse(base)
            .map_err(|e| anyhow!("Invalid wiki base URL '{}': {}", base, e))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(contact)
            .build()?;

        Ok(Self { http, base })
    }

    // Fetches the rendered HTML document for an article title
    //
    // Parameters:
    //   title: the article title, already in URL form (underscores, encoded)
    //
    // Returns: the raw HTML text, or a FetchError
    pub async fn fetch_document(&self, title: &str) -> Result<String, FetchError> {
        // Url::to_string() always ends the authority with '/',
        // so joining with relative paths is safe
        let url = format!("{}{}/{}", self.base, REST_HTML_PATH, title);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }

    // Fetches one page of the Action API and deserializes it
    //
    // Parameters:
    //   params: query-string parameters, including any continuation tokens
    //
    // Returns: the response deserialized into T, or a FetchError
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        params: &[(String, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base, ACTION_API_PATH);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}
