//! Shared HTTP client construction.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::SolrError;

/// User-Agent sent when the config does not set one.
pub const DEFAULT_USER_AGENT: &str = concat!("solrq/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured from `config`.
///
/// The client has:
/// - Timeout from config
/// - Configured User-Agent, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`SolrError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SolrError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SolrError::Http(format!("failed to build HTTP client: {e}")))
}

/// Maps a transport failure onto [`SolrError::Timeout`] or [`SolrError::Http`].
pub(crate) fn transport_error(e: reqwest::Error) -> SolrError {
    if e.is_timeout() {
        SolrError::Timeout(e.to_string())
    } else {
        SolrError::Http(e.to_string())
    }
}
