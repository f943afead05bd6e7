//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] controls timeouts, the User-Agent, the GET/POST cutover
//! and the table of named endpoints. It loads from TOML:
//!
//! ```toml
//! timeout_seconds = 5
//! default_endpoint = "books"
//!
//! [endpoints]
//! books = "http://localhost:8983/solr/books"
//!
//! [endpoints.films]
//! host = "solr.internal"
//! core = "films"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::endpoint::EndpointDescriptor;
use crate::error::{Result, SolrError};

/// Environment variable overriding [`ClientConfig::default_config_path`].
pub const CONFIG_ENV: &str = "SOLRQ_CONFIG";

/// A named endpoint: either a base URL or a structured descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointConfig {
    Url(String),
    Descriptor(EndpointDescriptor),
}

/// Configuration for a [`crate::SolrClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. If `None`, `solrq/<version>` is sent.
    pub user_agent: Option<String>,
    /// Longest encoded query string sent with GET; longer ones are POSTed as
    /// a form body.
    pub max_get_length: usize,
    /// Endpoint used when a request names none.
    pub default_endpoint: Option<String>,
    /// Named endpoints.
    pub endpoints: BTreeMap<String, EndpointConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: None,
            max_get_length: 2048,
            default_endpoint: None,
            endpoints: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `max_get_length` must be greater than 0
    /// - `default_endpoint`, if set, must name an entry in `endpoints`
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(SolrError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_get_length == 0 {
            return Err(SolrError::Config(
                "max_get_length must be greater than 0".into(),
            ));
        }
        if let Some(name) = &self.default_endpoint {
            if !self.endpoints.contains_key(name) {
                return Err(SolrError::Config(format!(
                    "default_endpoint `{name}` is not in endpoints"
                )));
            }
        }
        Ok(())
    }

    /// Adds a named URL endpoint.
    pub fn with_endpoint(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.endpoints
            .insert(name.into(), EndpointConfig::Url(url.into()));
        self
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SolrError::Config(e.to_string()))
    }

    /// Loads `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or existing default file cannot be
    /// read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Self::default_config_path();
        if default_path.exists() {
            tracing::debug!(path = %default_path.display(), "loading default config");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SolrError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `$SOLRQ_CONFIG`, else
    /// `dirs::config_dir()/solrq/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("solrq").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("/tmp/solrq-config/config.toml"))
    }
}
