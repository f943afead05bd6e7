//! Endpoint resolution: turning a logical target into a core's base URL.
//!
//! A request names its target as an explicit URL, a name from
//! [`ClientConfig::endpoints`], a structured [`EndpointDescriptor`], or the
//! configured default. Resolution always yields a URL ending in `/`, so
//! handler paths join beneath the core instead of replacing it.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::config::{ClientConfig, EndpointConfig};
use crate::error::{Result, SolrError};

/// Structured description of a Solr core or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointDescriptor {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Servlet context path, usually `solr`. May be empty.
    pub path: String,
    /// Core or collection name.
    pub core: String,
}

impl Default for EndpointDescriptor {
    fn default() -> Self {
        Self {
            scheme: "http".into(),
            host: "localhost".into(),
            port: 8983,
            path: "solr".into(),
            core: String::new(),
        }
    }
}

impl EndpointDescriptor {
    /// A descriptor for `core` on the default local Solr.
    pub fn core(core: impl Into<String>) -> Self {
        Self {
            core: core.into(),
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Assembles `scheme://host:port/path/core/`.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Config`] if `core` is empty or the parts do not
    /// form a valid URL.
    pub fn to_url(&self) -> Result<Url> {
        if self.core.trim_matches('/').is_empty() {
            return Err(SolrError::Config("endpoint descriptor has no core".into()));
        }
        parse_base(&self.to_string())
    }
}

impl fmt::Display for EndpointDescriptor {
    /// `scheme://host:port/path/core`, skipping an empty `path`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}/", self.scheme, self.host, self.port)?;
        let path = self.path.trim_matches('/');
        if !path.is_empty() {
            write!(f, "{path}/")?;
        }
        f.write_str(self.core.trim_matches('/'))
    }
}

/// The target of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Explicit base URL of a core, e.g. `http://localhost:8983/solr/books`.
    Url(String),
    /// A name from the config's `endpoints` table.
    Named(String),
    /// A structured descriptor.
    Descriptor(EndpointDescriptor),
    /// The config's `default_endpoint`.
    Default,
}

impl Endpoint {
    /// Interprets user input: anything containing `://` is a URL, anything
    /// else is a configured name.
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") {
            Self::Url(raw.to_owned())
        } else {
            Self::Named(raw.to_owned())
        }
    }

    /// Resolves this endpoint against `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Config`] for unknown names, a missing default,
    /// or URLs that are not absolute `http`/`https` URLs.
    pub fn resolve(&self, config: &ClientConfig) -> Result<Url> {
        match self {
            Self::Url(raw) => parse_base(raw),
            Self::Named(name) => resolve_named(name, config),
            Self::Descriptor(descriptor) => descriptor.to_url(),
            Self::Default => {
                let name = config.default_endpoint.as_deref().ok_or_else(|| {
                    SolrError::Config("no endpoint given and no default_endpoint configured".into())
                })?;
                resolve_named(name, config)
            }
        }
    }
}

impl From<EndpointDescriptor> for Endpoint {
    fn from(descriptor: EndpointDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<Url> for Endpoint {
    fn from(url: Url) -> Self {
        Self::Url(url.into())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(raw) => f.write_str(raw),
            Self::Named(name) => write!(f, "@{name}"),
            Self::Descriptor(d) => fmt::Display::fmt(d, f),
            Self::Default => f.write_str("@default"),
        }
    }
}

fn resolve_named(name: &str, config: &ClientConfig) -> Result<Url> {
    match config.endpoints.get(name) {
        Some(EndpointConfig::Url(raw)) => parse_base(raw),
        Some(EndpointConfig::Descriptor(descriptor)) => descriptor.to_url(),
        None => Err(SolrError::Config(format!("unknown endpoint `{name}`"))),
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| SolrError::Config(format!("invalid endpoint URL `{raw}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SolrError::Config(format!(
            "endpoint URL `{raw}` must use http or https"
        )));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// A Solr request handler, relative to a core's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Standard search (`select`).
    Select,
    /// JSON update commands (`update`).
    Update,
    /// Suggester component (`suggest`).
    Suggest,
    /// Spellcheck request handler (`spell`).
    Spell,
    /// MoreLikeThis request handler (`mlt`).
    MoreLikeThis,
    /// Terms component (`terms`).
    Terms,
    /// Health check (`admin/ping`).
    Ping,
    /// Any other handler path, e.g. `browse` or `admin/luke`.
    Custom(String),
}

impl Handler {
    /// Path of this handler below the core.
    pub fn path(&self) -> &str {
        match self {
            Self::Select => "select",
            Self::Update => "update",
            Self::Suggest => "suggest",
            Self::Spell => "spell",
            Self::MoreLikeThis => "mlt",
            Self::Terms => "terms",
            Self::Ping => "admin/ping",
            Self::Custom(path) => path.trim_start_matches('/'),
        }
    }

    /// Joins this handler onto a resolved base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Config`] if the joined URL is invalid.
    pub fn url(&self, base: &Url) -> Result<Url> {
        base.join(self.path())
            .map_err(|e| SolrError::Config(format!("invalid handler path `{}`: {e}", self.path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config_with(name: &str, endpoint: EndpointConfig) -> ClientConfig {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(name.to_owned(), endpoint);
        ClientConfig {
            endpoints,
            ..Default::default()
        }
    }

    #[test]
    fn explicit_url_gets_trailing_slash() {
        let url = Endpoint::Url("http://localhost:8983/solr/books".into())
            .resolve(&ClientConfig::default())
            .expect("resolve");
        assert_eq!(url.as_str(), "http://localhost:8983/solr/books/");
    }

    #[test]
    fn query_and_fragment_are_dropped() {
        let url = Endpoint::Url("https://search.example.com/solr/books/?wt=xml#top".into())
            .resolve(&ClientConfig::default())
            .expect("resolve");
        assert_eq!(url.as_str(), "https://search.example.com/solr/books/");
    }

    #[test]
    fn non_http_scheme_rejected() {
        let err = Endpoint::Url("ftp://localhost/solr/books".into())
            .resolve(&ClientConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn malformed_url_rejected() {
        let err = Endpoint::Url("http://".into())
            .resolve(&ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, SolrError::Config(_)));
    }

    #[test]
    fn named_url_endpoint() {
        let config = config_with(
            "books",
            EndpointConfig::Url("http://solr:8983/solr/books".into()),
        );
        let url = Endpoint::Named("books".into()).resolve(&config).expect("resolve");
        assert_eq!(url.as_str(), "http://solr:8983/solr/books/");
    }

    #[test]
    fn named_descriptor_endpoint() {
        let config = config_with(
            "films",
            EndpointConfig::Descriptor(EndpointDescriptor::core("films").with_host("solr1")),
        );
        let url = Endpoint::Named("films".into()).resolve(&config).expect("resolve");
        assert_eq!(url.as_str(), "http://solr1:8983/solr/films/");
    }

    #[test]
    fn unknown_name_rejected() {
        let err = Endpoint::Named("nope".into())
            .resolve(&ClientConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("unknown endpoint `nope`"));
    }

    #[test]
    fn default_endpoint_resolves_through_name() {
        let mut config = config_with("main", EndpointConfig::Url("http://h/solr/main".into()));
        config.default_endpoint = Some("main".into());
        let url = Endpoint::Default.resolve(&config).expect("resolve");
        assert_eq!(url.as_str(), "http://h/solr/main/");
    }

    #[test]
    fn missing_default_rejected() {
        let err = Endpoint::Default.resolve(&ClientConfig::default()).unwrap_err();
        assert!(err.to_string().contains("default_endpoint"));
    }

    #[test]
    fn descriptor_without_path() {
        let url = EndpointDescriptor::core("books")
            .with_path("")
            .with_scheme("https")
            .with_port(443)
            .to_url()
            .expect("url");
        assert_eq!(url.as_str(), "https://localhost/books/");
    }

    #[test]
    fn descriptor_display_matches_resolved_url() {
        let without_path = EndpointDescriptor::core("books").with_path("");
        assert_eq!(
            Endpoint::from(without_path.clone()).to_string(),
            "http://localhost:8983/books"
        );
        assert_eq!(
            without_path.to_url().expect("url").as_str(),
            format!("{without_path}/")
        );

        let with_path = EndpointDescriptor::core("books");
        assert_eq!(with_path.to_string(), "http://localhost:8983/solr/books");
    }

    #[test]
    fn descriptor_without_core_rejected() {
        assert!(EndpointDescriptor::default().to_url().is_err());
    }

    #[test]
    fn parse_distinguishes_urls_from_names() {
        assert_eq!(
            Endpoint::parse("http://h/solr/c"),
            Endpoint::Url("http://h/solr/c".into())
        );
        assert_eq!(Endpoint::parse("books"), Endpoint::Named("books".into()));
    }

    #[test]
    fn handler_joins_below_core() {
        let base = Url::parse("http://h:8983/solr/books/").expect("url");
        assert_eq!(
            Handler::Select.url(&base).expect("join").as_str(),
            "http://h:8983/solr/books/select"
        );
        assert_eq!(
            Handler::Ping.url(&base).expect("join").as_str(),
            "http://h:8983/solr/books/admin/ping"
        );
        assert_eq!(
            Handler::Custom("/admin/luke".into()).url(&base).expect("join").as_str(),
            "http://h:8983/solr/books/admin/luke"
        );
    }
}
