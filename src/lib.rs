//! # solrq
//!
//! Async client for Apache Solr's HTTP API.
//!
//! Requests are built from the typed parameter records in
//! [`solrq_params`] (re-exported as [`params`]), sent to a core resolved
//! from an [`Endpoint`], and classified into a [`SolrResponse`] or a
//! [`SolrError`].
//!
//! ## Design
//!
//! - Parameter records flatten into one ordered query string
//! - Endpoints are explicit URLs, configured names or descriptors
//! - Long queries switch from GET to a form-encoded POST
//! - Solr error bodies become [`SolrError::Server`] with Solr's message
//!
//! ## Logging
//!
//! Query strings and update bodies are logged only at trace level.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> solrq::Result<()> {
//! use solrq::params::{FacetParams, QueryParams};
//! use solrq::{ClientConfig, Endpoint, SolrClient};
//!
//! let client = SolrClient::new(ClientConfig::default())?;
//! let books = Endpoint::Url("http://localhost:8983/solr/books".into());
//! let query = QueryParams::new("title:rust").with_rows(5);
//! let facets = FacetParams::new().with_field("author");
//!
//! let response = client.search(&books, &[&query, &facets]).await?;
//! println!("{} matches", response.num_found());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;

pub use solrq_params as params;

pub use client::SolrClient;
pub use config::{ClientConfig, EndpointConfig};
pub use endpoint::{Endpoint, EndpointDescriptor, Handler};
pub use error::{Result, SolrError};
pub use response::{
    classify, DocList, FacetCounts, ResponseHeader, SolrResponse, SuggestTerm, Suggestion,
};
