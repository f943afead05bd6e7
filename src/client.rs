//! The async Solr client.
//!
//! [`SolrClient`] owns one `reqwest::Client` and the [`ClientConfig`] it was
//! built from. Every request resolves its [`Endpoint`], flattens its
//! parameter records and runs the response through [`classify`].

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use solrq_params::{
    encode_validated, MltMode, MoreLikeThisParams, Params, QueryString, SuggesterParams,
    UpdateParams, UpdatePayload,
};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, Handler};
use crate::error::Result;
use crate::http::{build_client, transport_error};
use crate::response::{classify, SolrResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for one or more Solr cores.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SolrClient {
    /// Validates `config` and builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolrError::Config`] for an invalid config and
    /// [`crate::SolrError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = build_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `records` to `handler` on `endpoint`.
    ///
    /// Records are validated and flattened in slice order. `wt=json` is
    /// added unless a record sets `wt`. The request is a GET while the
    /// encoded query fits in [`ClientConfig::max_get_length`] bytes and a
    /// form-encoded POST otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolrError::Params`] if a record fails validation,
    /// otherwise whatever endpoint resolution, transport or [`classify`]
    /// reports.
    pub async fn request(
        &self,
        endpoint: &Endpoint,
        handler: &Handler,
        records: &[&dyn Params],
    ) -> Result<SolrResponse> {
        let url = handler.url(&endpoint.resolve(&self.config)?)?;
        let query = with_json_writer(encode_validated(records)?);
        let encoded = query.to_query_string();
        tracing::trace!(handler = handler.path(), query = %encoded, "encoded request");

        if encoded.len() <= self.config.max_get_length {
            let mut get_url = url.clone();
            get_url.set_query(Some(&encoded));
            self.execute("GET", &url, self.http.get(get_url)).await
        } else {
            tracing::debug!(
                bytes = encoded.len(),
                limit = self.config.max_get_length,
                "query too long for GET, sending as form body"
            );
            let request = self
                .http
                .post(url.clone())
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encoded);
            self.execute("POST", &url, request).await
        }
    }

    /// Runs a query against the `select` handler.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn search(
        &self,
        endpoint: &Endpoint,
        records: &[&dyn Params],
    ) -> Result<SolrResponse> {
        self.request(endpoint, &Handler::Select, records).await
    }

    /// Asks the `suggest` handler for completions.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn suggest(
        &self,
        endpoint: &Endpoint,
        params: &SuggesterParams,
    ) -> Result<SolrResponse> {
        self.request(endpoint, &Handler::Suggest, &[params]).await
    }

    /// Runs `records` against the `spell` handler. Include a
    /// [`solrq_params::SpellcheckParams`] to control the component.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn spellcheck(
        &self,
        endpoint: &Endpoint,
        records: &[&dyn Params],
    ) -> Result<SolrResponse> {
        self.request(endpoint, &Handler::Spell, records).await
    }

    /// Finds similar documents. Handler-mode records go to the `mlt`
    /// handler; component-mode records ride along a normal `select`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn more_like_this(
        &self,
        endpoint: &Endpoint,
        mlt: &MoreLikeThisParams,
        records: &[&dyn Params],
    ) -> Result<SolrResponse> {
        let handler = match mlt.mode {
            MltMode::Handler => Handler::MoreLikeThis,
            MltMode::Component => Handler::Select,
        };
        let mut all: Vec<&dyn Params> = records.to_vec();
        all.push(mlt);
        self.request(endpoint, &handler, &all).await
    }

    /// Posts `payload` to the `update` handler with `params` in the query
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolrError::Params`] if `params` fail validation,
    /// otherwise whatever endpoint resolution, transport or [`classify`]
    /// reports.
    pub async fn update(
        &self,
        endpoint: &Endpoint,
        payload: &UpdatePayload,
        params: &UpdateParams,
    ) -> Result<SolrResponse> {
        let url = Handler::Update.url(&endpoint.resolve(&self.config)?)?;
        let query = with_json_writer(encode_validated(&[params])?);
        let body = payload.to_json();
        tracing::trace!(query = %query, body_bytes = body.len(), commands = payload.len(), "update request");

        let mut post_url = url.clone();
        post_url.set_query(Some(&query.to_query_string()));
        let request = self
            .http
            .post(post_url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute("POST", &url, request).await
    }

    /// Adds `docs` in one update request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolrError::Params`] if a document does not serialize
    /// to a JSON object; otherwise see [`update`](Self::update).
    pub async fn add_documents<T: Serialize>(
        &self,
        endpoint: &Endpoint,
        docs: &[T],
        params: &UpdateParams,
    ) -> Result<SolrResponse> {
        let payload = UpdatePayload::new().add_all(docs)?;
        self.update(endpoint, &payload, params).await
    }

    /// Deletes documents by unique key.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete_by_ids<S: Into<String>>(
        &self,
        endpoint: &Endpoint,
        ids: impl IntoIterator<Item = S>,
        params: &UpdateParams,
    ) -> Result<SolrResponse> {
        let payload = UpdatePayload::new().delete_by_ids(ids);
        self.update(endpoint, &payload, params).await
    }

    /// Deletes every document matching `query`.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete_by_query(
        &self,
        endpoint: &Endpoint,
        query: &str,
        params: &UpdateParams,
    ) -> Result<SolrResponse> {
        let payload = UpdatePayload::new().delete_by_query(query);
        self.update(endpoint, &payload, params).await
    }

    /// Issues a hard commit.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn commit(&self, endpoint: &Endpoint) -> Result<SolrResponse> {
        let payload = UpdatePayload::new().commit();
        self.update(endpoint, &payload, &UpdateParams::default())
            .await
    }

    /// Merges segments, down to `max_segments` when given.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn optimize(
        &self,
        endpoint: &Endpoint,
        max_segments: Option<u32>,
    ) -> Result<SolrResponse> {
        let payload = UpdatePayload::new().optimize(max_segments);
        self.update(endpoint, &payload, &UpdateParams::default())
            .await
    }

    /// Checks the core's ping handler. `Ok(false)` means Solr answered but
    /// did not report `OK`.
    ///
    /// # Errors
    ///
    /// Returns the transport or [`classify`] error when the ping itself
    /// fails, including a disabled ping handler (HTTP 503).
    pub async fn ping(&self, endpoint: &Endpoint) -> Result<bool> {
        let response = self.request(endpoint, &Handler::Ping, &[]).await?;
        Ok(response.ping_status() == Some("OK"))
    }

    async fn execute(
        &self,
        method: &str,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<SolrResponse> {
        tracing::debug!(method, url = %url, "sending Solr request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method, url = %url, error = %e, "Solr request failed");
            transport_error(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        match classify(status, &body) {
            Ok(parsed) => {
                tracing::debug!(
                    url = %url,
                    status,
                    qtime = parsed.response_header.qtime,
                    "Solr response received"
                );
                Ok(parsed)
            }
            Err(e) => {
                tracing::warn!(url = %url, status, error = %e, "Solr returned an error");
                Err(e)
            }
        }
    }
}

fn with_json_writer(mut query: QueryString) -> QueryString {
    if !query.contains_key("wt") {
        query.push("wt", "json");
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use solrq_params::{QueryParams, RawParams};

    #[test]
    fn json_writer_added_when_missing() {
        let query = with_json_writer(QueryParams::new("*:*").flatten());
        assert_eq!(query.to_query_string(), "q=*%3A*&wt=json");
    }

    #[test]
    fn explicit_writer_is_kept() {
        let raw = RawParams::new().with("wt", "javabin");
        let query = with_json_writer(raw.flatten());
        assert_eq!(query.get_all("wt"), vec!["javabin"]);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(SolrClient::new(config).is_err());
    }

    #[tokio::test]
    async fn invalid_record_fails_before_sending() {
        let client = SolrClient::new(ClientConfig::default()).expect("client");
        let bad = QueryParams::new("*:*").with_cursor_mark("*");
        let err = client
            .search(&Endpoint::Url("http://127.0.0.1:9/solr/c".into()), &[&bad])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::SolrError::Params(_)));
    }
}
