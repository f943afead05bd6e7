//! Decoded Solr responses and HTTP result classification.
//!
//! [`classify`] turns a status code and body into either a [`SolrResponse`]
//! or the matching [`SolrError`]. The response types model the sections
//! the parameter records can request; everything else lands in
//! [`SolrResponse::extra`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Result, SolrError};

/// Longest slice of a non-JSON error body kept in the error message.
const ERROR_SNIPPET_CHARS: usize = 200;

/// The `responseHeader` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseHeader {
    /// Zero on success.
    pub status: i64,
    /// Server-side query time in milliseconds.
    #[serde(rename = "QTime")]
    pub qtime: u64,
    /// Set when `timeAllowed` cut the search short.
    #[serde(rename = "partialResults", skip_serializing_if = "Option::is_none")]
    pub partial_results: Option<bool>,
    /// Echoed request parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// The `response` document list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocList {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub start: u64,
    #[serde(rename = "maxScore", skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(rename = "numFoundExact", skip_serializing_if = "Option::is_none")]
    pub num_found_exact: Option<bool>,
    pub docs: Vec<Value>,
}

/// The `facet_counts` section.
///
/// Field and range counts arrive as flat `[term, count, term, count, ...]`
/// arrays; [`field`](Self::field) and [`range`](Self::range) pair them up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetCounts {
    pub facet_queries: BTreeMap<String, u64>,
    pub facet_fields: BTreeMap<String, Vec<Value>>,
    pub facet_ranges: BTreeMap<String, Value>,
    pub facet_intervals: BTreeMap<String, BTreeMap<String, u64>>,
    pub facet_pivot: BTreeMap<String, Vec<Value>>,
}

impl FacetCounts {
    /// Term counts for a `facet.field`, in Solr's order. The
    /// `facet.missing` bucket is excluded; see [`missing`](Self::missing).
    pub fn field(&self, name: &str) -> Option<Vec<(String, u64)>> {
        self.facet_fields.get(name).map(|flat| flat_pairs(flat))
    }

    /// Count of documents with no value in `name` (`facet.missing=true`).
    pub fn missing(&self, name: &str) -> Option<u64> {
        self.facet_fields
            .get(name)?
            .chunks_exact(2)
            .find(|pair| pair[0].is_null())
            .and_then(|pair| pair[1].as_u64())
    }

    /// Bucket counts for a `facet.range` field.
    pub fn range(&self, name: &str) -> Option<Vec<(String, u64)>> {
        let counts = self.facet_ranges.get(name)?.get("counts")?.as_array()?;
        Some(flat_pairs(counts))
    }

    /// Interval counts for a `facet.interval` field.
    pub fn interval(&self, name: &str) -> Option<&BTreeMap<String, u64>> {
        self.facet_intervals.get(name)
    }

    /// Count for a `facet.query`.
    pub fn query(&self, query: &str) -> Option<u64> {
        self.facet_queries.get(query).copied()
    }
}

fn flat_pairs(flat: &[Value]) -> Vec<(String, u64)> {
    flat.chunks_exact(2)
        .filter_map(|pair| {
            let term = match &pair[0] {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((term, pair[1].as_u64()?))
        })
        .collect()
}

/// One suggester entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub term: String,
    pub weight: i64,
    pub payload: String,
}

/// Suggestions for one `suggest.q` in one dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestTerm {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub suggestions: Vec<Suggestion>,
}

/// A decoded Solr JSON response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolrResponse {
    #[serde(rename = "responseHeader", default)]
    pub response_header: ResponseHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<DocList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_counts: Option<FacetCounts>,
    /// Document id → field → snippets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighting: Option<BTreeMap<String, BTreeMap<String, Vec<String>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spellcheck: Option<Value>,
    /// Dictionary → query → suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest: Option<BTreeMap<String, BTreeMap<String, SuggestTerm>>>,
    #[serde(rename = "moreLikeThis", skip_serializing_if = "Option::is_none")]
    pub more_like_this: Option<Value>,
    #[serde(rename = "nextCursorMark", skip_serializing_if = "Option::is_none")]
    pub next_cursor_mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    /// Every other top-level key (`status` from ping, `grouped`, `stats`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SolrResponse {
    /// Total matches, or 0 when the response carries no document list.
    pub fn num_found(&self) -> u64 {
        self.response.as_ref().map_or(0, |r| r.num_found)
    }

    /// Deserializes the returned documents into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Decode`] if any document does not match `T`.
    pub fn docs<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let Some(list) = &self.response else {
            return Ok(Vec::new());
        };
        list.docs
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                serde_json::from_value(doc.clone())
                    .map_err(|e| SolrError::Decode(format!("document {i}: {e}")))
            })
            .collect()
    }

    /// Highlight snippets for one document field.
    pub fn highlights(&self, doc_id: &str, field: &str) -> &[String] {
        self.highlighting
            .as_ref()
            .and_then(|h| h.get(doc_id))
            .and_then(|fields| fields.get(field))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Suggester results for `query` in `dictionary`.
    pub fn suggestions(&self, dictionary: &str, query: &str) -> &[Suggestion] {
        self.suggest
            .as_ref()
            .and_then(|s| s.get(dictionary))
            .and_then(|terms| terms.get(query))
            .map_or(&[][..], |t| t.suggestions.as_slice())
    }

    /// Misspelled tokens with their corrections, in Solr's order. Handles
    /// both plain and `spellcheck.extendedResults` shapes.
    pub fn spelling_suggestions(&self) -> Vec<(String, Vec<String>)> {
        let Some(flat) = self
            .spellcheck
            .as_ref()
            .and_then(|s| s.get("suggestions"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        flat.chunks_exact(2)
            .filter_map(|pair| {
                let word = pair[0].as_str()?.to_owned();
                let corrections = pair[1]
                    .get("suggestion")?
                    .as_array()?
                    .iter()
                    .filter_map(|s| match s {
                        Value::String(text) => Some(text.clone()),
                        other => other.get("word")?.as_str().map(str::to_owned),
                    })
                    .collect();
                Some((word, corrections))
            })
            .collect()
    }

    /// Collated corrections of the whole query.
    pub fn collations(&self) -> Vec<String> {
        let Some(flat) = self
            .spellcheck
            .as_ref()
            .and_then(|s| s.get("collations"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        flat.chunks_exact(2)
            .filter_map(|pair| match &pair[1] {
                Value::String(text) => Some(text.clone()),
                other => other.get("collationQuery")?.as_str().map(str::to_owned),
            })
            .collect()
    }

    /// `spellcheck.correctlySpelled`, when present.
    pub fn correctly_spelled(&self) -> Option<bool> {
        self.spellcheck.as_ref()?.get("correctlySpelled")?.as_bool()
    }

    /// Similar documents for `doc_id` from the MoreLikeThis component.
    pub fn more_like_this(&self, doc_id: &str) -> Option<DocList> {
        let list = self.more_like_this.as_ref()?.get(doc_id)?;
        serde_json::from_value(list.clone()).ok()
    }

    /// The ping handler's `status` field.
    pub fn ping_status(&self) -> Option<&str> {
        self.extra.get("status").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    trace: Option<String>,
}

/// Classifies an HTTP response.
///
/// - non-2xx → [`SolrError::Server`] with Solr's `error.msg` when the body
///   carries one, otherwise the start of the raw body;
/// - 2xx that is not valid JSON → [`SolrError::Decode`];
/// - 2xx with a non-zero `responseHeader.status` → [`SolrError::Server`];
/// - anything else → the decoded [`SolrResponse`].
///
/// # Errors
///
/// As listed above.
pub fn classify(status: u16, body: &str) -> Result<SolrResponse> {
    if !(200..300).contains(&status) {
        return Err(server_error(status, body));
    }
    let parsed: SolrResponse = serde_json::from_str(body)
        .map_err(|e| SolrError::Decode(format!("invalid JSON response: {e}")))?;
    if parsed.response_header.status != 0 {
        let header_status = parsed.response_header.status;
        let message = parsed
            .extra
            .get("error")
            .and_then(|e| e.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("responseHeader.status = {header_status}"));
        return Err(SolrError::Server {
            status: u16::try_from(header_status).unwrap_or(500),
            message,
        });
    }
    Ok(parsed)
}

fn server_error(status: u16, body: &str) -> SolrError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => error
            .msg
            .or_else(|| error.trace.and_then(|t| t.lines().next().map(str::to_owned)))
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => {
            let snippet: String = body.trim().chars().take(ERROR_SNIPPET_CHARS).collect();
            if snippet.is_empty() {
                format!("HTTP {status}")
            } else {
                snippet
            }
        }
    };
    SolrError::Server { status, message }
}
