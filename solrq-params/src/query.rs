//! Common query parameters (`q`, `fq`, `fl`, `sort`, paging, response format).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;
use crate::types::{QueryOperator, SortClause};

/// Which request parameters Solr echoes back in `responseHeader.params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EchoParams {
    /// Echo nothing.
    None,
    /// Echo only the parameters sent with the request.
    Explicit,
    /// Echo the request parameters plus handler defaults.
    All,
}

impl EchoParams {
    /// Returns the wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Explicit => "explicit",
            Self::All => "all",
        }
    }
}

impl fmt::Display for EchoParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The basic query record shared by every search handler.
///
/// Keys are written in this order: `q`, `fq`, `fl`, `sort`, `start`, `rows`,
/// `df`, `q.op`, `defType`, `wt`, `cursorMark`, `timeAllowed`, `debugQuery`,
/// `echoParams`, `omitHeader`, `tz`, `cache`, then `extra` verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Main query (`q`).
    pub q: Option<String>,
    /// Filter queries (`fq`), one pair each.
    pub filters: Vec<String>,
    /// Returned fields (`fl`), comma-joined.
    pub fields: Vec<String>,
    /// Sort clauses (`sort`), comma-joined.
    pub sort: Vec<SortClause>,
    /// Offset of the first document (`start`).
    pub start: Option<u64>,
    /// Page size (`rows`).
    pub rows: Option<u64>,
    /// Default search field (`df`).
    pub default_field: Option<String>,
    /// Default operator (`q.op`).
    pub operator: Option<QueryOperator>,
    /// Query parser (`defType`). A DisMax record in the same request wins.
    pub def_type: Option<String>,
    /// Response writer (`wt`).
    pub wt: Option<String>,
    /// Deep-paging cursor (`cursorMark`); `*` starts a new cursor.
    pub cursor_mark: Option<String>,
    /// Search time budget in milliseconds (`timeAllowed`).
    pub time_allowed: Option<u64>,
    /// Include debug output (`debugQuery`).
    pub debug_query: Option<bool>,
    /// Parameter echo mode (`echoParams`).
    pub echo_params: Option<EchoParams>,
    /// Drop the response header (`omitHeader`).
    pub omit_header: Option<bool>,
    /// Time zone for date math (`TZ`).
    pub time_zone: Option<String>,
    /// Whether Solr may cache this query's results (`cache`).
    pub cache: Option<bool>,
    /// Anything else, written verbatim after the modeled keys.
    pub extra: Vec<(String, String)>,
}

impl QueryParams {
    /// A query record with `q` set.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Adds a filter query.
    pub fn with_filter(mut self, fq: impl Into<String>) -> Self {
        self.filters.push(fq.into());
        self
    }

    /// Adds returned fields.
    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds a sort clause.
    pub fn with_sort(mut self, clause: SortClause) -> Self {
        self.sort.push(clause);
        self
    }

    /// Sets `start`.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets `rows`.
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets `df`.
    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    /// Sets `q.op`.
    pub fn with_operator(mut self, op: QueryOperator) -> Self {
        self.operator = Some(op);
        self
    }

    /// Sets `defType`.
    pub fn with_def_type(mut self, parser: impl Into<String>) -> Self {
        self.def_type = Some(parser.into());
        self
    }

    /// Sets `wt`.
    pub fn with_wt(mut self, wt: impl Into<String>) -> Self {
        self.wt = Some(wt.into());
        self
    }

    /// Sets `cursorMark`.
    pub fn with_cursor_mark(mut self, mark: impl Into<String>) -> Self {
        self.cursor_mark = Some(mark.into());
        self
    }

    /// Sets `timeAllowed`.
    pub fn with_time_allowed(mut self, millis: u64) -> Self {
        self.time_allowed = Some(millis);
        self
    }

    /// Sets `debugQuery`.
    pub fn with_debug_query(mut self, debug: bool) -> Self {
        self.debug_query = Some(debug);
        self
    }

    /// Sets `echoParams`.
    pub fn with_echo_params(mut self, echo: EchoParams) -> Self {
        self.echo_params = Some(echo);
        self
    }

    /// Sets `omitHeader`.
    pub fn with_omit_header(mut self, omit: bool) -> Self {
        self.omit_header = Some(omit);
        self
    }

    /// Sets `TZ`, e.g. `America/Los_Angeles`.
    pub fn with_time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }

    /// Sets `cache`.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Appends an unmodeled pair.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

impl Params for QueryParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push_opt("q", self.q.as_deref())
            .push_each("fq", &self.filters)
            .push_joined("fl", &self.fields, ",");
        let sort: Vec<String> = self.sort.iter().map(ToString::to_string).collect();
        out.push_joined("sort", &sort, ",")
            .push_opt("start", self.start)
            .push_opt("rows", self.rows)
            .push_opt("df", self.default_field.as_deref())
            .push_opt("q.op", self.operator)
            .push_opt("defType", self.def_type.as_deref())
            .push_opt("wt", self.wt.as_deref())
            .push_opt("cursorMark", self.cursor_mark.as_deref())
            .push_opt("timeAllowed", self.time_allowed)
            .push_opt("debugQuery", self.debug_query)
            .push_opt("echoParams", self.echo_params)
            .push_opt("omitHeader", self.omit_header)
            .push_opt("TZ", self.time_zone.as_deref())
            .push_opt("cache", self.cache);
        for (key, value) in &self.extra {
            out.push_repeated(key.clone(), value);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cursor_mark.is_some() {
            if self.start.is_some_and(|s| s > 0) {
                return Err(ParamsError::invalid(
                    "cursorMark",
                    "cannot be combined with a non-zero start",
                ));
            }
            if self.sort.is_empty() {
                return Err(ParamsError::invalid(
                    "cursorMark",
                    "requires a sort including the unique key",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_order() {
        let params = QueryParams::new("*:*")
            .with_filter("type:book")
            .with_filter("in_stock:true")
            .with_fields(["id", "title"])
            .with_sort(SortClause::desc("score"))
            .with_sort(SortClause::asc("id"))
            .with_start(10)
            .with_rows(20)
            .with_operator(QueryOperator::And)
            .with_wt("json");
        assert_eq!(
            params.flatten().to_string(),
            "q=*%3A*&fq=type%3Abook&fq=in_stock%3Atrue&fl=id%2Ctitle\
             &sort=score+desc%2Cid+asc&start=10&rows=20&q.op=AND&wt=json"
        );
    }

    #[test]
    fn empty_record_emits_nothing() {
        assert!(QueryParams::default().flatten().is_empty());
    }

    #[test]
    fn extra_pairs_come_last() {
        let params = QueryParams::new("a")
            .with_extra("group", "true")
            .with_rows(1);
        let flat = params.flatten();
        let keys: Vec<_> = flat.pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["q", "rows", "group"]);
    }

    #[test]
    fn debug_and_echo() {
        let params = QueryParams::default()
            .with_debug_query(true)
            .with_echo_params(EchoParams::All);
        assert_eq!(params.flatten().to_string(), "debugQuery=true&echoParams=all");
    }

    #[test]
    fn header_time_zone_and_cache() {
        let params = QueryParams::new("*:*")
            .with_cache(false)
            .with_time_zone("Europe/Paris")
            .with_omit_header(true);
        assert_eq!(
            params.flatten().to_string(),
            "q=*%3A*&omitHeader=true&TZ=Europe%2FParis&cache=false"
        );
    }

    #[test]
    fn cursor_mark_rejects_offset() {
        let params = QueryParams::new("*:*")
            .with_sort(SortClause::asc("id"))
            .with_cursor_mark("*")
            .with_start(5);
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("cursorMark"));
    }

    #[test]
    fn cursor_mark_requires_sort() {
        let params = QueryParams::new("*:*").with_cursor_mark("*");
        assert!(params.validate().is_err());
    }

    #[test]
    fn cursor_mark_with_sort_is_valid() {
        let params = QueryParams::new("*:*")
            .with_sort(SortClause::asc("id"))
            .with_cursor_mark("*")
            .with_start(0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn deserializes_from_partial_json() {
        let params: QueryParams =
            serde_json::from_str(r#"{"q":"rust","rows":5}"#).expect("deserialize");
        assert_eq!(params.q.as_deref(), Some("rust"));
        assert_eq!(params.rows, Some(5));
        assert!(params.filters.is_empty());
    }
}
