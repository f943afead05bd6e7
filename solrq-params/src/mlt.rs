//! More-like-this parameters (`mlt.*`).
//!
//! The same keys drive both the MoreLikeThis search component (switched on
//! with `mlt=true` inside a `select` request) and the dedicated `/mlt`
//! handler, which takes no switch but understands the `mlt.match.*` and
//! `mlt.interestingTerms` keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;
use crate::types::{boosted_strings, BoostedField};

/// Where the more-like-this request is served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MltMode {
    /// Search component inside another handler; writes `mlt=true`.
    #[default]
    Component,
    /// The dedicated `/mlt` request handler.
    Handler,
}

/// How interesting terms are reported by the `/mlt` handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestingTerms {
    /// Terms only.
    List,
    /// Terms with their boosts.
    Details,
    /// Do not report terms.
    None,
}

impl fmt::Display for InterestingTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Details => "details",
            Self::None => "none",
        })
    }
}

/// More-like-this parameters for either the component or the `/mlt`
/// handler.
///
/// `mlt.fl` must name at least one field; [`Params::validate`] rejects an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoreLikeThisParams {
    /// Component or handler; decides whether `mlt=true` is written.
    pub mode: MltMode,
    /// Similarity fields (`mlt.fl`), comma-joined. Required.
    pub fields: Vec<String>,
    /// Ignore terms rarer than this in the source document (`mlt.mintf`).
    pub min_term_freq: Option<u32>,
    /// Ignore terms in fewer documents than this (`mlt.mindf`).
    pub min_doc_freq: Option<u32>,
    /// Ignore terms in more documents than this (`mlt.maxdf`).
    pub max_doc_freq: Option<u32>,
    /// Shortest word considered (`mlt.minwl`).
    pub min_word_len: Option<u32>,
    /// Longest word considered (`mlt.maxwl`).
    pub max_word_len: Option<u32>,
    /// Most query terms generated (`mlt.maxqt`).
    pub max_query_terms: Option<u32>,
    /// Most tokens parsed per field without stored term vectors (`mlt.maxntp`).
    pub max_num_tokens_parsed: Option<u32>,
    /// Boost interesting terms by relevance (`mlt.boost`).
    pub boost: Option<bool>,
    /// Query fields with boosts (`mlt.qf`), space-joined.
    pub query_fields: Vec<BoostedField>,
    /// Similar documents per result (`mlt.count`), component mode.
    pub count: Option<u32>,
    /// Handler mode: include the matched document (`mlt.match.include`).
    pub match_include: Option<bool>,
    /// Handler mode: which result of `q` to use as source (`mlt.match.offset`).
    pub match_offset: Option<u32>,
    /// Handler mode: report interesting terms (`mlt.interestingTerms`).
    pub interesting_terms: Option<InterestingTerms>,
}

impl MoreLikeThisParams {
    /// A component-mode record over `fields`.
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// A record for the `/mlt` handler over `fields`.
    pub fn handler<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            mode: MltMode::Handler,
            ..Self::new(fields)
        }
    }

    pub fn with_min_term_freq(mut self, n: u32) -> Self {
        self.min_term_freq = Some(n);
        self
    }

    pub fn with_min_doc_freq(mut self, n: u32) -> Self {
        self.min_doc_freq = Some(n);
        self
    }

    pub fn with_max_doc_freq(mut self, n: u32) -> Self {
        self.max_doc_freq = Some(n);
        self
    }

    /// Sets `mlt.minwl` and `mlt.maxwl`.
    pub fn with_word_len(mut self, min: u32, max: u32) -> Self {
        self.min_word_len = Some(min);
        self.max_word_len = Some(max);
        self
    }

    pub fn with_max_query_terms(mut self, n: u32) -> Self {
        self.max_query_terms = Some(n);
        self
    }

    pub fn with_max_num_tokens_parsed(mut self, n: u32) -> Self {
        self.max_num_tokens_parsed = Some(n);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_boost(mut self, boost: bool) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_query_field(mut self, field: BoostedField) -> Self {
        self.query_fields.push(field);
        self
    }

    pub fn with_interesting_terms(mut self, terms: InterestingTerms) -> Self {
        self.interesting_terms = Some(terms);
        self
    }

    pub fn with_match_include(mut self, include: bool) -> Self {
        self.match_include = Some(include);
        self
    }

    pub fn with_match_offset(mut self, offset: u32) -> Self {
        self.match_offset = Some(offset);
        self
    }
}

impl Params for MoreLikeThisParams {
    fn write_params(&self, out: &mut QueryString) {
        if self.mode == MltMode::Component {
            out.push("mlt", true);
        }
        out.push_joined("mlt.fl", &self.fields, ",")
            .push_opt("mlt.mintf", self.min_term_freq)
            .push_opt("mlt.mindf", self.min_doc_freq)
            .push_opt("mlt.maxdf", self.max_doc_freq)
            .push_opt("mlt.minwl", self.min_word_len)
            .push_opt("mlt.maxwl", self.max_word_len)
            .push_opt("mlt.maxqt", self.max_query_terms)
            .push_opt("mlt.maxntp", self.max_num_tokens_parsed)
            .push_opt("mlt.boost", self.boost)
            .push_joined("mlt.qf", &boosted_strings(&self.query_fields), " ")
            .push_opt("mlt.count", self.count)
            .push_opt("mlt.match.include", self.match_include)
            .push_opt("mlt.match.offset", self.match_offset)
            .push_opt("mlt.interestingTerms", self.interesting_terms);
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ParamsError::invalid("mlt.fl", "at least one field is required"));
        }
        Ok(())
    }
}
