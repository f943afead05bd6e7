//! Highlighting parameters (`hl.*`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Highlighter implementation (`hl.method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMethod {
    /// The default since Solr 9.
    Unified,
    /// The classic standard highlighter.
    Original,
    /// Needs term vectors with positions and offsets.
    #[serde(rename = "fastVector")]
    FastVector,
}

impl fmt::Display for HighlightMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unified => "unified",
            Self::Original => "original",
            Self::FastVector => "fastVector",
        })
    }
}

/// Snippet encoder (`hl.encoder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightEncoder {
    /// Leave snippet text as stored.
    Default,
    /// HTML-escape snippet text outside the highlight tags.
    Html,
}

impl fmt::Display for HighlightEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "",
            Self::Html => "html",
        })
    }
}

/// Per-field highlight overrides, written as `f.<field>.hl.<key>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldHighlightOverride {
    /// Field the overrides apply to.
    pub field: String,
    /// `f.<field>.hl.snippets`.
    pub snippets: Option<u32>,
    /// `f.<field>.hl.fragsize`.
    pub fragsize: Option<u32>,
    /// `f.<field>.hl.alternateField`.
    pub alternate_field: Option<String>,
    /// `f.<field>.hl.fragmenter`.
    pub fragmenter: Option<String>,
    /// `f.<field>.hl.mergeContiguous`.
    pub merge_contiguous: Option<bool>,
}

impl FieldHighlightOverride {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn with_snippets(mut self, snippets: u32) -> Self {
        self.snippets = Some(snippets);
        self
    }

    pub fn with_fragsize(mut self, fragsize: u32) -> Self {
        self.fragsize = Some(fragsize);
        self
    }

    pub fn with_alternate_field(mut self, field: impl Into<String>) -> Self {
        self.alternate_field = Some(field.into());
        self
    }

    pub fn with_fragmenter(mut self, fragmenter: impl Into<String>) -> Self {
        self.fragmenter = Some(fragmenter.into());
        self
    }

    pub fn with_merge_contiguous(mut self, merge: bool) -> Self {
        self.merge_contiguous = Some(merge);
        self
    }
}

/// Highlighting parameters. Always writes `hl=true`; per-field overrides
/// follow the global keys.
///
/// `hl.tag.pre` and `hl.tag.post` must be set together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightParams {
    /// Highlighter implementation (`hl.method`).
    pub method: Option<HighlightMethod>,
    /// Fields to highlight (`hl.fl`), comma-joined. Empty means the
    /// handler default.
    pub fields: Vec<String>,
    /// Query used for highlighting instead of `q` (`hl.q`).
    pub query: Option<String>,
    /// Parser for `hl.q` (`hl.qparser`).
    pub query_parser: Option<String>,
    /// Only highlight fields the query matched in (`hl.requireFieldMatch`).
    pub require_field_match: Option<bool>,
    /// Highlight phrases as phrases (`hl.usePhraseHighlighter`).
    pub use_phrase_highlighter: Option<bool>,
    /// Highlight wildcard and range terms (`hl.highlightMultiTerm`).
    pub highlight_multi_term: Option<bool>,
    /// Snippets per field (`hl.snippets`).
    pub snippets: Option<u32>,
    /// Approximate snippet length in characters (`hl.fragsize`).
    pub fragsize: Option<u32>,
    /// Markup before a highlighted term (`hl.tag.pre`).
    pub tag_pre: Option<String>,
    /// Markup after a highlighted term (`hl.tag.post`).
    pub tag_post: Option<String>,
    /// Snippet encoder (`hl.encoder`).
    pub encoder: Option<HighlightEncoder>,
    /// Characters analyzed per field (`hl.maxAnalyzedChars`).
    pub max_analyzed_chars: Option<u64>,
    /// Fragmenter name, `gap` or `regex` (`hl.fragmenter`).
    pub fragmenter: Option<String>,
    /// Join adjacent fragments (`hl.mergeContiguous`).
    pub merge_contiguous: Option<bool>,
    /// Field shown when nothing is highlighted (`hl.alternateField`).
    pub alternate_field: Option<String>,
    /// Length cap for the alternate field (`hl.maxAlternateFieldLength`).
    pub max_alternate_field_length: Option<u32>,
    /// Keep multi-valued order (`hl.preserveMulti`).
    pub preserve_multi: Option<bool>,
    /// Per-field overrides.
    pub overrides: Vec<FieldHighlightOverride>,
}

impl HighlightParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to `hl.fl`.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn with_method(mut self, method: HighlightMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_snippets(mut self, snippets: u32) -> Self {
        self.snippets = Some(snippets);
        self
    }

    pub fn with_fragsize(mut self, fragsize: u32) -> Self {
        self.fragsize = Some(fragsize);
        self
    }

    /// Sets the markup wrapped around each highlighted term.
    pub fn with_tags(mut self, pre: impl Into<String>, post: impl Into<String>) -> Self {
        self.tag_pre = Some(pre.into());
        self.tag_post = Some(post.into());
        self
    }

    pub fn with_encoder(mut self, encoder: HighlightEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_require_field_match(mut self, require: bool) -> Self {
        self.require_field_match = Some(require);
        self
    }

    /// Highlights against `query` instead of `q`.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_query_parser(mut self, parser: impl Into<String>) -> Self {
        self.query_parser = Some(parser.into());
        self
    }

    pub fn with_use_phrase_highlighter(mut self, phrase: bool) -> Self {
        self.use_phrase_highlighter = Some(phrase);
        self
    }

    pub fn with_highlight_multi_term(mut self, multi_term: bool) -> Self {
        self.highlight_multi_term = Some(multi_term);
        self
    }

    pub fn with_max_analyzed_chars(mut self, chars: u64) -> Self {
        self.max_analyzed_chars = Some(chars);
        self
    }

    pub fn with_fragmenter(mut self, fragmenter: impl Into<String>) -> Self {
        self.fragmenter = Some(fragmenter.into());
        self
    }

    pub fn with_merge_contiguous(mut self, merge: bool) -> Self {
        self.merge_contiguous = Some(merge);
        self
    }

    /// Sets `hl.alternateField` and, when given, its length cap.
    pub fn with_alternate_field(
        mut self,
        field: impl Into<String>,
        max_length: Option<u32>,
    ) -> Self {
        self.alternate_field = Some(field.into());
        self.max_alternate_field_length = max_length;
        self
    }

    pub fn with_preserve_multi(mut self, preserve: bool) -> Self {
        self.preserve_multi = Some(preserve);
        self
    }

    pub fn with_override(mut self, field_override: FieldHighlightOverride) -> Self {
        self.overrides.push(field_override);
        self
    }
}

impl Params for HighlightParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("hl", true)
            .push_opt("hl.method", self.method)
            .push_joined("hl.fl", &self.fields, ",")
            .push_opt("hl.q", self.query.as_deref())
            .push_opt("hl.qparser", self.query_parser.as_deref())
            .push_opt("hl.requireFieldMatch", self.require_field_match)
            .push_opt("hl.usePhraseHighlighter", self.use_phrase_highlighter)
            .push_opt("hl.highlightMultiTerm", self.highlight_multi_term)
            .push_opt("hl.snippets", self.snippets)
            .push_opt("hl.fragsize", self.fragsize)
            .push_opt("hl.tag.pre", self.tag_pre.as_deref())
            .push_opt("hl.tag.post", self.tag_post.as_deref())
            .push_opt("hl.encoder", self.encoder)
            .push_opt("hl.maxAnalyzedChars", self.max_analyzed_chars)
            .push_opt("hl.fragmenter", self.fragmenter.as_deref())
            .push_opt("hl.mergeContiguous", self.merge_contiguous)
            .push_opt("hl.alternateField", self.alternate_field.as_deref())
            .push_opt("hl.maxAlternateFieldLength", self.max_alternate_field_length)
            .push_opt("hl.preserveMulti", self.preserve_multi);
        for o in &self.overrides {
            let f = o.field.as_str();
            out.push_field_opt(f, "hl.snippets", o.snippets)
                .push_field_opt(f, "hl.fragsize", o.fragsize)
                .push_field_opt(f, "hl.alternateField", o.alternate_field.as_deref())
                .push_field_opt(f, "hl.fragmenter", o.fragmenter.as_deref())
                .push_field_opt(f, "hl.mergeContiguous", o.merge_contiguous);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tag_pre.is_some() != self.tag_post.is_some() {
            return Err(ParamsError::invalid(
                "hl.tag.pre",
                "hl.tag.pre and hl.tag.post must be set together",
            ));
        }
        if self.overrides.iter().any(|o| o.field.is_empty()) {
            return Err(ParamsError::invalid("hl", "override has an empty field name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_record_switches_highlighting_on() {
        assert_eq!(HighlightParams::new().flatten().to_string(), "hl=true");
    }

    #[test]
    fn fields_tags_and_overrides() {
        let hl = HighlightParams::new()
            .with_method(HighlightMethod::Unified)
            .with_field("title")
            .with_field("body")
            .with_snippets(3)
            .with_tags("<em>", "</em>")
            .with_override(
                FieldHighlightOverride::new("body")
                    .with_snippets(1)
                    .with_alternate_field("summary"),
            );
        assert_eq!(
            hl.flatten().to_string(),
            "hl=true&hl.method=unified&hl.fl=title%2Cbody&hl.snippets=3\
             &hl.tag.pre=%3Cem%3E&hl.tag.post=%3C%2Fem%3E\
             &f.body.hl.snippets=1&f.body.hl.alternateField=summary"
        );
    }

    #[test]
    fn fast_vector_wire_name() {
        let hl = HighlightParams::new().with_method(HighlightMethod::FastVector);
        assert_eq!(hl.flatten().get("hl.method"), Some("fastVector"));
    }

    #[test]
    fn html_encoder() {
        let hl = HighlightParams::new().with_encoder(HighlightEncoder::Html);
        assert_eq!(hl.flatten().get("hl.encoder"), Some("html"));
    }

    #[test]
    fn unpaired_tag_rejected() {
        let hl = HighlightParams {
            tag_pre: Some("<b>".into()),
            ..Default::default()
        };
        assert!(hl.validate().is_err());
    }

    #[test]
    fn highlight_params_deserialize_method() {
        let hl: HighlightParams =
            serde_json::from_str(r#"{"method":"original","fields":["title"]}"#)
                .expect("deserialize");
        assert_eq!(hl.method, Some(HighlightMethod::Original));
        assert_eq!(hl.fields, vec!["title".to_string()]);
    }
}
