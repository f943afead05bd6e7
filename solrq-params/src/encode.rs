//! Flattening parameter records into Solr's query-string dialect.
//!
//! [`QueryString`] is an ordered list of key/value pairs. Every pair is
//! tagged [`Multiplicity::Single`] or [`Multiplicity::Repeated`]:
//!
//! - a `Single` key that is pushed again keeps its first position and takes
//!   the last value, so two records that both switch on `facet=true` produce
//!   one `facet=true`;
//! - a `Pinned` key behaves like `Single` but later `Single` pushes leave it
//!   alone, so a DisMax record's `defType` survives a query record's
//!   `defType` whatever order the records are encoded in;
//! - a `Repeated` key (`fq`, `facet.field`, `bq`, ...) is always appended.
//!
//! Per-field overrides are written as `f.<field>.<key>`.

use std::fmt;

use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Whether a key may legally occur more than once in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// At most one value; a later push replaces the earlier value in place.
    Single,
    /// Single-valued, and only another `Pinned` push may replace the value.
    Pinned,
    /// Any number of values, kept in push order.
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
    multiplicity: Multiplicity,
}

/// An ordered, multiplicity-aware list of request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    entries: Vec<Entry>,
}

impl QueryString {
    /// Creates an empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs, counting every repeated value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no pair has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a single-valued key.
    ///
    /// If the key is already present as single-valued its value is replaced
    /// where it stands; otherwise the pair is appended.
    pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.insert(key.into(), value.to_string(), Multiplicity::Single);
        self
    }

    /// Pushes a single-valued key that later [`push`](Self::push) calls
    /// cannot override.
    pub fn push_pinned(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.insert(key.into(), value.to_string(), Multiplicity::Pinned);
        self
    }

    /// Appends a value for a key that may occur many times.
    pub fn push_repeated(
        &mut self,
        key: impl Into<String>,
        value: impl fmt::Display,
    ) -> &mut Self {
        self.insert(key.into(), value.to_string(), Multiplicity::Repeated);
        self
    }

    /// Pushes a single-valued key when `value` is `Some`.
    pub fn push_opt<V: fmt::Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Appends one `key=item` pair per item.
    pub fn push_each<S: AsRef<str>>(&mut self, key: &str, items: &[S]) -> &mut Self {
        for item in items {
            self.push_repeated(key, item.as_ref());
        }
        self
    }

    /// Pushes `items` joined by `sep` as one single-valued key. Empty lists
    /// emit nothing.
    pub fn push_joined<S: AsRef<str>>(&mut self, key: &str, items: &[S], sep: &str) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let joined = items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(sep);
        self.push(key, joined)
    }

    /// Pushes a per-field override `f.<field>.<key>`.
    pub fn push_field(&mut self, field: &str, key: &str, value: impl fmt::Display) -> &mut Self {
        self.push(field_key(field, key), value)
    }

    /// Pushes a per-field override when `value` is `Some`.
    pub fn push_field_opt<V: fmt::Display>(
        &mut self,
        field: &str,
        key: &str,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.push_field(field, key, value);
        }
        self
    }

    /// Appends one `f.<field>.<key>=item` pair per item.
    pub fn push_field_each<S: AsRef<str>>(
        &mut self,
        field: &str,
        key: &str,
        items: &[S],
    ) -> &mut Self {
        let key = field_key(field, key);
        for item in items {
            self.push_repeated(key.clone(), item.as_ref());
        }
        self
    }

    /// Flattens a parameter record into this query string.
    pub fn extend_from<P: Params + ?Sized>(&mut self, record: &P) -> &mut Self {
        record.write_params(self);
        self
    }

    /// Merges every pair of `other` into `self`, in order, with the same
    /// replace-or-append rules as [`push`](Self::push).
    pub fn merge(&mut self, other: &QueryString) -> &mut Self {
        for entry in &other.entries {
            self.insert(entry.key.clone(), entry.value.clone(), entry.multiplicity);
        }
        self
    }

    /// Returns the first value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Returns every value stored for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.key == key)
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Returns `true` if any value is stored for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Iterates over the flattened pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Renders `k=v&k=v` with form-urlencoded escaping.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// Parses a query string (with or without a leading `?`) into repeated
    /// pairs, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Decode`] if a pair has an empty key.
    pub fn decode(raw: &str) -> Result<Self> {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut out = Self::new();
        for (index, (key, value)) in url::form_urlencoded::parse(raw.as_bytes()).enumerate() {
            if key.is_empty() {
                return Err(ParamsError::Decode(format!("empty key in pair {}", index + 1)));
            }
            out.push_repeated(key.into_owned(), value);
        }
        Ok(out)
    }

    fn insert(&mut self, key: String, value: String, multiplicity: Multiplicity) {
        if multiplicity != Multiplicity::Repeated {
            if let Some(existing) = self
                .entries
                .iter_mut()
                .find(|e| e.key == key && e.multiplicity != Multiplicity::Repeated)
            {
                if existing.multiplicity == Multiplicity::Pinned
                    && multiplicity == Multiplicity::Single
                {
                    tracing::trace!(key = %key, "pinned parameter kept");
                    return;
                }
                tracing::trace!(key = %key, "single-valued parameter overridden");
                existing.value = value;
                existing.multiplicity = multiplicity;
                return;
            }
        }
        self.entries.push(Entry {
            key,
            value,
            multiplicity,
        });
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Params for QueryString {
    fn write_params(&self, out: &mut QueryString) {
        out.merge(self);
    }
}

/// Builds the per-field override key `f.<field>.<key>`.
pub fn field_key(field: &str, key: &str) -> String {
    format!("f.{field}.{key}")
}

/// Flattens `records` in slice order into one [`QueryString`].
pub fn encode_pairs(records: &[&dyn Params]) -> QueryString {
    let mut out = QueryString::new();
    for record in records {
        record.write_params(&mut out);
    }
    tracing::trace!(pairs = out.len(), "parameter records flattened");
    out
}

/// Flattens `records` in slice order and renders the query string.
///
/// # Examples
///
/// ```
/// use solrq_params::{encode, FacetParams, QueryParams};
///
/// let query = QueryParams::new("title:rust").with_rows(5);
/// let facets = FacetParams::new().with_field("author");
/// assert_eq!(
///     encode(&[&query, &facets]),
///     "q=title%3Arust&rows=5&facet=true&facet.field=author"
/// );
/// ```
pub fn encode(records: &[&dyn Params]) -> String {
    encode_pairs(records).to_query_string()
}

/// Validates every record, then flattens them like [`encode_pairs`].
///
/// # Errors
///
/// Returns the first [`ParamsError`] reported by a record's
/// [`Params::validate`].
pub fn encode_validated(records: &[&dyn Params]) -> Result<QueryString> {
    for record in records {
        record.validate()?;
    }
    Ok(encode_pairs(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_is_replaced_in_place() {
        let mut qs = QueryString::new();
        qs.push("q", "a").push("rows", 10).push("q", "b");
        assert_eq!(qs.to_query_string(), "q=b&rows=10");
    }

    #[test]
    fn pinned_key_survives_later_single_push() {
        let mut qs = QueryString::new();
        qs.push_pinned("defType", "edismax").push("q", "x").push("defType", "lucene");
        assert_eq!(qs.to_query_string(), "defType=edismax&q=x");

        qs.push_pinned("defType", "dismax");
        assert_eq!(qs.get("defType"), Some("dismax"));
    }

    #[test]
    fn pinned_push_replaces_earlier_single_in_place() {
        let mut qs = QueryString::new();
        qs.push("defType", "lucene").push("q", "x").push_pinned("defType", "edismax");
        assert_eq!(qs.to_query_string(), "defType=edismax&q=x");
    }

    #[test]
    fn repeated_key_is_appended() {
        let mut qs = QueryString::new();
        qs.push_repeated("fq", "a:1").push("rows", 1).push_repeated("fq", "b:2");
        assert_eq!(qs.get_all("fq"), vec!["a:1", "b:2"]);
        assert_eq!(qs.to_query_string(), "fq=a%3A1&rows=1&fq=b%3A2");
    }

    #[test]
    fn single_after_repeated_appends() {
        let mut qs = QueryString::new();
        qs.push_repeated("wt", "xml").push("wt", "json");
        assert_eq!(qs.len(), 2);
    }

    #[test]
    fn push_opt_skips_none() {
        let mut qs = QueryString::new();
        qs.push_opt::<u32>("rows", None).push_opt("start", Some(20));
        assert_eq!(qs.to_query_string(), "start=20");
    }

    #[test]
    fn push_joined_skips_empty_list() {
        let empty: [&str; 0] = [];
        let mut qs = QueryString::new();
        qs.push_joined("fl", &empty, ",");
        assert!(qs.is_empty());
        qs.push_joined("fl", &["id", "title"], ",");
        assert_eq!(qs.get("fl"), Some("id,title"));
    }

    #[test]
    fn field_override_is_prefixed() {
        let mut qs = QueryString::new();
        qs.push_field("cat", "facet.limit", 5);
        assert_eq!(qs.to_query_string(), "f.cat.facet.limit=5");
    }

    #[test]
    fn field_override_repeated() {
        let mut qs = QueryString::new();
        qs.push_field_each("price", "facet.interval.set", &["[0,10)", "[10,*]"]);
        assert_eq!(
            qs.get_all("f.price.facet.interval.set"),
            vec!["[0,10)", "[10,*]"]
        );
    }

    #[test]
    fn spaces_and_unicode_are_escaped() {
        let mut qs = QueryString::new();
        qs.push("q", "café au lait");
        assert_eq!(qs.to_query_string(), "q=caf%C3%A9+au+lait");
    }

    #[test]
    fn empty_value_is_still_emitted() {
        let mut qs = QueryString::new();
        qs.push_repeated("fq", "");
        assert_eq!(qs.to_query_string(), "fq=");
    }

    #[test]
    fn merge_applies_replace_rules() {
        let mut left = QueryString::new();
        left.push("facet", true).push_repeated("facet.field", "a");
        let mut right = QueryString::new();
        right.push("facet", true).push_repeated("facet.field", "b");
        left.merge(&right);
        assert_eq!(
            left.to_query_string(),
            "facet=true&facet.field=a&facet.field=b"
        );
    }

    #[test]
    fn decode_preserves_order_and_repeats() {
        let qs = QueryString::decode("?q=a+b&fq=x&fq=y").expect("decode");
        let pairs: Vec<_> = qs.pairs().collect();
        assert_eq!(pairs, vec![("q", "a b"), ("fq", "x"), ("fq", "y")]);
    }

    #[test]
    fn decode_rejects_empty_key() {
        let err = QueryString::decode("q=a&=b").unwrap_err();
        assert!(err.to_string().contains("pair 2"));
    }

    #[test]
    fn encode_of_nothing_is_empty() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn display_matches_query_string() {
        let mut qs = QueryString::new();
        qs.push("rows", 0);
        assert_eq!(qs.to_string(), "rows=0");
    }
}
