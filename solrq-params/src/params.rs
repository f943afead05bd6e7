//! The [`Params`] trait shared by every parameter record.

use serde::{Deserialize, Serialize};

use crate::encode::QueryString;
use crate::error::Result;

/// A structured group of request parameters that can flatten itself into a
/// [`QueryString`].
///
/// Implementors write their keys in a fixed order so that encoding is
/// deterministic. Unset fields write nothing. Records are plain data, so the
/// trait requires `Send + Sync` and `&dyn Params` can cross `.await` points.
pub trait Params: Send + Sync {
    /// Appends this record's parameters to `out`.
    fn write_params(&self, out: &mut QueryString);

    /// Checks values the engine would reject. The default accepts everything.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamsError::InvalidValue`] naming the offending key.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Flattens only this record.
    fn flatten(&self) -> QueryString {
        let mut out = QueryString::new();
        self.write_params(&mut out);
        out
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn write_params(&self, out: &mut QueryString) {
        (**self).write_params(out);
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

impl<P: Params> Params for Option<P> {
    fn write_params(&self, out: &mut QueryString) {
        if let Some(inner) = self {
            inner.write_params(out);
        }
    }

    fn validate(&self) -> Result<()> {
        self.as_ref().map_or(Ok(()), Params::validate)
    }
}

/// A plain, ordered key/value list for parameters no record models.
///
/// Every pair is written verbatim and treated as repeatable, so
/// `RawParams` never collapses duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    /// Pairs in request order.
    pub pairs: Vec<(String, String)>,
}

impl RawParams {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Parses `key=value` arguments, as typed on a command line.
    ///
    /// An argument without `=` becomes a key with an empty value.
    pub fn from_assignments<S: AsRef<str>>(args: &[S]) -> Self {
        let pairs = args
            .iter()
            .map(|arg| match arg.as_ref().split_once('=') {
                Some((k, v)) => (k.to_owned(), v.to_owned()),
                None => (arg.as_ref().to_owned(), String::new()),
            })
            .collect();
        Self { pairs }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Params for RawParams {
    fn write_params(&self, out: &mut QueryString) {
        for (key, value) in &self.pairs {
            out.push_repeated(key.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_params_keep_duplicates() {
        let raw = RawParams::new().with("fq", "a").with("fq", "b");
        assert_eq!(raw.flatten().to_string(), "fq=a&fq=b");
    }

    #[test]
    fn raw_params_from_assignments() {
        let raw = RawParams::from_assignments(&["q=*:*", "rows=0", "debug"]);
        assert_eq!(
            raw.pairs,
            vec![
                ("q".to_owned(), "*:*".to_owned()),
                ("rows".to_owned(), "0".to_owned()),
                ("debug".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn raw_params_split_on_first_equals() {
        let raw = RawParams::from_assignments(&["fq={!term f=id}a=b"]);
        assert_eq!(raw.pairs[0].1, "{!term f=id}a=b");
    }

    #[test]
    fn raw_params_collect_from_iterator() {
        let raw: RawParams = vec![("q", "x"), ("rows", "1")].into_iter().collect();
        assert_eq!(raw.pairs.len(), 2);
    }

    #[test]
    fn none_record_writes_nothing() {
        let record: Option<RawParams> = None;
        assert!(record.flatten().is_empty());
        assert!(record.validate().is_ok());
    }
}
