//! Suggester component parameters (`suggest.*`).

use serde::{Deserialize, Serialize};

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Suggester component parameters. Always writes `suggest=true`.
///
/// `suggest.q` is required unless the request only builds or reloads
/// dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggesterParams {
    /// Suggester dictionaries (`suggest.dictionary`), one pair each.
    pub dictionaries: Vec<String>,
    /// The prefix or text to complete (`suggest.q`).
    pub query: Option<String>,
    /// Suggestions to return (`suggest.count`).
    pub count: Option<u32>,
    /// Context filter query (`suggest.cfq`).
    pub context_filter: Option<String>,
    /// Rebuild the named dictionaries (`suggest.build`).
    pub build: Option<bool>,
    /// Reload the named dictionaries (`suggest.reload`).
    pub reload: Option<bool>,
    /// Rebuild every dictionary (`suggest.buildAll`).
    pub build_all: Option<bool>,
    /// Reload every dictionary (`suggest.reloadAll`).
    pub reload_all: Option<bool>,
}

impl SuggesterParams {
    /// Suggestions for `query` from `dictionary`.
    pub fn new(dictionary: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            dictionaries: vec![dictionary.into()],
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_dictionary(mut self, dictionary: impl Into<String>) -> Self {
        self.dictionaries.push(dictionary.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_context_filter(mut self, cfq: impl Into<String>) -> Self {
        self.context_filter = Some(cfq.into());
        self
    }

    pub fn with_build(mut self, build: bool) -> Self {
        self.build = Some(build);
        self
    }

    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = Some(reload);
        self
    }

    /// A request that only rebuilds every suggester dictionary.
    pub fn build_all() -> Self {
        Self {
            build_all: Some(true),
            ..Default::default()
        }
    }

    /// A request that only reloads every suggester dictionary.
    pub fn reload_all() -> Self {
        Self {
            reload_all: Some(true),
            ..Default::default()
        }
    }
}

impl Params for SuggesterParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("suggest", true)
            .push_each("suggest.dictionary", &self.dictionaries)
            .push_opt("suggest.q", self.query.as_deref())
            .push_opt("suggest.count", self.count)
            .push_opt("suggest.cfq", self.context_filter.as_deref())
            .push_opt("suggest.build", self.build)
            .push_opt("suggest.reload", self.reload)
            .push_opt("suggest.buildAll", self.build_all)
            .push_opt("suggest.reloadAll", self.reload_all);
    }

    fn validate(&self) -> Result<()> {
        let maintenance = [self.build, self.reload, self.build_all, self.reload_all]
            .into_iter()
            .flatten()
            .any(|flag| flag);
        if self.query.is_none() && !maintenance {
            return Err(ParamsError::invalid(
                "suggest.q",
                "required unless building or reloading",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_query() {
        let suggest = SuggesterParams::new("titleSuggester", "elec")
            .with_count(5)
            .with_context_filter("memory");
        assert_eq!(
            suggest.flatten().to_string(),
            "suggest=true&suggest.dictionary=titleSuggester&suggest.q=elec\
             &suggest.count=5&suggest.cfq=memory"
        );
    }

    #[test]
    fn multiple_dictionaries_repeat() {
        let suggest = SuggesterParams::new("a", "x").with_dictionary("b");
        assert_eq!(suggest.flatten().get_all("suggest.dictionary"), vec!["a", "b"]);
    }

    #[test]
    fn missing_query_rejected() {
        assert!(SuggesterParams::default().validate().is_err());
    }

    #[test]
    fn build_all_needs_no_query() {
        let suggest = SuggesterParams::build_all();
        assert!(suggest.validate().is_ok());
        assert_eq!(suggest.flatten().to_string(), "suggest=true&suggest.buildAll=true");
    }
}
