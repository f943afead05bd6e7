//! Spellcheck component parameters (`spellcheck.*`).

use serde::{Deserialize, Serialize};

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Spellcheck component parameters. Always writes `spellcheck=true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellcheckParams {
    /// Text to check instead of `q` (`spellcheck.q`).
    pub query: Option<String>,
    /// Dictionaries to consult (`spellcheck.dictionary`), one pair each.
    pub dictionaries: Vec<String>,
    /// Suggestions per misspelled term (`spellcheck.count`).
    pub count: Option<u32>,
    /// Only suggest terms more frequent than the original
    /// (`spellcheck.onlyMorePopular`).
    pub only_more_popular: Option<bool>,
    /// Report frequencies with suggestions (`spellcheck.extendedResults`).
    pub extended_results: Option<bool>,
    /// Build collated whole-query corrections (`spellcheck.collate`).
    pub collate: Option<bool>,
    /// Collations to return (`spellcheck.maxCollations`).
    pub max_collations: Option<u32>,
    /// Collations to test against the index (`spellcheck.maxCollationTries`).
    pub max_collation_tries: Option<u32>,
    /// Word combinations to rank before testing
    /// (`spellcheck.maxCollationEvaluations`).
    pub max_collation_evaluations: Option<u32>,
    /// Report hits and corrections per collation
    /// (`spellcheck.collateExtendedResults`).
    pub collate_extended_results: Option<bool>,
    /// Minimum suggestion accuracy, between 0.0 and 1.0.
    pub accuracy: Option<f32>,
    /// Suggestions for terms that do exist in the index
    /// (`spellcheck.alternativeTermCount`).
    pub alternative_term_count: Option<u32>,
    /// Only suggest when the query returns at most this many hits
    /// (`spellcheck.maxResultsForSuggest`).
    pub max_results_for_suggest: Option<u32>,
    /// Rebuild the dictionary before answering.
    pub build: Option<bool>,
    /// Reload the spellchecker.
    pub reload: Option<bool>,
}

impl SpellcheckParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `text` rather than the main query.
    pub fn for_query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
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

    /// Requests collations, up to `max` of them.
    pub fn with_collate(mut self, max: u32) -> Self {
        self.collate = Some(true);
        self.max_collations = Some(max);
        self
    }

    pub fn with_extended_results(mut self, extended: bool) -> Self {
        self.extended_results = Some(extended);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = Some(accuracy);
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

    pub fn with_only_more_popular(mut self, only: bool) -> Self {
        self.only_more_popular = Some(only);
        self
    }

    /// Sets `spellcheck.maxCollationTries` and
    /// `spellcheck.maxCollationEvaluations`.
    pub fn with_collation_limits(mut self, tries: u32, evaluations: u32) -> Self {
        self.max_collation_tries = Some(tries);
        self.max_collation_evaluations = Some(evaluations);
        self
    }

    pub fn with_collate_extended_results(mut self, extended: bool) -> Self {
        self.collate_extended_results = Some(extended);
        self
    }

    pub fn with_alternative_term_count(mut self, count: u32) -> Self {
        self.alternative_term_count = Some(count);
        self
    }

    pub fn with_max_results_for_suggest(mut self, hits: u32) -> Self {
        self.max_results_for_suggest = Some(hits);
        self
    }
}

impl Params for SpellcheckParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("spellcheck", true)
            .push_opt("spellcheck.q", self.query.as_deref())
            .push_each("spellcheck.dictionary", &self.dictionaries)
            .push_opt("spellcheck.count", self.count)
            .push_opt("spellcheck.onlyMorePopular", self.only_more_popular)
            .push_opt("spellcheck.extendedResults", self.extended_results)
            .push_opt("spellcheck.collate", self.collate)
            .push_opt("spellcheck.maxCollations", self.max_collations)
            .push_opt("spellcheck.maxCollationTries", self.max_collation_tries)
            .push_opt(
                "spellcheck.maxCollationEvaluations",
                self.max_collation_evaluations,
            )
            .push_opt(
                "spellcheck.collateExtendedResults",
                self.collate_extended_results,
            )
            .push_opt("spellcheck.accuracy", self.accuracy)
            .push_opt("spellcheck.alternativeTermCount", self.alternative_term_count)
            .push_opt("spellcheck.maxResultsForSuggest", self.max_results_for_suggest)
            .push_opt("spellcheck.build", self.build)
            .push_opt("spellcheck.reload", self.reload);
    }

    fn validate(&self) -> Result<()> {
        if let Some(accuracy) = self.accuracy {
            if !(0.0..=1.0).contains(&accuracy) {
                return Err(ParamsError::invalid(
                    "spellcheck.accuracy",
                    "must be between 0.0 and 1.0",
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
    fn spellcheck_with_collation() {
        let spell = SpellcheckParams::for_query("delll ultrashar")
            .with_dictionary("default")
            .with_dictionary("wordbreak")
            .with_count(5)
            .with_collate(3);
        assert_eq!(
            spell.flatten().to_string(),
            "spellcheck=true&spellcheck.q=delll+ultrashar\
             &spellcheck.dictionary=default&spellcheck.dictionary=wordbreak\
             &spellcheck.count=5&spellcheck.collate=true&spellcheck.maxCollations=3"
        );
    }

    #[test]
    fn accuracy_written_as_decimal() {
        let spell = SpellcheckParams::new().with_accuracy(0.7);
        assert_eq!(spell.flatten().get("spellcheck.accuracy"), Some("0.7"));
    }

    #[test]
    fn accuracy_out_of_range_rejected() {
        assert!(SpellcheckParams::new().with_accuracy(1.2).validate().is_err());
    }

    #[test]
    fn build_flag() {
        let spell = SpellcheckParams::new().with_build(true);
        assert_eq!(spell.flatten().get("spellcheck.build"), Some("true"));
    }
}
