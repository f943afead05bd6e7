//! DisMax and Extended DisMax query-parser parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;
use crate::types::{boosted_strings, BoostedField};

/// Which DisMax parser to select with `defType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisMaxVariant {
    /// The original DisMax parser.
    #[default]
    DisMax,
    /// Extended DisMax: full Lucene syntax plus `pf2`/`pf3`, `boost`, `uf`.
    EDisMax,
}

impl DisMaxVariant {
    /// Returns the `defType` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisMax => "dismax",
            Self::EDisMax => "edismax",
        }
    }
}

impl fmt::Display for DisMaxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DisMax / eDisMax parameters.
///
/// Fields documented as eDisMax-only are silently skipped when `variant`
/// is [`DisMaxVariant::DisMax`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisMaxParams {
    /// Parser written as `defType`.
    pub variant: DisMaxVariant,
    /// Fallback query when `q` is absent (`q.alt`).
    pub q_alt: Option<String>,
    /// Query fields with boosts (`qf`).
    pub qf: Vec<BoostedField>,
    /// Minimum should match (`mm`), e.g. `2<-25%`.
    pub mm: Option<String>,
    /// Phrase fields (`pf`).
    pub pf: Vec<BoostedField>,
    /// Phrase slop (`ps`).
    pub ps: Option<u32>,
    /// Query slop (`qs`).
    pub qs: Option<u32>,
    /// Tie breaker (`tie`), between 0.0 and 1.0.
    pub tie: Option<f32>,
    /// Boost queries (`bq`).
    pub bq: Vec<String>,
    /// Boost functions (`bf`).
    pub bf: Vec<String>,
    /// eDisMax only: bigram phrase fields (`pf2`).
    pub pf2: Vec<BoostedField>,
    /// eDisMax only: trigram phrase fields (`pf3`).
    pub pf3: Vec<BoostedField>,
    /// eDisMax only: slop for `pf2` (`ps2`).
    pub ps2: Option<u32>,
    /// eDisMax only: slop for `pf3` (`ps3`).
    pub ps3: Option<u32>,
    /// eDisMax only: multiplicative boost functions (`boost`).
    pub boost: Vec<String>,
    /// eDisMax only: user fields allowed in the query (`uf`).
    pub uf: Option<String>,
    /// eDisMax only: honor the stop filter (`stopwords`).
    pub stopwords: Option<bool>,
    /// eDisMax only: treat `and`/`or` as operators (`lowercaseOperators`).
    pub lowercase_operators: Option<bool>,
    /// eDisMax only: split on whitespace (`sow`).
    pub sow: Option<bool>,
}

impl DisMaxParams {
    /// A DisMax record.
    pub fn dismax() -> Self {
        Self::default()
    }

    /// An eDisMax record.
    pub fn edismax() -> Self {
        Self {
            variant: DisMaxVariant::EDisMax,
            ..Default::default()
        }
    }

    /// Adds a query field.
    pub fn with_qf(mut self, field: BoostedField) -> Self {
        self.qf.push(field);
        self
    }

    /// Adds a phrase field.
    pub fn with_pf(mut self, field: BoostedField) -> Self {
        self.pf.push(field);
        self
    }

    pub fn with_mm(mut self, mm: impl Into<String>) -> Self {
        self.mm = Some(mm.into());
        self
    }

    pub fn with_tie(mut self, tie: f32) -> Self {
        self.tie = Some(tie);
        self
    }

    pub fn with_q_alt(mut self, q_alt: impl Into<String>) -> Self {
        self.q_alt = Some(q_alt.into());
        self
    }

    pub fn with_bq(mut self, bq: impl Into<String>) -> Self {
        self.bq.push(bq.into());
        self
    }

    pub fn with_bf(mut self, bf: impl Into<String>) -> Self {
        self.bf.push(bf.into());
        self
    }

    pub fn with_boost(mut self, boost: impl Into<String>) -> Self {
        self.boost.push(boost.into());
        self
    }

    pub fn with_pf2(mut self, field: BoostedField) -> Self {
        self.pf2.push(field);
        self
    }

    pub fn with_uf(mut self, uf: impl Into<String>) -> Self {
        self.uf = Some(uf.into());
        self
    }

    pub fn with_ps(mut self, slop: u32) -> Self {
        self.ps = Some(slop);
        self
    }

    pub fn with_qs(mut self, slop: u32) -> Self {
        self.qs = Some(slop);
        self
    }

    pub fn with_pf3(mut self, field: BoostedField) -> Self {
        self.pf3.push(field);
        self
    }

    pub fn with_ps2(mut self, slop: u32) -> Self {
        self.ps2 = Some(slop);
        self
    }

    pub fn with_ps3(mut self, slop: u32) -> Self {
        self.ps3 = Some(slop);
        self
    }

    pub fn with_stopwords(mut self, stopwords: bool) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn with_lowercase_operators(mut self, lowercase: bool) -> Self {
        self.lowercase_operators = Some(lowercase);
        self
    }

    /// Sets `sow`; `false` lets multi-word synonyms match.
    pub fn with_sow(mut self, split: bool) -> Self {
        self.sow = Some(split);
        self
    }
}

impl Params for DisMaxParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push_pinned("defType", self.variant)
            .push_opt("q.alt", self.q_alt.as_deref())
            .push_joined("qf", &boosted_strings(&self.qf), " ")
            .push_opt("mm", self.mm.as_deref())
            .push_joined("pf", &boosted_strings(&self.pf), " ")
            .push_opt("ps", self.ps)
            .push_opt("qs", self.qs)
            .push_opt("tie", self.tie)
            .push_each("bq", &self.bq)
            .push_each("bf", &self.bf);

        if self.variant != DisMaxVariant::EDisMax {
            return;
        }
        out.push_joined("pf2", &boosted_strings(&self.pf2), " ")
            .push_joined("pf3", &boosted_strings(&self.pf3), " ")
            .push_opt("ps2", self.ps2)
            .push_opt("ps3", self.ps3)
            .push_each("boost", &self.boost)
            .push_opt("uf", self.uf.as_deref())
            .push_opt("stopwords", self.stopwords)
            .push_opt("lowercaseOperators", self.lowercase_operators)
            .push_opt("sow", self.sow);
    }

    fn validate(&self) -> Result<()> {
        if let Some(tie) = self.tie {
            if !(0.0..=1.0).contains(&tie) {
                return Err(ParamsError::invalid("tie", "must be between 0.0 and 1.0"));
            }
        }
        Ok(())
    }
}
