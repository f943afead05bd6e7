//! # solrq-params
//!
//! Structured request parameters for Apache Solr and their encoding into
//! Solr's query-string dialect.
//!
//! This crate does no I/O. The `solrq` crate sends what it produces.
//!
//! ## Design
//!
//! - One record per feature area: [`QueryParams`], [`FacetParams`],
//!   [`FacetRangeParams`], [`FacetIntervalParams`], [`DisMaxParams`],
//!   [`HighlightParams`], [`MoreLikeThisParams`], [`SpellcheckParams`],
//!   [`SuggesterParams`], [`UpdateParams`], plus [`RawParams`] for anything
//!   unmodeled
//! - Every record implements [`Params`] and writes its keys in a fixed order
//! - [`encode`] merges records into one [`QueryString`]: single-valued keys
//!   keep their first position and take the last value, repeatable keys
//!   (`fq`, `facet.field`, `bq`, ...) accumulate
//! - Per-field overrides are written as `f.<field>.<key>`
//! - Update bodies are built with [`UpdatePayload`]
//!
//! ## Example
//!
//! ```
//! use solrq_params::{encode, BoostedField, DisMaxParams, HighlightParams, QueryParams};
//!
//! let query = QueryParams::new("ipod").with_rows(10).with_filter("inStock:true");
//! let dismax = DisMaxParams::edismax().with_qf(BoostedField::boosted("name", 2.0));
//! let hl = HighlightParams::new().with_field("name");
//!
//! let qs = encode(&[&query, &dismax, &hl]);
//! assert_eq!(
//!     qs,
//!     "q=ipod&fq=inStock%3Atrue&rows=10&defType=edismax&qf=name%5E2&hl=true&hl.fl=name"
//! );
//! ```

pub mod dismax;
pub mod encode;
pub mod error;
pub mod facet;
pub mod highlight;
pub mod mlt;
pub mod params;
pub mod query;
pub mod spellcheck;
pub mod suggest;
pub mod types;
pub mod update;

pub use dismax::{DisMaxParams, DisMaxVariant};
pub use encode::{encode, encode_pairs, encode_validated, field_key, Multiplicity, QueryString};
pub use error::{ParamsError, Result};
pub use facet::{
    FacetIntervalParams, FacetMethod, FacetParams, FacetRangeParams, FacetSort,
    FieldFacetOverride, IntervalFacet, IntervalSet, RangeFacet, RangeInclude, RangeMethod,
    RangeOther,
};
pub use highlight::{FieldHighlightOverride, HighlightEncoder, HighlightMethod, HighlightParams};
pub use mlt::{InterestingTerms, MltMode, MoreLikeThisParams};
pub use params::{Params, RawParams};
pub use query::{EchoParams, QueryParams};
pub use spellcheck::SpellcheckParams;
pub use suggest::SuggesterParams;
pub use types::{BoostedField, QueryOperator, SortClause, SortOrder};
pub use update::{AddOptions, UpdateCommand, UpdateParams, UpdatePayload};
