//! Faceting records: field/query/pivot facets, range facets and interval facets.
//!
//! All three records switch faceting on with `facet=true`; when several are
//! merged into one request the switch collapses into a single pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Ordering of facet constraints (`facet.sort`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetSort {
    /// Highest count first.
    Count,
    /// Lexicographic by term.
    Index,
}

impl fmt::Display for FacetSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::Index => "index",
        })
    }
}

/// Field-facet algorithm (`facet.method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetMethod {
    /// Enumerate all terms, one filter per term.
    Enum,
    /// Field cache.
    Fc,
    /// Per-segment field cache.
    Fcs,
}

impl fmt::Display for FacetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enum => "enum",
            Self::Fc => "fc",
            Self::Fcs => "fcs",
        })
    }
}

/// Per-field override of field-facet settings, written as
/// `f.<field>.facet.<key>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldFacetOverride {
    /// The facet field the overrides apply to.
    pub field: String,
    /// `f.<field>.facet.prefix`.
    pub prefix: Option<String>,
    /// `f.<field>.facet.contains`.
    pub contains: Option<String>,
    /// `f.<field>.facet.sort`.
    pub sort: Option<FacetSort>,
    /// `f.<field>.facet.limit`; `-1` means unlimited.
    pub limit: Option<i64>,
    /// `f.<field>.facet.offset`.
    pub offset: Option<u64>,
    /// `f.<field>.facet.mincount`.
    pub mincount: Option<u64>,
    /// `f.<field>.facet.missing`.
    pub missing: Option<bool>,
    /// `f.<field>.facet.method`.
    pub method: Option<FacetMethod>,
}

impl FieldFacetOverride {
    /// An empty override for `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_mincount(mut self, mincount: u64) -> Self {
        self.mincount = Some(mincount);
        self
    }

    pub fn with_sort(mut self, sort: FacetSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_contains(mut self, contains: impl Into<String>) -> Self {
        self.contains = Some(contains.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_method(mut self, method: FacetMethod) -> Self {
        self.method = Some(method);
        self
    }

    fn write(&self, out: &mut QueryString) {
        let f = self.field.as_str();
        out.push_field_opt(f, "facet.prefix", self.prefix.as_deref())
            .push_field_opt(f, "facet.contains", self.contains.as_deref())
            .push_field_opt(f, "facet.sort", self.sort)
            .push_field_opt(f, "facet.limit", self.limit)
            .push_field_opt(f, "facet.offset", self.offset)
            .push_field_opt(f, "facet.mincount", self.mincount)
            .push_field_opt(f, "facet.missing", self.missing)
            .push_field_opt(f, "facet.method", self.method);
    }
}

/// Field, query and pivot faceting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetParams {
    /// Arbitrary queries to count (`facet.query`).
    pub queries: Vec<String>,
    /// Fields to facet on (`facet.field`).
    pub fields: Vec<String>,
    /// Only terms starting with this (`facet.prefix`).
    pub prefix: Option<String>,
    /// Only terms containing this (`facet.contains`).
    pub contains: Option<String>,
    /// Case-insensitive `facet.contains` (`facet.contains.ignoreCase`).
    pub contains_ignore_case: Option<bool>,
    /// Regular expression terms must match (`facet.matches`).
    pub matches: Option<String>,
    /// Constraint ordering (`facet.sort`).
    pub sort: Option<FacetSort>,
    /// Maximum constraints per field; `-1` means unlimited.
    pub limit: Option<i64>,
    /// Constraints to skip, for paging (`facet.offset`).
    pub offset: Option<u64>,
    /// Smallest count returned (`facet.mincount`).
    pub mincount: Option<u64>,
    /// Also count documents without a value (`facet.missing`).
    pub missing: Option<bool>,
    /// Counting algorithm (`facet.method`).
    pub method: Option<FacetMethod>,
    /// Cap counts at 1 (`facet.exists`).
    pub exists: Option<bool>,
    /// Terms removed from the facet output, comma-joined.
    pub exclude_terms: Vec<String>,
    /// Distributed over-request, added constraints (`facet.overrequest.count`).
    pub overrequest_count: Option<u32>,
    /// Distributed over-request, limit multiplier (`facet.overrequest.ratio`).
    pub overrequest_ratio: Option<f32>,
    /// Threads used to compute field facets; negative means one per field.
    pub threads: Option<i32>,
    /// Pivot (decision tree) facets, each a comma-separated field list.
    pub pivots: Vec<String>,
    /// Smallest count returned inside pivots (`facet.pivot.mincount`).
    pub pivot_mincount: Option<u64>,
    /// Per-field overrides.
    pub overrides: Vec<FieldFacetOverride>,
}

impl FacetParams {
    /// Faceting switched on with nothing else set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `facet.field`.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Adds a `facet.query`.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    /// Adds a `facet.pivot` over the given fields.
    pub fn with_pivot<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        let joined = fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.pivots.push(joined);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_mincount(mut self, mincount: u64) -> Self {
        self.mincount = Some(mincount);
        self
    }

    pub fn with_sort(mut self, sort: FacetSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_method(mut self, method: FacetMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets `facet.contains`, case-insensitive when `ignore_case`.
    pub fn with_contains(mut self, text: impl Into<String>, ignore_case: bool) -> Self {
        self.contains = Some(text.into());
        self.contains_ignore_case = Some(ignore_case);
        self
    }

    pub fn with_matches(mut self, regex: impl Into<String>) -> Self {
        self.matches = Some(regex.into());
        self
    }

    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = Some(exists);
        self
    }

    /// Adds a term to `facet.excludeTerms`.
    pub fn with_exclude_term(mut self, term: impl Into<String>) -> Self {
        self.exclude_terms.push(term.into());
        self
    }

    /// Sets the distributed over-request count and ratio.
    pub fn with_overrequest(mut self, count: u32, ratio: f32) -> Self {
        self.overrequest_count = Some(count);
        self.overrequest_ratio = Some(ratio);
        self
    }

    pub fn with_threads(mut self, threads: i32) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_pivot_mincount(mut self, mincount: u64) -> Self {
        self.pivot_mincount = Some(mincount);
        self
    }

    /// Adds a per-field override.
    pub fn with_override(mut self, field_override: FieldFacetOverride) -> Self {
        self.overrides.push(field_override);
        self
    }
}

impl Params for FacetParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("facet", true)
            .push_each("facet.query", &self.queries)
            .push_each("facet.field", &self.fields)
            .push_opt("facet.prefix", self.prefix.as_deref())
            .push_opt("facet.contains", self.contains.as_deref())
            .push_opt("facet.contains.ignoreCase", self.contains_ignore_case)
            .push_opt("facet.matches", self.matches.as_deref())
            .push_opt("facet.sort", self.sort)
            .push_opt("facet.limit", self.limit)
            .push_opt("facet.offset", self.offset)
            .push_opt("facet.mincount", self.mincount)
            .push_opt("facet.missing", self.missing)
            .push_opt("facet.method", self.method)
            .push_opt("facet.exists", self.exists)
            .push_joined("facet.excludeTerms", &self.exclude_terms, ",")
            .push_opt("facet.overrequest.count", self.overrequest_count)
            .push_opt("facet.overrequest.ratio", self.overrequest_ratio)
            .push_opt("facet.threads", self.threads)
            .push_each("facet.pivot", &self.pivots)
            .push_opt("facet.pivot.mincount", self.pivot_mincount);
        for field_override in &self.overrides {
            field_override.write(out);
        }
    }

    fn validate(&self) -> Result<()> {
        let limits = std::iter::once(self.limit).chain(self.overrides.iter().map(|o| o.limit));
        for limit in limits.flatten() {
            if limit < -1 {
                return Err(ParamsError::invalid(
                    "facet.limit",
                    format!("{limit} is below -1"),
                ));
            }
        }
        if let Some(ratio) = self.overrequest_ratio {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(ParamsError::invalid(
                    "facet.overrequest.ratio",
                    "must be a non-negative number",
                ));
            }
        }
        if self.overrides.iter().any(|o| o.field.is_empty()) {
            return Err(ParamsError::invalid("facet", "override has an empty field name"));
        }
        Ok(())
    }
}

/// Which range boundaries are inclusive (`facet.range.include`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeInclude {
    /// Every bucket includes its lower bound.
    Lower,
    /// Every bucket includes its upper bound.
    Upper,
    /// First and last buckets include their outer edges.
    Edge,
    /// `before` and `after` buckets include the range bounds.
    Outer,
    /// All of the above.
    All,
}

impl fmt::Display for RangeInclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Edge => "edge",
            Self::Outer => "outer",
            Self::All => "all",
        })
    }
}

/// Extra counts outside the ranges (`facet.range.other`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOther {
    Before,
    After,
    Between,
    None,
    All,
}

impl fmt::Display for RangeOther {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Between => "between",
            Self::None => "none",
            Self::All => "all",
        })
    }
}

/// Range-facet algorithm (`facet.range.method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMethod {
    /// One filter query per bucket.
    Filter,
    /// DocValues; multi-valued fields only.
    Dv,
}

impl fmt::Display for RangeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Filter => "filter",
            Self::Dv => "dv",
        })
    }
}

/// One `facet.range` field with its own bounds.
///
/// Bounds are strings because both numbers (`0`, `100.5`) and date math
/// (`NOW/DAY-30DAYS`, `+1DAY`) are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeFacet {
    /// Field named in `facet.range`.
    pub field: String,
    /// Lower bound (`f.<field>.facet.range.start`).
    pub start: Option<String>,
    /// Upper bound (`f.<field>.facet.range.end`).
    pub end: Option<String>,
    /// Bucket size (`f.<field>.facet.range.gap`).
    pub gap: Option<String>,
    /// Clip the last bucket at `end` (`f.<field>.facet.range.hardend`).
    pub hardend: Option<bool>,
    /// Bound inclusion, one pair each.
    pub include: Vec<RangeInclude>,
    /// Extra before/after/between counts, one pair each.
    pub other: Vec<RangeOther>,
    /// Range counting algorithm.
    pub method: Option<RangeMethod>,
}

impl RangeFacet {
    /// A range over `field` from `start` to `end` in steps of `gap`.
    pub fn new(
        field: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        gap: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            start: Some(start.into()),
            end: Some(end.into()),
            gap: Some(gap.into()),
            ..Default::default()
        }
    }

    pub fn with_hardend(mut self, hardend: bool) -> Self {
        self.hardend = Some(hardend);
        self
    }

    pub fn with_include(mut self, include: RangeInclude) -> Self {
        self.include.push(include);
        self
    }

    pub fn with_other(mut self, other: RangeOther) -> Self {
        self.other.push(other);
        self
    }

    pub fn with_method(mut self, method: RangeMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// Range faceting.
///
/// Global bounds apply to every range field that does not set its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetRangeParams {
    /// Default lower bound (`facet.range.start`).
    pub start: Option<String>,
    /// Default upper bound (`facet.range.end`).
    pub end: Option<String>,
    /// Default bucket size (`facet.range.gap`).
    pub gap: Option<String>,
    /// Default `facet.range.hardend`.
    pub hardend: Option<bool>,
    /// Default `facet.range.include`, one pair each.
    pub include: Vec<RangeInclude>,
    /// Default `facet.range.other`, one pair each.
    pub other: Vec<RangeOther>,
    /// Default `facet.range.method`.
    pub method: Option<RangeMethod>,
    /// Range fields, each written as `facet.range` plus overrides.
    pub ranges: Vec<RangeFacet>,
}

impl FacetRangeParams {
    /// An empty range-facet record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a range field.
    pub fn with_range(mut self, range: RangeFacet) -> Self {
        self.ranges.push(range);
        self
    }

    /// Sets global bounds used by ranges that leave theirs unset.
    pub fn with_defaults(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        gap: impl Into<String>,
    ) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self.gap = Some(gap.into());
        self
    }

    pub fn with_hardend(mut self, hardend: bool) -> Self {
        self.hardend = Some(hardend);
        self
    }

    pub fn with_include(mut self, include: RangeInclude) -> Self {
        self.include.push(include);
        self
    }

    pub fn with_other(mut self, other: RangeOther) -> Self {
        self.other.push(other);
        self
    }

    pub fn with_method(mut self, method: RangeMethod) -> Self {
        self.method = Some(method);
        self
    }
}

impl Params for FacetRangeParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("facet", true)
            .push_opt("facet.range.start", self.start.as_deref())
            .push_opt("facet.range.end", self.end.as_deref())
            .push_opt("facet.range.gap", self.gap.as_deref())
            .push_opt("facet.range.hardend", self.hardend);
        for include in &self.include {
            out.push_repeated("facet.range.include", include);
        }
        for other in &self.other {
            out.push_repeated("facet.range.other", other);
        }
        out.push_opt("facet.range.method", self.method);

        for range in &self.ranges {
            let f = range.field.as_str();
            out.push_repeated("facet.range", f)
                .push_field_opt(f, "facet.range.start", range.start.as_deref())
                .push_field_opt(f, "facet.range.end", range.end.as_deref())
                .push_field_opt(f, "facet.range.gap", range.gap.as_deref())
                .push_field_opt(f, "facet.range.hardend", range.hardend);
            let include: Vec<String> = range.include.iter().map(ToString::to_string).collect();
            let other: Vec<String> = range.other.iter().map(ToString::to_string).collect();
            out.push_field_each(f, "facet.range.include", &include)
                .push_field_each(f, "facet.range.other", &other)
                .push_field_opt(f, "facet.range.method", range.method);
        }
    }

    fn validate(&self) -> Result<()> {
        for range in &self.ranges {
            if range.field.is_empty() {
                return Err(ParamsError::invalid("facet.range", "empty field name"));
            }
            let complete = (range.start.is_some() || self.start.is_some())
                && (range.end.is_some() || self.end.is_some())
                && (range.gap.is_some() || self.gap.is_some());
            if !complete {
                return Err(ParamsError::invalid(
                    "facet.range",
                    format!("{} needs start, end and gap", range.field),
                ));
            }
        }
        Ok(())
    }
}

/// One interval in a `facet.interval.set`, optionally labelled with a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSet {
    /// Interval syntax such as `[0,10)` or `(*,5]`.
    pub interval: String,
    /// Output label; written as a `{!key=...}` local parameter.
    pub key: Option<String>,
}

impl IntervalSet {
    pub fn new(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            key: None,
        }
    }

    pub fn keyed(key: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            key: Some(key.into()),
        }
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{{!key={key}}}{}", self.interval),
            None => f.write_str(&self.interval),
        }
    }
}

/// One `facet.interval` field and its intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalFacet {
    /// Field named in `facet.interval`.
    pub field: String,
    /// Written as `f.<field>.facet.interval.set`, one pair each.
    pub sets: Vec<IntervalSet>,
}

impl IntervalFacet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sets: Vec::new(),
        }
    }

    pub fn with_set(mut self, set: IntervalSet) -> Self {
        self.sets.push(set);
        self
    }
}

/// Interval faceting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetIntervalParams {
    pub intervals: Vec<IntervalFacet>,
}

impl FacetIntervalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: IntervalFacet) -> Self {
        self.intervals.push(interval);
        self
    }
}

impl Params for FacetIntervalParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push("facet", true);
        for interval in &self.intervals {
            let sets: Vec<String> = interval.sets.iter().map(ToString::to_string).collect();
            out.push_repeated("facet.interval", &interval.field)
                .push_field_each(&interval.field, "facet.interval.set", &sets);
        }
    }

    fn validate(&self) -> Result<()> {
        for interval in &self.intervals {
            if interval.sets.is_empty() {
                return Err(ParamsError::invalid(
                    "facet.interval",
                    format!("{} has no intervals", interval.field),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    #[test]
    fn bare_record_only_switches_faceting_on() {
        assert_eq!(FacetParams::new().flatten().to_string(), "facet=true");
    }

    #[test]
    fn field_facets_with_override() {
        let facets = FacetParams::new()
            .with_field("cat")
            .with_field("author")
            .with_mincount(1)
            .with_override(FieldFacetOverride::new("cat").with_limit(5).with_sort(FacetSort::Index));
        assert_eq!(
            facets.flatten().to_string(),
            "facet=true&facet.field=cat&facet.field=author&facet.mincount=1\
             &f.cat.facet.sort=index&f.cat.facet.limit=5"
        );
    }

    #[test]
    fn pivot_fields_are_comma_joined() {
        let facets = FacetParams::new().with_pivot(&["cat", "author"]);
        assert_eq!(facets.flatten().get("facet.pivot"), Some("cat,author"));
    }

    #[test]
    fn limit_below_minus_one_rejected() {
        let facets = FacetParams::new().with_override(FieldFacetOverride::new("cat").with_limit(-2));
        let err = facets.validate().unwrap_err();
        assert!(err.to_string().contains("facet.limit"));
    }

    #[test]
    fn unlimited_is_valid() {
        assert!(FacetParams::new().with_limit(-1).validate().is_ok());
    }

    #[test]
    fn range_facet_per_field_keys() {
        let ranges = FacetRangeParams::new().with_range(
            RangeFacet::new("price", "0", "100", "25")
                .with_include(RangeInclude::Lower)
                .with_other(RangeOther::After),
        );
        assert_eq!(
            ranges.flatten().to_string(),
            "facet=true&facet.range=price&f.price.facet.range.start=0\
             &f.price.facet.range.end=100&f.price.facet.range.gap=25\
             &f.price.facet.range.include=lower&f.price.facet.range.other=after"
        );
    }

    #[test]
    fn range_facet_uses_global_defaults() {
        let ranges = FacetRangeParams::new()
            .with_defaults("NOW/DAY-7DAYS", "NOW/DAY", "+1DAY")
            .with_range(RangeFacet {
                field: "created".into(),
                ..Default::default()
            });
        assert!(ranges.validate().is_ok());
        let flat = ranges.flatten();
        assert_eq!(flat.get("facet.range.gap"), Some("+1DAY"));
        assert_eq!(flat.get("facet.range"), Some("created"));
        assert!(!flat.contains_key("f.created.facet.range.gap"));
    }

    #[test]
    fn range_facet_without_bounds_rejected() {
        let ranges = FacetRangeParams::new().with_range(RangeFacet {
            field: "price".into(),
            start: Some("0".into()),
            ..Default::default()
        });
        let err = ranges.validate().unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn interval_sets_repeat_under_field_prefix() {
        let intervals = FacetIntervalParams::new().with_interval(
            IntervalFacet::new("price")
                .with_set(IntervalSet::new("[0,10)"))
                .with_set(IntervalSet::keyed("expensive", "[10,*]")),
        );
        let flat = intervals.flatten();
        assert_eq!(flat.get("facet.interval"), Some("price"));
        assert_eq!(
            flat.get_all("f.price.facet.interval.set"),
            vec!["[0,10)", "{!key=expensive}[10,*]"]
        );
    }

    #[test]
    fn interval_without_sets_rejected() {
        let intervals = FacetIntervalParams::new().with_interval(IntervalFacet::new("price"));
        assert!(intervals.validate().is_err());
    }

    #[test]
    fn merged_facet_records_share_one_switch() {
        let fields = FacetParams::new().with_field("cat");
        let ranges = FacetRangeParams::new().with_range(RangeFacet::new("price", "0", "10", "5"));
        let encoded = encode(&[&fields, &ranges]);
        assert_eq!(encoded.matches("facet=true").count(), 1);
        assert!(encoded.starts_with("facet=true&facet.field=cat&facet.range=price"));
    }
}
