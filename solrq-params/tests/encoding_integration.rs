//! Integration tests for merging several parameter records into one request.
//!
//! These exercise the public API only: record builders, [`encode`] and
//! [`QueryString`] inspection. No network.

use solrq_params::{
    encode, encode_pairs, encode_validated, BoostedField, DisMaxParams, FacetIntervalParams,
    FacetParams, FacetRangeParams, FacetSort, FieldFacetOverride, FieldHighlightOverride,
    HighlightParams, IntervalFacet, IntervalSet, MoreLikeThisParams, Params, QueryParams,
    QueryString, RangeFacet, RawParams, SortClause, SpellcheckParams, SuggesterParams,
};

fn keys(qs: &QueryString) -> Vec<&str> {
    qs.pairs().map(|(k, _)| k).collect()
}

#[test]
fn full_search_request_is_ordered_by_record_then_field() {
    let query = QueryParams::new("title:solr")
        .with_filter("lang:en")
        .with_fields(["id", "title", "score"])
        .with_sort(SortClause::desc("score"))
        .with_rows(10);
    let dismax = DisMaxParams::edismax()
        .with_qf(BoostedField::boosted("title", 3.0))
        .with_qf(BoostedField::new("body"))
        .with_mm("75%");
    let facets = FacetParams::new()
        .with_field("author")
        .with_field("year")
        .with_mincount(1)
        .with_override(FieldFacetOverride::new("year").with_sort(FacetSort::Index));
    let hl = HighlightParams::new()
        .with_field("body")
        .with_override(FieldHighlightOverride::new("body").with_fragsize(200));

    let qs = encode_pairs(&[&query, &dismax, &facets, &hl]);

    assert_eq!(
        keys(&qs),
        vec![
            "q",
            "fq",
            "fl",
            "sort",
            "rows",
            "defType",
            "qf",
            "mm",
            "facet",
            "facet.field",
            "facet.field",
            "facet.mincount",
            "f.year.facet.sort",
            "hl",
            "hl.fl",
            "f.body.hl.fragsize",
        ]
    );
    assert_eq!(qs.get("qf"), Some("title^3 body"));
    assert_eq!(qs.get("mm"), Some("75%"));
}

#[test]
fn encoded_string_decodes_to_same_pairs() {
    let query = QueryParams::new("name:\"hello world\" AND price:[* TO 100]");
    let facets = FacetParams::new().with_query("price:[0 TO 10}");
    let encoded = encode(&[&query, &facets]);

    let decoded = QueryString::decode(&encoded).expect("decode");
    let original = encode_pairs(&[&query, &facets]);
    let left: Vec<_> = decoded.pairs().collect();
    let right: Vec<_> = original.pairs().collect();
    assert_eq!(left, right);
}

#[test]
fn all_facet_flavours_share_one_switch() {
    let fields = FacetParams::new().with_field("cat");
    let ranges = FacetRangeParams::new().with_range(RangeFacet::new("price", "0", "100", "10"));
    let intervals = FacetIntervalParams::new()
        .with_interval(IntervalFacet::new("rating").with_set(IntervalSet::new("[4,5]")));

    let qs = encode_pairs(&[&fields, &ranges, &intervals]);
    assert_eq!(qs.get_all("facet"), vec!["true"]);
    assert_eq!(qs.get("facet.range"), Some("price"));
    assert_eq!(qs.get("facet.interval"), Some("rating"));
    assert_eq!(qs.get("f.rating.facet.interval.set"), Some("[4,5]"));
}

#[test]
fn later_record_overrides_single_valued_key() {
    let base = QueryParams::new("*:*").with_rows(10).with_wt("xml");
    let page = QueryParams::default().with_rows(50).with_start(100);

    let qs = encode_pairs(&[&base, &page]);
    assert_eq!(qs.get_all("rows"), vec!["50"]);
    assert_eq!(keys(&qs), vec!["q", "rows", "wt", "start"]);
}

#[test]
fn raw_params_are_appended_verbatim() {
    let query = QueryParams::new("*:*").with_filter("a:1");
    let raw = RawParams::new()
        .with("fq", "b:2")
        .with("group", "true")
        .with("group.field", "author");

    let qs = encode_pairs(&[&query, &raw]);
    assert_eq!(qs.get_all("fq"), vec!["a:1", "b:2"]);
    assert_eq!(qs.get("group.field"), Some("author"));
}

#[test]
fn component_records_combine_with_query() {
    let query = QueryParams::new("id:42");
    let mlt = MoreLikeThisParams::new(["title", "body"]).with_count(5);
    let spell = SpellcheckParams::new().with_count(3);

    let encoded = encode(&[&query, &mlt, &spell]);
    assert_eq!(
        encoded,
        "q=id%3A42&mlt=true&mlt.fl=title%2Cbody&mlt.count=5&spellcheck=true&spellcheck.count=3"
    );
}

#[test]
fn validation_reports_first_bad_record() {
    let query = QueryParams::new("*:*");
    let suggest = SuggesterParams::default();
    let dismax = DisMaxParams::dismax().with_tie(2.0);

    let err = encode_validated(&[&query, &suggest, &dismax]).unwrap_err();
    assert!(err.to_string().contains("suggest.q"), "got: {err}");
}

#[test]
fn records_can_be_flattened_individually() {
    let hl = HighlightParams::new().with_tags("[", "]");
    let flat = hl.flatten();
    assert_eq!(flat.get("hl.tag.pre"), Some("["));
    assert_eq!(flat.to_string(), "hl=true&hl.tag.pre=%5B&hl.tag.post=%5D");
}
