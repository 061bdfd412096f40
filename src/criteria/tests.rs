//! Tests for criteria serialization

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_empty_criteria_serializes_to_empty_object() {
    let criteria = ProductCriteria::new();
    assert!(criteria.is_empty());
    assert_eq!(serde_json::to_value(&criteria).unwrap(), json!({}));
}

#[test]
fn test_full_criteria_wire_shape() {
    let criteria = ProductCriteria::new()
        .with_target_market("US")
        .with_last_modified_date(DateRange::between("2023-01-01", "2023-12-31"))
        .with_brand_name("Acme")
        .with_gpc_category("10000000")
        .with_gtins(["00000000000001", "00000000000002"])
        .with_fields(["gtin", "brandName", "lastModifiedDate"])
        .with_sort([SortField::desc("lastModifiedDate"), SortField::asc("gtin")]);

    assert_eq!(
        serde_json::to_value(&criteria).unwrap(),
        json!({
            "targetMarket": "US",
            "lastModifiedDate": {
                "from": {"date": "2023-01-01", "op": "GTE"},
                "to": {"date": "2023-12-31", "op": "LTE"}
            },
            "brandName": "Acme",
            "gpcCategory": "10000000",
            "gtin": ["00000000000001", "00000000000002"],
            "fields": {"include": ["gtin", "brandName", "lastModifiedDate"]},
            "sortFields": [
                {"field": "lastModifiedDate", "desc": true},
                {"field": "gtin", "desc": false}
            ]
        })
    );
}

#[test]
fn test_one_sided_date_ranges() {
    let since = DateRange::since("2024-06-01");
    assert_eq!(
        serde_json::to_value(&since).unwrap(),
        json!({"from": {"date": "2024-06-01", "op": "GTE"}})
    );

    let until = DateRange::until("2024-06-30");
    assert_eq!(
        serde_json::to_value(&until).unwrap(),
        json!({"to": {"date": "2024-06-30", "op": "LTE"}})
    );
}

#[test]
fn test_last_30_days_is_a_bounded_range() {
    let range = DateRange::last_30_days();
    let from = range.from.as_ref().unwrap();
    let to = range.to.as_ref().unwrap();
    assert_eq!(from.op, CompareOp::Gte);
    assert_eq!(to.op, CompareOp::Lte);
    // YYYY-MM-DD on both sides, from strictly before to
    assert_eq!(from.date.len(), 10);
    assert_eq!(to.date.len(), 10);
    assert!(from.date < to.date);
}

#[test]
fn test_search_after_merge_preserves_all_other_keys() {
    let original = ProductCriteria::new()
        .with_target_market("US")
        .with_brand_name("Acme")
        .with_gtins(["00000000000001"]);

    let paged = original.clone().with_search_after("token_1");

    // criteria ∪ {token}: everything but searchAfter is byte-identical
    let mut expected = serde_json::to_value(&original).unwrap();
    expected["searchAfter"] = json!("token_1");
    assert_eq!(serde_json::to_value(&paged).unwrap(), expected);
    assert_eq!(paged.search_after(), Some("token_1"));
}

#[test]
fn test_search_after_merge_replaces_previous_token() {
    let paged = ProductCriteria::new()
        .with_target_market("US")
        .with_search_after("token_1")
        .with_search_after("token_2");

    assert_eq!(paged.search_after(), Some("token_2"));
    let value = serde_json::to_value(&paged).unwrap();
    assert_eq!(value["searchAfter"], json!("token_2"));
}
