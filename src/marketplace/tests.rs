//! Tests for the marketplace surface

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::pagination::{PageState, Paged};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> MarketplaceClient {
    let config = ClientConfig::builder()
        .app_id("test_app_id")
        .secret_key("test_secret_key")
        .marketplace_url(server.uri())
        .build()
        .unwrap();
    MarketplaceClient::new(&config).unwrap()
}

fn page(results: usize, next_cursor_mark: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "responseCode": "0",
        "responseMessage": "Success",
        "totalNumOfResults": "37",
        "results": (0..results).map(|i| json!({"item": {"n": i}})).collect::<Vec<_>>(),
    });
    if let Some(mark) = next_cursor_mark {
        body["nextCursorMark"] = json!(mark);
    }
    body
}

#[tokio::test]
async fn test_free_text_search_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .and(query_param("app_id", "test_app_id"))
        .and(query_param("searchType", "freeTextSearch"))
        .and(query_param("query", "jelly"))
        .and(query_param("access_mdm", "computer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let results = client.free_text_search("jelly").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.response_code.as_deref(), Some("0"));
    assert_eq!(results.total_num_of_results, Some(37));

    // The raw query string keeps signing order and ends with hash_code.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap().to_string();
    assert!(query.starts_with("app_id=test_app_id&searchType=freeTextSearch&query=jelly&access_mdm=computer&TIMESTAMP="));
    let hash = query.split("&hash_code=").nth(1).unwrap();
    assert!(!hash.is_empty());
    assert!(!hash.contains('&'));
}

#[tokio::test]
async fn test_search_with_rows_and_geo_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .and(query_param("rows", "5"))
        .and(query_param("geo_loc_access_latd", "9.91"))
        .and(query_param("geo_loc_access_long", "51.51"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, None)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SearchRequest::free_text("jelly")
        .with_rows(5)
        .with_geo_location(9.91, 51.51);
    client.search(&request).await.unwrap();
}

#[tokio::test]
async fn test_advanced_search_builds_field_qualified_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .and(query_param("searchType", "advancedSearch"))
        .and(query_param("query", "gtin:00007252147019"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, None)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .advanced_search("gtin", "00007252147019")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_advanced_search_rejects_empty_field_before_sending() {
    let server = MockServer::start().await;
    // No mock mounted: a request would fail loudly.

    let client = client_for(&server).await;
    let err = client.advanced_search("", "00007252147019").await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_query_rejected_before_sending() {
    let server = MockServer::start().await;

    let client = client_for(&server).await;
    let err = client.free_text_search("   ").await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_next_page_carries_token_and_original_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .and(query_param("cursorMark", "mark_1"))
        .and(query_param("query", "jelly"))
        .and(query_param("rows", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SearchRequest::free_text("jelly").with_rows(10);

    let first: SearchResults =
        serde_json::from_value(page(10, Some("mark_1"))).unwrap();
    assert_eq!(first.state(), PageState::HasMore);

    let second = client.next_page(&first, &request).await.unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(second.state(), PageState::Exhausted);
}

#[tokio::test]
async fn test_next_page_past_exhausted_is_an_error() {
    let server = MockServer::start().await;

    let client = client_for(&server).await;
    let request = SearchRequest::free_text("jelly");
    let last: SearchResults = serde_json::from_value(page(4, None)).unwrap();

    let err = client.next_page(&last, &request).await.unwrap_err();
    assert!(matches!(err, Error::Pagination { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pager_walks_to_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .and(query_param("cursorMark", "mark_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, None)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(10, Some("mark_1"))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut pager = client.pager(SearchRequest::free_text("jelly").with_rows(10));

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(pager.state(), PageState::HasMore);

    let second = pager.next_page().await.unwrap().unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(pager.state(), PageState::Exhausted);

    assert!(pager.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_first_page_exhausts_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut pager = client.pager(SearchRequest::free_text("jelly"));

    let first = pager.next_page().await.unwrap().unwrap();
    assert!(first.is_empty());
    assert_eq!(pager.state(), PageState::Exhausted);
    assert!(pager.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_product_signed_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/V2/products/8711234567890"))
        .and(query_param("app_id", "test_app_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {
                "itemIdentificationInformation": {
                    "itemIdentifier": [
                        {"itemId": "8711234567890", "itemIdType": {"value": "GTIN"}, "isPrimary": "true"}
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let product = client.get_product("8711234567890").await.unwrap();
    assert_eq!(product.item_id().as_deref(), Some("8711234567890"));

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("hash_code="));
}

#[test]
fn test_product_accessors_best_effort() {
    let product: Product = serde_json::from_value(json!({
        "item": {
            "itemIdentificationInformation": {
                "itemIdentifier": [
                    {"itemId": "0001", "itemIdType": {"value": "UPC"}, "isPrimary": "false"},
                    {"itemId": "0002", "itemIdType": {"value": "GTIN"}, "isPrimary": "true"}
                ]
            },
            "tradeItemInformation": [{
                "tradeItemDescriptionModule": {
                    "tradeItemDescriptionInformation": [{
                        "brandNameInformation": {"brandName": "Acme"},
                        "regulatedProductName": [{
                            "statement": {"values": [{"value": "Crunchy Peanut Butter"}]}
                        }]
                    }]
                }
            }]
        }
    }))
    .unwrap();

    assert_eq!(product.item_id().as_deref(), Some("0002"));
    assert_eq!(product.brand_name(), Some("Acme"));
    assert_eq!(product.product_name(), Some("Crunchy Peanut Butter"));

    let identifiers = product.identifiers();
    assert_eq!(identifiers.len(), 2);
    assert_eq!(identifiers[0].id_type, "UPC");
    assert!(!identifiers[0].primary);
    assert!(identifiers[1].primary);
}

#[test]
fn test_product_accessors_on_sparse_document() {
    let product: Product = serde_json::from_value(json!({})).unwrap();
    assert_eq!(product.item_id(), None);
    assert_eq!(product.brand_name(), None);
    assert_eq!(product.product_name(), None);
    assert!(product.identifiers().is_empty());
}

#[test]
fn test_envelope_without_optional_fields() {
    let results: SearchResults = serde_json::from_value(json!({"results": []})).unwrap();
    assert!(results.is_empty());
    assert_eq!(results.total_num_of_results, None);
    assert_eq!(results.continuation_token(), None);
    assert_eq!(results.state(), PageState::Exhausted);
}
