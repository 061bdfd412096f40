//! Tests for the signing module

use super::*;
use crate::error::Error;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

const APP_ID: &str = "test_app_id";
const SECRET: &str = "test_secret_key";

const V2_CANONICAL: &str = "/V2/products?app_id=test_app_id&searchType=freeTextSearch&query=jelly&access_mdm=computer&TIMESTAMP=2023-01-01T12:00:00Z";

#[test]
fn test_timestamp_format() {
    let at = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(format_timestamp(at), "2023-01-01T12:00:00Z");

    let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(format_timestamp(at), "2024-12-31T23:59:59Z");
}

#[test]
fn test_generate_timestamp_shape() {
    let ts = generate_timestamp();
    assert_eq!(ts.len(), 20);
    assert!(ts.ends_with('Z'));
    assert_eq!(&ts[10..11], "T");
}

#[test]
fn test_marketplace_golden_signature() {
    // Known fixture: fixed app id, secret, path and timestamp must
    // reproduce this exact base64 digest.
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    assert_eq!(
        signer.sign(V2_CANONICAL).unwrap(),
        "f+XUVHbtPl+NLKrEhp3hNxr06uGjlqdZIiGg7XO6Sms="
    );
}

#[test]
fn test_marketplace_url_encoding_of_signature() {
    // `+` and `=` are percent-encoded and `/` becomes %2F.
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    assert_eq!(
        signer.sign_for_url(V2_CANONICAL).unwrap(),
        "f%2BXUVHbtPl%2BNLKrEhp3hNxr06uGjlqdZIiGg7XO6Sms%3D"
    );
}

#[test]
fn test_marketplace_slash_in_digest_becomes_percent_2f() {
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    let canonical = V2_CANONICAL.replace("query=jelly", "query=apple");
    assert_eq!(
        signer.sign(&canonical).unwrap(),
        "0qzVESOfWth/+soFrKv185q0lOkyZcrx3dIq5UGlV+8="
    );
    assert_eq!(
        signer.sign_for_url(&canonical).unwrap(),
        "0qzVESOfWth%2F%2BsoFrKv185q0lOkyZcrx3dIq5UGlV%2B8%3D"
    );
}

#[test]
fn test_marketplace_signing_is_deterministic() {
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    let first = signer.sign(V2_CANONICAL).unwrap();
    let second = signer.sign(V2_CANONICAL).unwrap();
    assert_eq!(first, second);
}

#[test_case("query=jelly", "query=jolly"; "query value")]
#[test_case("searchType=freeTextSearch", "searchType=advancedSearch"; "operation type")]
#[test_case("app_id=test_app_id", "app_id=other_app_id"; "application id")]
#[test_case("TIMESTAMP=2023-01-01T12:00:00Z", "TIMESTAMP=2023-01-01T12:00:01Z"; "timestamp")]
fn test_marketplace_signature_sensitivity(original: &str, mutated: &str) {
    // Changing any single parameter, or the timestamp, changes the digest.
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    let changed = V2_CANONICAL.replace(original, mutated);
    assert_ne!(changed, V2_CANONICAL);
    assert_ne!(
        signer.sign(&changed).unwrap(),
        signer.sign(V2_CANONICAL).unwrap()
    );
}

#[test]
fn test_marketplace_parameter_order_matters() {
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    let reordered = "/V2/products?searchType=freeTextSearch&app_id=test_app_id&query=jelly&access_mdm=computer&TIMESTAMP=2023-01-01T12:00:00Z";
    assert_ne!(
        signer.sign(reordered).unwrap(),
        signer.sign(V2_CANONICAL).unwrap()
    );
}

#[test]
fn test_content1_golden_signature() {
    // The Content1 scheme hashes the URI-component-encoded URI, so the
    // digest differs from hashing the raw string.
    let signer = Content1Signer::new(APP_ID, SECRET, None).unwrap();
    let uri = "/V1/product/fetch?appId=test_app_id&pageSize=10&timestamp=2023-01-01T12:00:00Z";
    assert_eq!(
        signer.sign(uri).unwrap(),
        "n4TrzWO2qAZEhqyhuP/F1umUmLEXEutWIiLMO42aYJM="
    );
}

#[test]
fn test_content1_scheme_differs_from_marketplace_scheme() {
    let uri = "/V1/product/fetch?appId=test_app_id&pageSize=10&timestamp=2023-01-01T12:00:00Z";
    let content1 = Content1Signer::new(APP_ID, SECRET, None).unwrap();
    let marketplace = MarketplaceSigner::new(SECRET).unwrap();
    assert_ne!(content1.sign(uri).unwrap(), marketplace.sign(uri).unwrap());
}

#[test]
fn test_content1_auth_headers() {
    let signer = Content1Signer::new(APP_ID, SECRET, None).unwrap();
    let uri = "/V1/product/count?appId=test_app_id&timestamp=2023-01-01T12:00:00Z";
    let headers = signer.auth_headers(uri).unwrap();

    let get = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("appid"), Some(APP_ID));
    assert_eq!(get("Content-Type"), Some("application/json"));
    assert_eq!(get("accept"), Some("application/json"));
    assert_eq!(
        get("hashcode"),
        Some("5/q9l71o73FtyMMYFLIDZxHiEbDf40BB+ZAcuHNOFLk=")
    );
    assert_eq!(get("gln"), None);
}

#[test]
fn test_content1_gln_header_when_configured() {
    let signer = Content1Signer::new(APP_ID, SECRET, Some("1234567890123".to_string())).unwrap();
    let headers = signer.auth_headers("/V1/product/count?appId=x&timestamp=t").unwrap();
    assert!(headers
        .iter()
        .any(|(k, v)| *k == "gln" && v == "1234567890123"));
}

#[test]
fn test_empty_secret_rejected() {
    assert!(matches!(
        MarketplaceSigner::new(""),
        Err(Error::MissingCredential { .. })
    ));
    assert!(matches!(
        Content1Signer::new(APP_ID, "", None),
        Err(Error::MissingCredential { .. })
    ));
}

#[test]
fn test_signers_do_not_leak_secret_in_debug() {
    let signer = MarketplaceSigner::new(SECRET).unwrap();
    assert!(!format!("{signer:?}").contains(SECRET));

    let signer = Content1Signer::new(APP_ID, SECRET, None).unwrap();
    assert!(!format!("{signer:?}").contains(SECRET));
}
