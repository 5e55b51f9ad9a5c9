// tests/discovery.rs
//
// Inbox listing against a mock site.
//
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inbox_scrape::config::options::ApiOptions;
use inbox_scrape::core::Api;
use inbox_scrape::specs::inbox::discover_ids;
use inbox_scrape::token::StaticToken;
use inbox_scrape::{ItemId, ScrapeError};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

fn api_for(server: &MockServer) -> Api {
    Api::new(&ApiOptions::default().with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn listing_ids_are_unique_and_stringified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bugs.json"))
        .and(header("X-CSRF-Token", "tok"))
        .and(query_param("organization_inbox_handle", "acme"))
        .and(query_param("start_date", "2024-04-01"))
        .and(query_param("end_date", "2024-04-30"))
        .and(query_param("limit", "1000"))
        .and(query_param("page", "1"))
        .and(query_param("substates[]", "triaged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bugs": [ {"id": 10}, {"id": 11}, {"id": 10}, {"id": "11"}, {"id": 0}, {"id": 12} ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = discover_ids(&api_for(&server), &StaticToken::new("tok"), "acme", day(1), day(30))
        .await
        .unwrap();

    assert_eq!(ids, vec![ItemId::new("10"), ItemId::new("11"), ItemId::new("12")]);
}

#[tokio::test]
async fn non_success_status_is_a_discovery_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bugs.json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = discover_ids(&api_for(&server), &StaticToken::new("tok"), "acme", day(1), day(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::DiscoveryHttp { status: 403 }));
    assert_eq!(err.to_string(), "Inbox fetch failed (403)");
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bugs": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = discover_ids(&api_for(&server), &StaticToken::none(), "acme", day(1), day(2))
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::TokenNotFound));

    let blank = discover_ids(&api_for(&server), &StaticToken::new("  "), "acme", day(1), day(2)).await;
    assert!(matches!(blank, Err(ScrapeError::TokenNotFound)));
}

#[tokio::test]
async fn empty_listing_is_an_empty_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bugs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bugs": [] })))
        .mount(&server)
        .await;

    let ids = discover_ids(&api_for(&server), &StaticToken::new("tok"), "acme", day(1), day(2))
        .await
        .unwrap();
    assert!(ids.is_empty());
}
