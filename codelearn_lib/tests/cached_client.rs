//! Integration tests for CachedClient retry and session handling.

use std::time::Duration;

use codelearn_lib::cache::MemoryCache;
use codelearn_lib::codelearn_api::{Client, ProblemQuery, Query};
use codelearn_lib::{CachedClient, CodeLearnError, RetryConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_page() -> serde_json::Value {
    json!({
        "code": 200,
        "message": "Success",
        "data": { "total_records": 0, "current_page": 1, "total_pages": 0, "data": [] }
    })
}

#[tokio::test]
async fn retries_server_errors_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryConfig {
        max_retries: 1,
        base_delay_ms: 1,
        max_delay_ms: 1,
    };
    let client = CachedClient::new(
        Client::with_base_url(&server.uri()).expect("create client"),
        MemoryCache::disabled(),
        retry,
    );
    let page = client
        .get_problems(&ProblemQuery::default().with_page(1))
        .await
        .expect("retried request succeeds");
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn application_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1004,
            "message": "Page size must be positive",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryConfig {
        max_retries: 3,
        base_delay_ms: 1,
        max_delay_ms: 1,
    };
    let client = CachedClient::new(
        Client::with_base_url(&server.uri()).expect("create client"),
        MemoryCache::new(Duration::from_secs(60)),
        retry,
    );
    let err = client
        .get_problems(&ProblemQuery::default())
        .await
        .expect_err("application error");
    assert_eq!(
        err.user_message("fallback"),
        "Page size must be positive"
    );
    assert!(matches!(err, CodeLearnError::Api(_)));
}

#[tokio::test]
async fn login_and_logout_manage_the_shared_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "ada", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "Login successful",
            "data": { "token": "tok-9" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({ "token": "tok-9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "Logged out",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CachedClient::with_base_url(&server.uri(), MemoryCache::disabled())
        .expect("create client");
    let token = client.login("ada", "secret").await.expect("login");
    assert_eq!(token, "tok-9");
    assert!(client.session().is_authenticated());

    client.logout().await.expect("logout");
    assert!(!client.session().is_authenticated());
}
