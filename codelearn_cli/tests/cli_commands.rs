//! Runs the `codelearn` binary against a wiremock backend.

use std::process::Output;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_cli(server: &MockServer, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_codelearn"))
        .arg("--api-url")
        .arg(server.uri())
        .args(args)
        .env_remove("CODELEARN_TOKEN")
        .env("CODELEARN_CACHE_TTL_SECS", "0")
        .env("RUST_LOG", "off")
        .output()
        .await
        .expect("run codelearn")
}

fn page(data: Value, total_records: i64, current_page: i64, total_pages: i64) -> Value {
    json!({
        "code": 200,
        "message": "Success",
        "data": {
            "total_records": total_records,
            "current_page": current_page,
            "total_pages": total_pages,
            "data": data
        }
    })
}

#[tokio::test]
async fn practice_deep_link_prints_json_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "6"))
        .and(query_param("difficulty", "hard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{ "id": 8, "title": "Max Flow", "difficulty": "hard" }]),
            7,
            2,
            2,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let out = run_cli(
        &server,
        &["--output", "json", "practice", "--query", "page=2&difficulty=hard"],
    )
    .await;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let body: Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["items"][0]["title"], "Max Flow");
    assert_eq!(body["items"][0]["created_by"], "Instructor");
}

#[tokio::test]
async fn failed_list_exits_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1004,
            "message": "Page size must be positive",
            "data": null
        })))
        .mount(&server)
        .await;

    let out = run_cli(&server, &["courses"]).await;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Page size must be positive"));
}

#[tokio::test]
async fn empty_search_without_keyword_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let out = run_cli(&server, &["search", "--type", "contest"]).await;
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Enter a keyword to search."));
}

#[tokio::test]
async fn empty_list_prints_an_empty_json_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 0, 1, 0)))
        .mount(&server)
        .await;

    let out = run_cli(&server, &["--output", "json", "practice"]).await;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let body: Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(body["total_records"], 0);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["items"], json!([]));
}
