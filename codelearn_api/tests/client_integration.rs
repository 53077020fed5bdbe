use codelearn_api::types::Difficulty;
use codelearn_api::{Client, CourseQuery, Error, ProblemQuery, Query, Session};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_courses_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/get-all"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("courses.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let page = client
        .get_courses(&CourseQuery::default().with_page_size(9))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total_records, 18);
}

#[tokio::test]
async fn get_problems_sends_difficulty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/problems/get-all"))
        .and(query_param("difficulty", "hard"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("problems.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let query = ProblemQuery::default()
        .with_page(2)
        .with_difficulty(Difficulty::Hard);
    let page = client.get_problems(&query).await.unwrap();
    assert_eq!(page.data[0].title, "Two Sum");
}

#[tokio::test]
async fn application_code_is_an_error_with_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("app_error.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_courses(&CourseQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Application { code: 1004, .. }));
    assert_eq!(err.server_message(), Some("Page size must be positive"));
}

#[tokio::test]
async fn server_error_without_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/get-all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_courses(&CourseQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn malformed_json_is_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_courses(&CourseQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RequestFailed));
}

#[tokio::test]
async fn bearer_token_is_attached_and_cleared_on_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/my-info"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let session = Session::with_token("stale-token");
    let client = Client::with_base_url(&mock_server.uri())
        .unwrap()
        .with_session(session.clone());
    let err = client.get_my_info().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_stores_token_and_logout_clears_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({"username": "an", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code": 200, "message": "OK", "data": {"token": "tok-123"}}"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/my-info"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("my_info.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let token = client.login("an", "secret").await.unwrap();
    assert_eq!(token, "tok-123");
    assert!(client.session().is_authenticated());

    let profile = client.get_my_info().await.unwrap();
    assert_eq!(profile.email.as_deref(), Some("an@example.com"));

    // Even a failing logout call forgets the local token.
    assert!(client.logout().await.is_err());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn logout_without_token_skips_the_request() {
    let mock_server = MockServer::start().await;
    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    assert!(client.logout().await.is_ok());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
