use codelearn_api::types::Difficulty;
use codelearn_api::{ClassQuery, ContestQuery, CourseQuery, ProblemQuery, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn course_query_defaults() {
    let url = CourseQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=1"));
}

#[test]
fn contest_query_with_page_and_size() {
    let query = ContestQuery::default().with_page(3).with_page_size(5);
    assert_eq!(query.endpoint(), "/contest/get-all");
    let url = query.add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("page=3"));
    assert!(query.contains("pageSize=5"));
}

#[test]
fn contest_search_uses_search_endpoint() {
    let query = ContestQuery::default().with_search("cup");
    assert_eq!(query.endpoint(), "/contest/search");
    assert!(query.add_to_url(&base_url()).query().unwrap().contains("title=cup"));
}

#[test]
fn problem_query_with_difficulty_and_search() {
    let query = ProblemQuery::default()
        .with_search("sum")
        .with_difficulty(Difficulty::Easy);
    assert_eq!(query.endpoint(), "/problems/search");
    let url = query.add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("title=sum"));
    assert!(query.contains("difficulty=easy"));
}

#[test]
fn class_query_joined_overrides_search() {
    let query = ClassQuery::default().with_search("cs").joined();
    assert_eq!(query.endpoint(), "/class/joined");
    let url = query.add_to_url(&base_url());
    assert!(!url.query().unwrap().contains("title="));
}

#[test]
fn search_titles_are_url_encoded() {
    let url = CourseQuery::default()
        .with_search("C++ & Java")
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("title=C%2B%2B+%26+Java"));
}
