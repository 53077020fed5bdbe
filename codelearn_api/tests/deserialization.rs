use codelearn_api::types::{
    ApiResponse, ClassRoom, Contest, Course, Difficulty, PaginatedResponse, Problem, UserProfile,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_courses_full() {
    let json = load_fixture("courses.json");
    let resp: PaginatedResponse<Course> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.code, 200);
    let page = resp.data.unwrap();
    assert_eq!(page.total_records, 18);
    assert_eq!(page.total_pages, 9);
    assert_eq!(page.prev_pages, None);
    assert_eq!(page.next_pages, Some(2));
    assert_eq!(page.data.len(), 2);

    let rust = &page.data[0];
    assert_eq!(rust.title, "Rust from Zero");
    assert_eq!(
        rust.owner.as_ref().and_then(|o| o.display_name.as_deref()),
        Some("Linh Tran")
    );
    assert_eq!(rust.modules[0].lessons[0].title, "Installing rustup");

    let algo = &page.data[1];
    assert!(algo.owner.is_none());
    assert!(algo.is_public.is_none());
}

#[test]
fn deserialize_problems_difficulty() {
    let json = load_fixture("problems.json");
    let resp: PaginatedResponse<Problem> = serde_json::from_str(&json).unwrap();
    let page = resp.data.unwrap();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.data[0].difficulty, Difficulty::Hard);
    assert!(page.data[0].testcases[0].is_sample);
}

#[test]
fn deserialize_contests_and_classes() {
    let contests: PaginatedResponse<Contest> =
        serde_json::from_str(&load_fixture("contests.json")).unwrap();
    let contest = &contests.data.unwrap().data[0];
    assert_eq!(contest.start_time, "2024-03-10T09:00:00");

    let classes: PaginatedResponse<ClassRoom> =
        serde_json::from_str(&load_fixture("classes.json")).unwrap();
    let page = classes.data.unwrap();
    // prev/next are optional on the wire
    assert_eq!(page.prev_pages, None);
    assert_eq!(page.data[0].code, "K7QX2M");
    assert_eq!(page.data[0].enrollments.len(), 2);
}

#[test]
fn deserialize_empty_page() {
    let resp: PaginatedResponse<Course> =
        serde_json::from_str(&load_fixture("empty_page.json")).unwrap();
    let page = resp.data.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[test]
fn deserialize_application_error_without_data() {
    let resp: PaginatedResponse<Course> =
        serde_json::from_str(&load_fixture("app_error.json")).unwrap();
    assert_eq!(resp.code, 1004);
    assert!(resp.data.is_none());
}

#[test]
fn deserialize_profile_role() {
    let resp: ApiResponse<UserProfile> =
        serde_json::from_str(&load_fixture("my_info.json")).unwrap();
    let profile = resp.data.unwrap();
    assert_eq!(profile.role_name(), "USER");
    assert_eq!(profile.display_name.as_deref(), Some("An Pham"));
}

#[test]
fn deserialize_unknown_difficulty_returns_error() {
    let json = r#"{"id": 1, "title": "x", "difficulty": "extreme"}"#;
    assert!(serde_json::from_str::<Problem>(json).is_err());
}
