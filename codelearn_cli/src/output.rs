use chrono::Local;
use codelearn_lib::cards::parse_timestamp;
use codelearn_lib::types::UserProfile;
use codelearn_lib::{
    ClassCard, ContestCard, CourseCard, ListConfig, ListView, PageEnvelope, PracticeCard,
    SearchHit,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct ContestRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
}

#[derive(Tabled, Serialize)]
struct PracticeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct ClassRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Instructor")]
    instructor: String,
    #[tabled(rename = "Courses")]
    courses: usize,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Code")]
    code: String,
}

#[derive(Tabled, Serialize)]
struct SearchRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Details")]
    details: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_course_rows(courses: &[CourseCard]) -> Vec<CourseRow> {
    courses
        .iter()
        .map(|c| CourseRow {
            id: c.id,
            title: c.title.clone(),
            author: c.created_by.clone(),
            created: format_date(&c.created_at),
        })
        .collect()
}

fn build_contest_rows(contests: &[ContestCard]) -> Vec<ContestRow> {
    contests
        .iter()
        .map(|c| ContestRow {
            id: c.id,
            title: c.title.clone(),
            status: c.status.to_string(),
            starts: format_datetime(&c.start_time),
            ends: format_datetime(&c.end_time),
        })
        .collect()
}

fn build_practice_rows(problems: &[PracticeCard]) -> Vec<PracticeRow> {
    problems
        .iter()
        .map(|p| PracticeRow {
            id: p.id,
            title: p.title.clone(),
            difficulty: p.difficulty.to_string(),
            author: p.created_by.clone(),
            created: format_date(&p.created_at),
        })
        .collect()
}

fn build_class_rows(classes: &[ClassCard]) -> Vec<ClassRow> {
    classes
        .iter()
        .map(|c| ClassRow {
            id: c.id,
            name: c.name.clone(),
            instructor: c.instructor.clone(),
            courses: c.course_count,
            members: c.member_count,
            code: c.code.clone(),
        })
        .collect()
}

fn build_search_rows(hits: &[SearchHit]) -> Vec<SearchRow> {
    hits.iter()
        .map(|hit| {
            let (kind, details) = match hit {
                SearchHit::Course(c) => ("course", c.created_by.clone()),
                SearchHit::Practice(p) => ("practice", p.difficulty.to_string()),
                SearchHit::Contest(c) => ("contest", c.status.to_string()),
                SearchHit::Class(c) => ("class", c.code.clone()),
            };
            SearchRow {
                kind: kind.to_string(),
                id: hit.id(),
                title: hit.title().to_string(),
                details,
            }
        })
        .collect()
}

fn build_profile_rows(profile: &UserProfile) -> Vec<FieldRow> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        FieldRow {
            field: "Name",
            value: opt(&profile.display_name),
        },
        FieldRow {
            field: "Email",
            value: opt(&profile.email),
        },
        FieldRow {
            field: "Role",
            value: profile.role_name().to_string(),
        },
        FieldRow {
            field: "Date of birth",
            value: opt(&profile.dob),
        },
        FieldRow {
            field: "Phone",
            value: opt(&profile.phone),
        },
        FieldRow {
            field: "Joined",
            value: profile
                .created_at
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
        },
    ]
}

// -- Table output --

pub fn print_courses_table(courses: &[CourseCard]) {
    println!("{}", Table::new(build_course_rows(courses)));
}

pub fn print_contests_table(contests: &[ContestCard]) {
    println!("{}", Table::new(build_contest_rows(contests)));
}

pub fn print_practice_table(problems: &[PracticeCard]) {
    println!("{}", Table::new(build_practice_rows(problems)));
}

pub fn print_classes_table(classes: &[ClassCard]) {
    println!("{}", Table::new(build_class_rows(classes)));
}

pub fn print_search_table(hits: &[SearchHit]) {
    println!("{}", Table::new(build_search_rows(hits)));
}

pub fn print_profile_table(profile: &UserProfile) {
    println!("{}", Table::new(build_profile_rows(profile)));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[derive(Serialize)]
struct PageJson<'a, T> {
    current_page: u32,
    total_pages: u32,
    total_records: u64,
    items: &'a [T],
}

fn page_json<T>(envelope: &PageEnvelope<T>) -> PageJson<'_, T> {
    PageJson {
        current_page: envelope.current_page,
        total_pages: envelope.total_pages,
        total_records: envelope.total_records,
        items: &envelope.items,
    }
}

// -- List views --

/// Prints one state of a list view. Failures go to stderr.
pub fn print_view<T: Serialize>(
    config: ListConfig,
    view: &ListView<T>,
    format: OutputFormat,
    print_table: fn(&[T]),
) {
    match view {
        ListView::Idle => eprintln!("Enter a keyword to search."),
        ListView::Loading { placeholders } => {
            eprintln!("Loading {} {}...", placeholders, config.kind)
        }
        ListView::Failed(message) => eprintln!("{}", message),
        ListView::Empty => match format {
            OutputFormat::Table => println!("{}", config.kind.empty_message()),
            OutputFormat::Json => print_json(&page_json(&PageEnvelope::<T>::empty())),
        },
        ListView::Page(envelope) => match format {
            OutputFormat::Table => {
                print_table(&envelope.items);
                eprintln!("{}", page_footer(config, envelope));
            }
            OutputFormat::Json => print_json(&page_json(envelope)),
        },
    }
}

fn page_footer<T>(config: ListConfig, envelope: &PageEnvelope<T>) -> String {
    let pagination = envelope.pagination();
    let mut footer = format!(
        "Page {}/{} ({} total {})",
        pagination.current_page, pagination.total_pages, pagination.total_records, config.kind
    );
    if pagination.has_previous() {
        footer.push_str(" [p] previous");
    }
    if pagination.has_next() {
        footer.push_str(" [n] next");
    }
    footer
}

fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
