//! List cards: the display-ready shape of each API record.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use codelearn_api::types::{ClassRoom, Contest, Course, Difficulty, Problem, UserSummary};
use serde::Serialize;

/// Shown when a record has no owner or the owner has no display name.
pub const FALLBACK_AUTHOR: &str = "Instructor";

fn author_name(user: Option<&UserSummary>) -> String {
    user.and_then(|u| u.display_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_AUTHOR)
        .to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: String,
    pub created_by: String,
}

impl From<Course> for CourseCard {
    fn from(course: Course) -> Self {
        Self {
            created_by: author_name(course.owner.as_ref()),
            id: course.id,
            title: course.title,
            description: course.description,
            image: course.thumbnail_url.filter(|url| !url.is_empty()),
            created_at: course.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Ended,
    /// Start or end time could not be parsed.
    Unknown,
}

impl std::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContestStatus::Upcoming => "upcoming",
                ContestStatus::Ongoing => "ongoing",
                ContestStatus::Ended => "ended",
                ContestStatus::Unknown => "unknown",
            }
        )
    }
}

/// Status of a contest at `now`. Both bounds count as ongoing.
pub fn contest_status(start: &str, end: &str, now: DateTime<Utc>) -> ContestStatus {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), _) if now < start => ContestStatus::Upcoming,
        (_, Some(end)) if now > end => ContestStatus::Ended,
        (Some(_), Some(_)) => ContestStatus::Ongoing,
        _ => ContestStatus::Unknown,
    }
}

/// Accepts RFC 3339, zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as local
/// time) and bare dates (read as UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContestCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub status: ContestStatus,
}

impl ContestCard {
    pub fn from_contest(contest: Contest, now: DateTime<Utc>) -> Self {
        Self {
            status: contest_status(&contest.start_time, &contest.end_time, now),
            id: contest.id,
            title: contest.title,
            description: contest.description,
            start_time: contest.start_time,
            end_time: contest.end_time,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PracticeCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub created_by: String,
    pub difficulty: Difficulty,
}

impl From<Problem> for PracticeCard {
    fn from(problem: Problem) -> Self {
        Self {
            created_by: author_name(problem.created_by.as_ref()),
            id: problem.id,
            title: problem.title,
            description: problem.description,
            created_at: problem.created_at,
            difficulty: problem.difficulty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub course_count: usize,
    pub member_count: usize,
    pub code: String,
}

impl From<ClassRoom> for ClassCard {
    fn from(class: ClassRoom) -> Self {
        Self {
            instructor: author_name(class.owner.as_ref()),
            course_count: class.courses.len(),
            member_count: class.enrollments.len(),
            id: class.id,
            name: class.title,
            description: class.description,
            code: class.code,
        }
    }
}

/// One search result. Which variant depends on the searched catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchHit {
    Course(CourseCard),
    Practice(PracticeCard),
    Contest(ContestCard),
    Class(ClassCard),
}

impl SearchHit {
    pub fn id(&self) -> i64 {
        match self {
            SearchHit::Course(c) => c.id,
            SearchHit::Practice(p) => p.id,
            SearchHit::Contest(c) => c.id,
            SearchHit::Class(c) => c.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SearchHit::Course(c) => &c.title,
            SearchHit::Practice(p) => &p.title,
            SearchHit::Contest(c) => &c.title,
            SearchHit::Class(c) => &c.name,
        }
    }
}
