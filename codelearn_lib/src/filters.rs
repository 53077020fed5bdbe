//! The filters each list view understands, and how they map to the URL.

use std::str::FromStr;

use codelearn_api::types::Difficulty;

use crate::query_state::{ListFilter, QueryString};
use crate::validation::normalize_keyword;

/// Lists with no filter: courses and contests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoFilter;

impl ListFilter for NoFilter {
    const KEYS: &'static [&'static str] = &[];

    fn from_query(_query: &QueryString) -> Self {
        NoFilter
    }

    fn write_query(&self, _query: &mut QueryString) {}
}

/// `difficulty=easy|medium|hard` on the practice list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DifficultyFilter(pub Option<Difficulty>);

impl DifficultyFilter {
    pub const KEY: &'static str = "difficulty";
}

impl ListFilter for DifficultyFilter {
    const KEYS: &'static [&'static str] = &[Self::KEY];

    fn from_query(query: &QueryString) -> Self {
        DifficultyFilter(
            query
                .get(Self::KEY)
                .and_then(|raw| Difficulty::from_str(&raw.trim().to_ascii_lowercase()).ok()),
        )
    }

    fn write_query(&self, query: &mut QueryString) {
        if let Some(difficulty) = self.0 {
            query.set(Self::KEY, difficulty.to_string());
        }
    }
}

/// `joined=true` on the class list switches to the user's enrolled classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MembershipFilter {
    #[default]
    All,
    Joined,
}

impl MembershipFilter {
    pub const KEY: &'static str = "joined";
}

impl ListFilter for MembershipFilter {
    const KEYS: &'static [&'static str] = &[Self::KEY];

    fn from_query(query: &QueryString) -> Self {
        match query.get(Self::KEY).map(str::trim) {
            Some("true") | Some("1") => MembershipFilter::Joined,
            _ => MembershipFilter::All,
        }
    }

    fn write_query(&self, query: &mut QueryString) {
        if *self == MembershipFilter::Joined {
            query.set(Self::KEY, "true");
        }
    }
}

/// Which catalog a search runs against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchKind {
    #[default]
    Course,
    Practice,
    Contest,
    Class,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Course,
        SearchKind::Practice,
        SearchKind::Contest,
        SearchKind::Class,
    ];
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SearchKind::Course => "course",
                SearchKind::Practice => "practice",
                SearchKind::Contest => "contest",
                SearchKind::Class => "class",
            }
        )
    }
}

impl FromStr for SearchKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course" => Ok(SearchKind::Course),
            "practice" => Ok(SearchKind::Practice),
            "contest" => Ok(SearchKind::Contest),
            "class" => Ok(SearchKind::Class),
            _ => Err(()),
        }
    }
}

/// `q=<keyword>&type=<kind>` on the search page. Without a keyword the
/// search view stays idle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub keyword: Option<String>,
    pub kind: SearchKind,
}

impl SearchFilter {
    pub const KEYWORD_KEY: &'static str = "q";
    pub const KIND_KEY: &'static str = "type";

    pub fn new(keyword: &str, kind: SearchKind) -> Self {
        Self {
            keyword: normalize_keyword(keyword),
            kind,
        }
    }
}

impl ListFilter for SearchFilter {
    const KEYS: &'static [&'static str] = &[Self::KEYWORD_KEY, Self::KIND_KEY];

    fn from_query(query: &QueryString) -> Self {
        Self {
            keyword: query.get(Self::KEYWORD_KEY).and_then(normalize_keyword),
            kind: query
                .get(Self::KIND_KEY)
                .and_then(|raw| SearchKind::from_str(raw.trim()).ok())
                .unwrap_or_default(),
        }
    }

    fn write_query(&self, query: &mut QueryString) {
        if let Some(keyword) = &self.keyword {
            query.set(Self::KEYWORD_KEY, keyword.clone());
        }
        if self.keyword.is_some() || self.kind != SearchKind::default() {
            query.set(Self::KIND_KEY, self.kind.to_string());
        }
    }

    fn is_fetchable(&self) -> bool {
        self.keyword.is_some()
    }
}
