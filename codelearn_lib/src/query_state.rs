//! URL query strings and the list state derived from them.
//!
//! A list view never stores "the current page" on its own. It reads the
//! page and filter out of the URL with [`ListQueryState::from_query`] and
//! writes changes back with [`ListQueryState::write_query`].

use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::str::FromStr;

use url::form_urlencoded;

/// Ordered `key=value` pairs of a URL query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=2`, with or without a leading `?`. Never fails.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first occurrence of `key` in place and drops any
    /// duplicates, or appends the pair if `key` is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl FromStr for QueryString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The filter half of a list's query state.
///
/// `from_query` must not fail: unknown or malformed values read as the
/// default ("no filter"). `write_query` writes only the keys in `KEYS`.
pub trait ListFilter: Clone + Default + PartialEq + Eq + Debug + Send + Sync + 'static {
    /// Query keys owned by this filter. They are cleared before the filter writes itself.
    const KEYS: &'static [&'static str];

    fn from_query(query: &QueryString) -> Self;

    fn write_query(&self, query: &mut QueryString);

    /// Whether this state should trigger a fetch at all. A search with no
    /// keyword, for instance, stays idle.
    fn is_fetchable(&self) -> bool {
        true
    }
}

/// Name of the page parameter in every list URL.
pub const PAGE_KEY: &str = "page";

/// Page and filter of a list view, derived from the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQueryState<F> {
    /// 1-based.
    pub page: u32,
    pub filter: F,
}

impl<F: ListFilter> Default for ListQueryState<F> {
    fn default() -> Self {
        Self {
            page: 1,
            filter: F::default(),
        }
    }
}

impl<F: ListFilter> ListQueryState<F> {
    /// Page 0 is treated as page 1.
    pub fn new(page: u32, filter: F) -> Self {
        Self {
            page: page.max(1),
            filter,
        }
    }

    /// Reads the state from a query string. Missing or malformed values
    /// fall back to page 1 and no filter.
    pub fn from_query(query: &QueryString) -> Self {
        Self {
            page: parse_page(query.get(PAGE_KEY)),
            filter: F::from_query(query),
        }
    }

    /// The query string that [`from_query`](Self::from_query) reads back as `self`.
    pub fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        self.write_query(&mut query);
        query
    }

    /// Writes page and filter into an existing query string, leaving
    /// unrelated parameters in place.
    pub fn write_query(&self, query: &mut QueryString) {
        query.set(PAGE_KEY, self.page.to_string());
        for key in F::KEYS {
            query.remove(key);
        }
        self.filter.write_query(query);
    }
}

/// `page` as a positive integer; anything else is page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DifficultyFilter, NoFilter};
    use codelearn_api::types::Difficulty;

    #[test]
    fn parse_and_display_round_trip() {
        let query = QueryString::parse("?q=two+sum&type=practice&page=2");
        assert_eq!(query.get("q"), Some("two sum"));
        assert_eq!(query.to_string(), "q=two+sum&type=practice&page=2");
    }

    #[test]
    fn set_replaces_in_place_and_dedups() {
        let mut query = QueryString::parse("page=2&page=5&difficulty=easy");
        query.set("page", "1");
        assert_eq!(query.to_string(), "page=1&difficulty=easy");
        query.set("sort", "new");
        assert_eq!(query.to_string(), "page=1&difficulty=easy&sort=new");
    }

    #[test]
    fn malformed_page_defaults_to_one() {
        for raw in ["page=abc", "page=0", "page=-3", "page=", "page=2.5", ""] {
            let state = ListQueryState::<NoFilter>::from_query(&QueryString::parse(raw));
            assert_eq!(state.page, 1, "input {raw:?}");
        }
    }

    #[test]
    fn empty_query_is_page_one_without_filter() {
        let state = ListQueryState::<DifficultyFilter>::from_query(&QueryString::new());
        assert_eq!(state, ListQueryState::default());
        assert_eq!(state.filter, DifficultyFilter(None));
    }

    #[test]
    fn round_trip_for_valid_states() {
        let mut filters = vec![DifficultyFilter(None)];
        filters.extend(Difficulty::ALL.map(|d| DifficultyFilter(Some(d))));
        for page in [1, 2, 3, 17, u32::MAX] {
            for filter in &filters {
                let state = ListQueryState::new(page, filter.clone());
                let parsed = ListQueryState::from_query(&QueryString::parse(
                    &state.to_query().to_string(),
                ));
                assert_eq!(parsed, state);
            }
        }
    }

    #[test]
    fn write_query_keeps_unrelated_params() {
        let mut query = QueryString::parse("difficulty=easy&page=3&tab=all");
        ListQueryState::new(1, DifficultyFilter(Some(Difficulty::Hard))).write_query(&mut query);
        assert_eq!(query.to_string(), "page=1&tab=all&difficulty=hard");
    }
}
