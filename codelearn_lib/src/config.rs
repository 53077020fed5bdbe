//! Environment-driven configuration for the client and the list views.
//!
//! Every setting has a default; the CLI loads `.env` before reading these.

use std::time::Duration;

use rand::Rng;

/// Connection, cache and retry settings for [`CachedClient`](crate::CachedClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// `CODELEARN_API_URL`. `None` uses the client's built-in default.
    pub api_url: Option<String>,
    /// `CODELEARN_TOKEN`, a pre-issued bearer token.
    pub token: Option<String>,
    /// `CODELEARN_CACHE_TTL_SECS`. Zero disables response caching.
    pub cache_ttl: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            cache_ttl: Duration::from_secs(60),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env_string("CODELEARN_API_URL"),
            token: env_string("CODELEARN_TOKEN"),
            cache_ttl: Duration::from_secs(env_u64("CODELEARN_CACHE_TTL_SECS", 60)),
            retry: RetryConfig::from_env(),
        }
    }
}

/// Bounded exponential backoff for retryable request failures.
///
/// List views show failures inline rather than retrying, so the default
/// is zero retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("CODELEARN_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("CODELEARN_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("CODELEARN_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based), with +/-20% jitter.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// The list views of the platform. Each has its own page size and
/// fallback error text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    Courses,
    Contests,
    Practice,
    Classes,
    Search,
}

impl ListKind {
    pub fn default_page_size(self) -> u32 {
        match self {
            ListKind::Courses => 9,
            ListKind::Contests => 5,
            ListKind::Practice => 6,
            ListKind::Classes => 6,
            ListKind::Search => 6,
        }
    }

    fn env_key(self) -> &'static str {
        match self {
            ListKind::Courses => "CODELEARN_PAGE_SIZE_COURSES",
            ListKind::Contests => "CODELEARN_PAGE_SIZE_CONTESTS",
            ListKind::Practice => "CODELEARN_PAGE_SIZE_PRACTICE",
            ListKind::Classes => "CODELEARN_PAGE_SIZE_CLASSES",
            ListKind::Search => "CODELEARN_PAGE_SIZE_SEARCH",
        }
    }

    /// Shown when a fetch fails without a usable server message.
    pub fn fallback_message(self) -> &'static str {
        match self {
            ListKind::Courses => "Could not load the course list.",
            ListKind::Contests => "Could not load the contest list.",
            ListKind::Practice => "Could not load the practice problems.",
            ListKind::Classes => "Could not load the class list.",
            ListKind::Search => "Search failed.",
        }
    }

    /// Shown for a successful fetch with no items.
    pub fn empty_message(self) -> &'static str {
        match self {
            ListKind::Courses => "No courses yet.",
            ListKind::Contests => "No contests yet.",
            ListKind::Practice => "No practice problems yet.",
            ListKind::Classes => "No classes yet.",
            ListKind::Search => "No results.",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ListKind::Courses => "courses",
                ListKind::Contests => "contests",
                ListKind::Practice => "practice",
                ListKind::Classes => "classes",
                ListKind::Search => "search",
            }
        )
    }
}

impl std::str::FromStr for ListKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "courses" => Ok(ListKind::Courses),
            "contests" => Ok(ListKind::Contests),
            "practice" => Ok(ListKind::Practice),
            "classes" => Ok(ListKind::Classes),
            "search" => Ok(ListKind::Search),
            _ => Err(()),
        }
    }
}

/// Per-list settings handed to a [`ListController`](crate::ListController).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub kind: ListKind,
    /// Always at least 1.
    pub page_size: u32,
}

impl ListConfig {
    pub fn new(kind: ListKind, page_size: u32) -> Self {
        Self {
            kind,
            page_size: page_size.max(1),
        }
    }

    /// The kind's default page size, overridden by `CODELEARN_PAGE_SIZE_<KIND>`.
    pub fn from_env(kind: ListKind) -> Self {
        let size = env_u64(kind.env_key(), u64::from(kind.default_page_size()));
        Self::new(kind, u32::try_from(size).unwrap_or(kind.default_page_size()))
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(ListConfig::new(ListKind::Courses, 0).page_size, 1);
    }

    #[test]
    fn default_page_sizes_differ_per_list() {
        assert_eq!(ListKind::Courses.default_page_size(), 9);
        assert_eq!(ListKind::Contests.default_page_size(), 5);
        assert_eq!(ListKind::Practice.default_page_size(), 6);
    }

    #[test]
    fn list_kind_names_round_trip() {
        for kind in [
            ListKind::Courses,
            ListKind::Contests,
            ListKind::Practice,
            ListKind::Classes,
            ListKind::Search,
        ] {
            assert_eq!(kind.to_string().parse::<ListKind>(), Ok(kind));
        }
    }

    #[test]
    fn retry_delay_is_capped() {
        let cfg = RetryConfig {
            max_retries: 5,
            base_delay_ms: 1000,
            max_delay_ms: 2000,
        };
        // 1000 * 2^9 would be far above the cap; jitter stays within 20%.
        assert!(cfg.delay_for_attempt(10) <= Duration::from_millis(2400));
        assert!(cfg.delay_for_attempt(1) >= Duration::from_millis(800));
    }
}
