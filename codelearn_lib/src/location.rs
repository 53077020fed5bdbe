//! The URL query store a list view reads from and writes to.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use crate::query_state::QueryString;

/// Where a list's page and filter live.
///
/// In a browser this is the address bar; [`MemoryLocation`] keeps it in
/// process. Writers only ever replace the whole query, and subscribers
/// see every change that actually alters it.
pub trait Location: Send + Sync {
    fn query(&self) -> QueryString;

    /// Replaces the query. A query equal to the current one is not a change.
    fn replace_query(&self, query: QueryString);

    fn subscribe(&self) -> watch::Receiver<QueryString>;

    /// Asks the view to scroll back to the top after navigating.
    fn scroll_to_top(&self);
}

/// In-process [`Location`] backed by a `watch` channel.
pub struct MemoryLocation {
    query: watch::Sender<QueryString>,
    scroll_requests: AtomicUsize,
}

impl MemoryLocation {
    pub fn new(query: QueryString) -> Self {
        let (tx, _rx) = watch::channel(query);
        Self {
            query: tx,
            scroll_requests: AtomicUsize::new(0),
        }
    }

    /// A location opened from a deep link such as `?page=3&difficulty=hard`.
    pub fn from_query_str(raw: &str) -> Self {
        Self::new(QueryString::parse(raw))
    }

    /// How many times a scroll to the top was requested.
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests.load(Ordering::SeqCst)
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(QueryString::new())
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> QueryString {
        self.query.borrow().clone()
    }

    fn replace_query(&self, query: QueryString) {
        let changed = self.query.send_if_modified(|current| {
            if *current == query {
                return false;
            }
            *current = query;
            true
        });
        if changed {
            let current = self.query.borrow();
            tracing::debug!("location changed to ?{}", *current);
        }
    }

    fn subscribe(&self) -> watch::Receiver<QueryString> {
        self.query.subscribe()
    }

    fn scroll_to_top(&self) {
        self.scroll_requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_only_real_changes() {
        let location = MemoryLocation::from_query_str("page=1");
        let mut rx = location.subscribe();

        location.replace_query(QueryString::parse("page=1"));
        assert!(!rx.has_changed().unwrap());

        location.replace_query(QueryString::parse("page=2"));
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().get("page"), Some("2"));
        assert_eq!(location.query().to_string(), "page=2");
    }

    #[test]
    fn scroll_requests_are_counted() {
        let location = MemoryLocation::default();
        location.scroll_to_top();
        location.scroll_to_top();
        assert_eq!(location.scroll_requests(), 2);
    }
}
