//! Paginated, filtered list controller.
//!
//! Data flows one way: the [`Location`] holds the query string, the
//! controller derives a [`ListQueryState`] from it, fetches that page from
//! a [`PageSource`], and publishes a [`ListSnapshot`]. Page and filter
//! controls write to the location, never to the snapshot.
//!
//! Every fetch is stamped with a generation number taken under the
//! snapshot lock. A result is applied only if no newer fetch has started
//! since and the list is still mounted, so a slow response for an old page
//! can never replace the page the user navigated to.

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::ListConfig;
use crate::envelope::{PageEnvelope, Pagination};
use crate::error::CodeLearnError;
use crate::location::Location;
use crate::query_state::{ListFilter, ListQueryState, PAGE_KEY};

/// What a list asks its source for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub page: u32,
    pub page_size: u32,
    pub filter: F,
}

/// A backend that serves one kind of list.
pub trait PageSource: Send + Sync + 'static {
    type Filter: ListFilter;
    type Item: Clone + Send + Sync + 'static;

    fn fetch_page(
        &self,
        request: &PageRequest<Self::Filter>,
    ) -> impl Future<Output = Result<PageEnvelope<Self::Item>, CodeLearnError>> + Send;
}

/// Where a list is in its fetch cycle.
#[derive(Clone, Debug)]
pub enum FetchLifecycle<T> {
    Idle,
    Loading,
    Success(Arc<PageEnvelope<T>>),
    /// The message to show inline.
    Failure(String),
}

/// Rendering decision for a list view.
#[derive(Clone, Debug)]
pub enum ListView<T> {
    /// Nothing requested yet (or a search without keyword).
    Idle,
    /// Show this many placeholder cards.
    Loading { placeholders: u32 },
    Failed(String),
    /// A successful fetch that returned no items.
    Empty,
    Page(Arc<PageEnvelope<T>>),
}

/// The published state of a list.
#[derive(Clone, Debug)]
pub struct ListSnapshot<F, T> {
    /// Query the current lifecycle belongs to. `None` until the first sync.
    pub query: Option<ListQueryState<F>>,
    pub lifecycle: FetchLifecycle<T>,
    /// Metadata of the last successful fetch for the current filter. Kept
    /// through page loads and failures, cleared when the filter changes.
    pub pagination: Option<Pagination>,
    generation: u64,
    live: bool,
}

impl<F: ListFilter, T: Clone> ListSnapshot<F, T> {
    fn initial() -> Self {
        Self {
            query: None,
            lifecycle: FetchLifecycle::Idle,
            pagination: None,
            generation: 0,
            live: true,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, FetchLifecycle::Loading)
    }

    /// Whether this snapshot is the finished result for `query`.
    pub fn is_settled_for(&self, query: &ListQueryState<F>) -> bool {
        self.query.as_ref() == Some(query) && !self.is_loading()
    }

    pub fn view(&self, page_size: u32) -> ListView<T> {
        match &self.lifecycle {
            FetchLifecycle::Idle => ListView::Idle,
            FetchLifecycle::Loading => ListView::Loading {
                placeholders: page_size,
            },
            FetchLifecycle::Failure(message) => ListView::Failed(message.clone()),
            FetchLifecycle::Success(envelope) if envelope.is_empty() => ListView::Empty,
            FetchLifecycle::Success(envelope) => ListView::Page(Arc::clone(envelope)),
        }
    }
}

/// Rejected page navigation. The URL is left untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("page {page} is outside 1..={total_pages}")]
    PageOutOfRange { page: u32, total_pages: u32 },
    #[error("no page has loaded yet")]
    PaginationUnknown,
}

struct Ticket<F> {
    generation: u64,
    query: ListQueryState<F>,
}

/// Keeps one list view consistent with the query in its [`Location`].
pub struct ListController<S: PageSource> {
    source: S,
    location: Arc<dyn Location>,
    config: ListConfig,
    state: watch::Sender<ListSnapshot<S::Filter, S::Item>>,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, location: Arc<dyn Location>, config: ListConfig) -> Self {
        let (state, _rx) = watch::channel(ListSnapshot::initial());
        Self {
            source,
            location,
            config,
            state,
        }
    }

    pub fn config(&self) -> ListConfig {
        self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn location(&self) -> &Arc<dyn Location> {
        &self.location
    }

    /// The page and filter the URL currently asks for.
    pub fn query_state(&self) -> ListQueryState<S::Filter> {
        ListQueryState::from_query(&self.location.query())
    }

    pub fn snapshot(&self) -> ListSnapshot<S::Filter, S::Item> {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> ListView<S::Item> {
        self.state.borrow().view(self.config.page_size)
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<S::Filter, S::Item>> {
        self.state.subscribe()
    }

    pub fn is_live(&self) -> bool {
        self.state.borrow().live
    }

    /// Starts a fetch cycle for `query`.
    fn begin(&self, query: ListQueryState<S::Filter>) -> Option<Ticket<S::Filter>> {
        let mut ticket = None;
        self.state.send_if_modified(|snapshot| {
            if !snapshot.live {
                return false;
            }
            let same_filter = snapshot
                .query
                .as_ref()
                .is_some_and(|previous| previous.filter == query.filter);
            if !same_filter {
                snapshot.pagination = None;
            }
            snapshot.generation += 1;
            snapshot.query = Some(query.clone());
            if query.filter.is_fetchable() {
                snapshot.lifecycle = FetchLifecycle::Loading;
                ticket = Some(Ticket {
                    generation: snapshot.generation,
                    query,
                });
            } else {
                snapshot.lifecycle = FetchLifecycle::Idle;
            }
            true
        });
        ticket
    }

    async fn finish(&self, ticket: Ticket<S::Filter>) {
        let request = PageRequest {
            page: ticket.query.page,
            page_size: self.config.page_size,
            filter: ticket.query.filter,
        };
        tracing::debug!(
            "fetching {} page {} (generation {})",
            self.config.kind,
            request.page,
            ticket.generation
        );
        let result = self.source.fetch_page(&request).await;
        self.settle(ticket.generation, result);
    }

    fn settle(
        &self,
        generation: u64,
        result: Result<PageEnvelope<S::Item>, CodeLearnError>,
    ) {
        let kind = self.config.kind;
        self.state.send_if_modified(|snapshot| {
            if !snapshot.live {
                tracing::debug!("dropping {} result that arrived after unmount", kind);
                return false;
            }
            if snapshot.generation != generation {
                tracing::debug!(
                    "discarding stale {} result (generation {}, current {})",
                    kind,
                    generation,
                    snapshot.generation
                );
                return false;
            }
            match result {
                Ok(envelope) => {
                    snapshot.pagination = Some(envelope.pagination());
                    snapshot.lifecycle = FetchLifecycle::Success(Arc::new(envelope));
                }
                Err(err) => {
                    tracing::warn!("Failed to load {}: {}", kind, err);
                    snapshot.lifecycle =
                        FetchLifecycle::Failure(err.user_message(kind.fallback_message()));
                }
            }
            true
        });
    }

    /// Fetches the page the URL asks for and applies the result, unless a
    /// newer sync or an unmount overtakes it.
    pub async fn sync(&self) {
        if let Some(ticket) = self.begin(self.query_state()) {
            self.finish(ticket).await;
        }
    }

    /// Points the URL at `page` and requests a scroll to the top.
    ///
    /// Pages outside `1..=total_pages` of the last successful fetch are
    /// rejected. Until a fetch for the filter in the URL has succeeded, every
    /// page is rejected.
    pub fn change_page(&self, page: u32) -> Result<(), ListError> {
        let current = self.query_state();
        let pagination = {
            let snapshot = self.state.borrow();
            let same_filter = snapshot
                .query
                .as_ref()
                .is_some_and(|loaded| loaded.filter == current.filter);
            if !same_filter {
                return Err(ListError::PaginationUnknown);
            }
            snapshot.pagination.ok_or(ListError::PaginationUnknown)?
        };
        if !pagination.contains(page) {
            return Err(ListError::PageOutOfRange {
                page,
                total_pages: pagination.total_pages,
            });
        }
        let mut query = self.location.query();
        query.set(PAGE_KEY, page.to_string());
        self.location.replace_query(query);
        self.location.scroll_to_top();
        Ok(())
    }

    pub fn next_page(&self) -> Result<(), ListError> {
        self.change_page(self.query_state().page.saturating_add(1))
    }

    pub fn previous_page(&self) -> Result<(), ListError> {
        self.change_page(self.query_state().page.saturating_sub(1))
    }

    /// Writes `filter` to the URL and resets the page to 1 in the same update.
    pub fn change_filter(&self, filter: S::Filter) {
        let mut query = self.location.query();
        ListQueryState::new(1, filter).write_query(&mut query);
        self.location.replace_query(query);
    }

    /// Stops applying results. Fetches still in flight complete but are dropped.
    pub fn teardown(&self) {
        self.state.send_if_modified(|snapshot| {
            if !snapshot.live {
                return false;
            }
            snapshot.live = false;
            snapshot.generation += 1;
            true
        });
    }

    /// Waits until the snapshot is the finished result for the current URL.
    ///
    /// Only a mounted list (or a concurrent [`sync`](Self::sync)) makes
    /// progress; returns immediately once the list has been torn down.
    pub async fn settled(&self) -> ListSnapshot<S::Filter, S::Item> {
        let mut rx = self.state.subscribe();
        loop {
            {
                let expected = self.query_state();
                let snapshot = rx.borrow_and_update();
                if !snapshot.live || snapshot.is_settled_for(&expected) {
                    return snapshot.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    /// Starts following the location: fetches now and again whenever the
    /// derived query state changes. Dropping the returned handle unmounts.
    pub fn mount(self: Arc<Self>) -> MountedList<S> {
        let mut changes = self.location.subscribe();
        let controller = Arc::clone(&self);
        let watcher = tokio::spawn(async move {
            let mut last: Option<ListQueryState<S::Filter>> = None;
            loop {
                let query = ListQueryState::<S::Filter>::from_query(&changes.borrow_and_update());
                if last.as_ref() != Some(&query) {
                    last = Some(query.clone());
                    if let Some(ticket) = controller.begin(query) {
                        let fetcher = Arc::clone(&controller);
                        tokio::spawn(async move { fetcher.finish(ticket).await });
                    }
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
        });
        MountedList {
            controller: self,
            watcher,
        }
    }
}

/// A list that is following its location. Unmounts on drop.
pub struct MountedList<S: PageSource> {
    controller: Arc<ListController<S>>,
    watcher: JoinHandle<()>,
}

impl<S: PageSource> MountedList<S> {
    pub fn controller(&self) -> &Arc<ListController<S>> {
        &self.controller
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl<S: PageSource> Deref for MountedList<S> {
    type Target = ListController<S>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

impl<S: PageSource> Drop for MountedList<S> {
    fn drop(&mut self) {
        self.watcher.abort();
        self.controller.teardown();
    }
}
