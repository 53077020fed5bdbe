//! Library layer for CodeLearn: cached API client and URL-driven list views.
//!
//! Wraps the `codelearn_api` crate with an in-memory TTL cache and bounded
//! retry, and provides the list controller that keeps a paginated, filtered
//! view in sync with its URL query string.

pub mod cache;
pub mod cards;
pub mod client;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod location;
pub mod query_state;
pub mod sources;
pub mod validation;

pub use codelearn_api;
pub use codelearn_api::types;
pub use codelearn_api::Session;

pub use cards::{ClassCard, ContestCard, ContestStatus, CourseCard, PracticeCard, SearchHit};
pub use client::CachedClient;
pub use config::{ClientConfig, ListConfig, ListKind, RetryConfig};
pub use controller::{
    FetchLifecycle, ListController, ListError, ListSnapshot, ListView, MountedList, PageRequest,
    PageSource,
};
pub use envelope::{PageEnvelope, Pagination};
pub use error::CodeLearnError;
pub use filters::{DifficultyFilter, MembershipFilter, NoFilter, SearchFilter, SearchKind};
pub use location::{Location, MemoryLocation};
pub use query_state::{ListFilter, ListQueryState, QueryString};
pub use sources::{ClassSource, ContestSource, CourseSource, PracticeSource, SearchSource};
