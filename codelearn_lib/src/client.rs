//! Caching and retrying wrapper around the API client.

use codelearn_api::types::{ClassRoom, Contest, Course, PageData, Problem, UserProfile};
use codelearn_api::{ClassQuery, Client, ContestQuery, CourseQuery, ProblemQuery, Query, Session};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::MemoryCache;
use crate::config::{ClientConfig, RetryConfig};
use crate::error::CodeLearnError;

/// API client wrapper that adds an in-memory page cache and bounded retry.
///
/// Pages are cached under their full request URL, so two list views asking
/// for the same page and filter share one entry. The signed-in user's
/// joined classes are never cached.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    retry: RetryConfig,
}

impl CachedClient {
    pub fn new(inner: Client, cache: MemoryCache, retry: RetryConfig) -> Self {
        Self {
            inner,
            cache,
            retry,
        }
    }

    /// Builds the client described by `config`, seeding the session with
    /// its token if one is set.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CodeLearnError> {
        let inner = match &config.api_url {
            Some(url) => Client::with_base_url(url)?,
            None => Client::new()?,
        };
        if let Some(token) = &config.token {
            inner.session().set_token(token.clone());
        }
        Ok(Self::new(
            inner,
            MemoryCache::new(config.cache_ttl),
            config.retry,
        ))
    }

    /// Creates a cached client with a custom base URL and no retries. Used for testing.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Result<Self, CodeLearnError> {
        Ok(Self::new(
            Client::with_base_url(base_url)?,
            cache,
            RetryConfig::default(),
        ))
    }

    pub fn session(&self) -> &Session {
        self.inner.session()
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, CodeLearnError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CodeLearnError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn fetch_page<T, Q>(&self, label: &str, query: &Q) -> Result<PageData<T>, CodeLearnError>
    where
        T: DeserializeOwned + Serialize,
        Q: Query,
    {
        self.with_retry(label, || async { Ok(self.inner.get_page::<T, Q>(query).await?) })
            .await
    }

    async fn get_page_cached<T, Q>(
        &self,
        label: &str,
        query: &Q,
    ) -> Result<PageData<T>, CodeLearnError>
    where
        T: DeserializeOwned + Serialize,
        Q: Query,
    {
        let cache_key = self.inner.page_url(query)?.to_string();

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("{} served from cache: {}", label, cache_key);
            let page: PageData<T> = serde_json::from_str(&cached)?;
            return Ok(page);
        }

        let page = self.fetch_page(label, query).await?;
        if let Ok(json) = serde_json::to_string(&page) {
            self.cache.set(cache_key, json);
        }
        Ok(page)
    }

    /// Fetches courses, returning cached results when available.
    pub async fn get_courses(&self, query: &CourseQuery) -> Result<PageData<Course>, CodeLearnError> {
        self.get_page_cached("courses", query).await
    }

    /// Fetches contests, returning cached results when available.
    pub async fn get_contests(
        &self,
        query: &ContestQuery,
    ) -> Result<PageData<Contest>, CodeLearnError> {
        self.get_page_cached("contests", query).await
    }

    /// Fetches practice problems, returning cached results when available.
    pub async fn get_problems(
        &self,
        query: &ProblemQuery,
    ) -> Result<PageData<Problem>, CodeLearnError> {
        self.get_page_cached("problems", query).await
    }

    /// Fetches classes. Joined-class pages depend on the session and always
    /// go to the server.
    pub async fn get_classes(
        &self,
        query: &ClassQuery,
    ) -> Result<PageData<ClassRoom>, CodeLearnError> {
        if query.joined {
            return self.fetch_page("joined classes", query).await;
        }
        self.get_page_cached("classes", query).await
    }

    pub async fn get_my_info(&self) -> Result<UserProfile, CodeLearnError> {
        self.with_retry("my-info", || async { Ok(self.inner.get_my_info().await?) })
            .await
    }

    /// Signs in and stores the token in the shared session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, CodeLearnError> {
        Ok(self.inner.login(username, password).await?)
    }

    /// Signs out. The local token is gone afterwards whatever the server says.
    pub async fn logout(&self) -> Result<(), CodeLearnError> {
        Ok(self.inner.logout().await?)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn is_retryable(err: &CodeLearnError) -> bool {
    match err {
        CodeLearnError::Api(api_err) => match api_err {
            codelearn_api::Error::RequestFailed => true,
            codelearn_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            codelearn_api::Error::Unauthorized
            | codelearn_api::Error::Application { .. }
            | codelearn_api::Error::MissingData => false,
        },
        _ => false,
    }
}
