//! [`PageSource`] implementations for each list view, backed by [`CachedClient`].

use std::sync::Arc;

use chrono::Utc;
use codelearn_api::{ClassQuery, ContestQuery, CourseQuery, ProblemQuery, Query};

use crate::cards::{ClassCard, ContestCard, CourseCard, PracticeCard, SearchHit};
use crate::client::CachedClient;
use crate::controller::{PageRequest, PageSource};
use crate::envelope::PageEnvelope;
use crate::error::CodeLearnError;
use crate::filters::{DifficultyFilter, MembershipFilter, NoFilter, SearchFilter, SearchKind};

fn paged<Q: Query, F>(query: Q, request: &PageRequest<F>) -> Q {
    query
        .with_page(i64::from(request.page))
        .with_page_size(i64::from(request.page_size))
}

pub struct CourseSource {
    client: Arc<CachedClient>,
}

impl CourseSource {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }
}

impl PageSource for CourseSource {
    type Filter = NoFilter;
    type Item = CourseCard;

    async fn fetch_page(
        &self,
        request: &PageRequest<NoFilter>,
    ) -> Result<PageEnvelope<CourseCard>, CodeLearnError> {
        let query = paged(CourseQuery::default(), request);
        let page = self.client.get_courses(&query).await?;
        Ok(PageEnvelope::from_wire(page, request.page_size).map_items(CourseCard::from))
    }
}

pub struct ContestSource {
    client: Arc<CachedClient>,
}

impl ContestSource {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }
}

impl PageSource for ContestSource {
    type Filter = NoFilter;
    type Item = ContestCard;

    async fn fetch_page(
        &self,
        request: &PageRequest<NoFilter>,
    ) -> Result<PageEnvelope<ContestCard>, CodeLearnError> {
        let query = paged(ContestQuery::default(), request);
        let page = self.client.get_contests(&query).await?;
        let now = Utc::now();
        Ok(PageEnvelope::from_wire(page, request.page_size)
            .map_items(|contest| ContestCard::from_contest(contest, now)))
    }
}

pub struct PracticeSource {
    client: Arc<CachedClient>,
}

impl PracticeSource {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }
}

impl PageSource for PracticeSource {
    type Filter = DifficultyFilter;
    type Item = PracticeCard;

    async fn fetch_page(
        &self,
        request: &PageRequest<DifficultyFilter>,
    ) -> Result<PageEnvelope<PracticeCard>, CodeLearnError> {
        let mut query = paged(ProblemQuery::default(), request);
        if let Some(difficulty) = request.filter.0 {
            query = query.with_difficulty(difficulty);
        }
        let page = self.client.get_problems(&query).await?;
        Ok(PageEnvelope::from_wire(page, request.page_size).map_items(PracticeCard::from))
    }
}

pub struct ClassSource {
    client: Arc<CachedClient>,
}

impl ClassSource {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }
}

impl PageSource for ClassSource {
    type Filter = MembershipFilter;
    type Item = ClassCard;

    async fn fetch_page(
        &self,
        request: &PageRequest<MembershipFilter>,
    ) -> Result<PageEnvelope<ClassCard>, CodeLearnError> {
        let mut query = paged(ClassQuery::default(), request);
        if request.filter == MembershipFilter::Joined {
            query = query.joined();
        }
        let page = self.client.get_classes(&query).await?;
        Ok(PageEnvelope::from_wire(page, request.page_size).map_items(ClassCard::from))
    }
}

/// Searches one catalog by title. The catalog comes from the filter's kind.
pub struct SearchSource {
    client: Arc<CachedClient>,
}

impl SearchSource {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }
}

impl PageSource for SearchSource {
    type Filter = SearchFilter;
    type Item = SearchHit;

    async fn fetch_page(
        &self,
        request: &PageRequest<SearchFilter>,
    ) -> Result<PageEnvelope<SearchHit>, CodeLearnError> {
        let Some(keyword) = request.filter.keyword.as_deref() else {
            return Err(CodeLearnError::InvalidInput(
                "Enter a keyword to search.".to_string(),
            ));
        };
        let page_size = request.page_size;
        let envelope = match request.filter.kind {
            SearchKind::Course => {
                let query = paged(CourseQuery::default().with_search(keyword), request);
                PageEnvelope::from_wire(self.client.get_courses(&query).await?, page_size)
                    .map_items(|c| SearchHit::Course(c.into()))
            }
            SearchKind::Practice => {
                let query = paged(ProblemQuery::default().with_search(keyword), request);
                PageEnvelope::from_wire(self.client.get_problems(&query).await?, page_size)
                    .map_items(|p| SearchHit::Practice(p.into()))
            }
            SearchKind::Contest => {
                let query = paged(ContestQuery::default().with_search(keyword), request);
                let now = Utc::now();
                PageEnvelope::from_wire(self.client.get_contests(&query).await?, page_size)
                    .map_items(|c| SearchHit::Contest(ContestCard::from_contest(c, now)))
            }
            SearchKind::Class => {
                let query = paged(ClassQuery::default().with_search(keyword), request);
                PageEnvelope::from_wire(self.client.get_classes(&query).await?, page_size)
                    .map_items(|c| SearchHit::Class(c.into()))
            }
        };
        Ok(envelope)
    }
}
