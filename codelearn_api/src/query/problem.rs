use url::Url;

use crate::types::Difficulty;

use super::{common::QueryCommon, Query};

/// Query for the practice problem lists. The difficulty filter applies to
/// both the catalog and the search endpoint.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ProblemQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl Query for ProblemQuery {
    fn endpoint(&self) -> &'static str {
        match self.search {
            Some(_) => "/problems/search",
            None => "/problems/get-all",
        }
    }
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("title", search.as_str());
        };
        let mut url = self.common.add_to_url(&url);
        if let Some(difficulty) = self.difficulty {
            url.query_pairs_mut()
                .append_pair("difficulty", difficulty.to_string().as_str());
        }
        url
    }
}

impl ProblemQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{
        query::{ProblemQuery, Query},
        types::Difficulty,
    };

    #[test]
    fn test_problem_query() {
        let url = Url::parse("https://example.com").unwrap();
        let q = ProblemQuery::default()
            .with_page(1)
            .with_page_size(6)
            .with_difficulty(Difficulty::Hard);
        assert_eq!(
            q.add_to_url(&url).query(),
            Some("page=1&pageSize=6&difficulty=hard")
        );
    }
}
