use url::Url;

use super::{common::QueryCommon, Query};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ContestQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
}

impl Query for ContestQuery {
    fn endpoint(&self) -> &'static str {
        match self.search {
            Some(_) => "/contest/search",
            None => "/contest/get-all",
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
        self.common.add_to_url(&url)
    }
}

impl ContestQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}
