use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the class lists. `joined` switches to the signed-in user's
/// enrolled classes and takes precedence over `search`.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ClassQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
    pub joined: bool,
}

impl Query for ClassQuery {
    fn endpoint(&self) -> &'static str {
        if self.joined {
            return "/class/joined";
        }
        match self.search {
            Some(_) => "/class/search",
            None => "/class/get-all",
        }
    }
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let (Some(search), false) = (&self.search, self.joined) {
            url.query_pairs_mut().append_pair("title", search.as_str());
        };
        self.common.add_to_url(&url)
    }
}

impl ClassQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn joined(mut self) -> Self {
        self.joined = true;
        self
    }
}
