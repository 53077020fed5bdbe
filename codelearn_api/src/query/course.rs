use url::Url;

use super::{common::QueryCommon, Query};

/// Query for `/course/get-all`, or `/course/search` once a search title is set.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct CourseQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
}

impl Query for CourseQuery {
    fn endpoint(&self) -> &'static str {
        match self.search {
            Some(_) => "/course/search",
            None => "/course/get-all",
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

impl CourseQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{CourseQuery, Query};

    #[test]
    fn test_course_query() {
        let url = Url::parse("https://example.com/api").unwrap();

        let q = CourseQuery::default().with_page(2).with_page_size(9);
        assert_eq!(q.endpoint(), "/course/get-all");
        assert_eq!(
            q.add_to_url(&url).to_string(),
            "https://example.com/api?page=2&pageSize=9"
        );

        let q = CourseQuery::default().with_search("rust basics");
        assert_eq!(q.endpoint(), "/course/search");
        assert_eq!(
            q.add_to_url(&url).to_string(),
            "https://example.com/api?title=rust+basics&page=1"
        );
    }
}
