//! HTTP client for the CodeLearn REST API.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{ClassQuery, ContestQuery, CourseQuery, ProblemQuery, Query},
    types::{
        ApiResponse, ClassRoom, Contest, Course, LoginData, LoginRequest, LogoutRequest, PageData,
        Problem, UserProfile,
    },
    Error, Session,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the CodeLearn REST API.
///
/// Every response is a `{ code, message, data }` envelope; a `code` other
/// than 200 is turned into [`Error::Application`] carrying the server's
/// message. The bearer token comes from the injected [`Session`], which is
/// cleared whenever the server answers 401.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    session: Session,
}

impl Client {
    /// Creates a client for the default local backend with an anonymous session.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for deployments and wiremock tests.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("codelearn/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            session: Session::new(),
        })
    }

    /// Replaces the session this client reads its token from.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Sends the request and unwraps the envelope, keeping `data` optional.
    async fn send_envelope<T>(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let resp = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Session rejected by server, clearing token");
            self.session.clear();
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            // Error responses usually still carry an envelope with a readable message.
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
                if !envelope.message.trim().is_empty() {
                    return Err(Error::Application {
                        code: envelope.code,
                        message: envelope.message,
                    });
                }
            }
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<ApiResponse<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        if parsed.code != 200 {
            tracing::error!(
                "Request failed with application code {}: {}",
                parsed.code,
                parsed.message
            );
            return Err(Error::Application {
                code: parsed.code,
                message: parsed.message,
            });
        }

        Ok(parsed)
    }

    async fn send<T>(&self, request: reqwest::RequestBuilder) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.send_envelope::<T>(request)
            .await?
            .data
            .ok_or(Error::MissingData)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.send(self.http.get(url)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.get_url(path, None::<&CourseQuery>)?;
        self.send_envelope(self.http.post(url).json(body)).await
    }

    /// The full request URL for a list query, as [`get_page`](Self::get_page) would send it.
    pub fn page_url<Q: Query>(&self, query: &Q) -> Result<Url, Error> {
        self.get_url(query.endpoint(), Some(query))
    }

    /// Fetches one page from whichever list endpoint the query targets.
    pub async fn get_page<T, Q>(&self, query: &Q) -> Result<PageData<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        self.get::<PageData<T>, Q>(query.endpoint(), Some(query))
            .await
    }

    /// Fetches a page of courses matching the given query.
    pub async fn get_courses(&self, query: &CourseQuery) -> Result<PageData<Course>, Error> {
        self.get_page(query).await
    }

    /// Fetches a page of contests matching the given query.
    pub async fn get_contests(&self, query: &ContestQuery) -> Result<PageData<Contest>, Error> {
        self.get_page(query).await
    }

    /// Fetches a page of practice problems matching the given query.
    pub async fn get_problems(&self, query: &ProblemQuery) -> Result<PageData<Problem>, Error> {
        self.get_page(query).await
    }

    /// Fetches a page of classes. Joined-class queries need a signed-in session.
    pub async fn get_classes(&self, query: &ClassQuery) -> Result<PageData<ClassRoom>, Error> {
        self.get_page(query).await
    }

    /// Fetches the signed-in user's profile.
    pub async fn get_my_info(&self) -> Result<UserProfile, Error> {
        self.get::<UserProfile, CourseQuery>("/users/my-info", None)
            .await
    }

    /// Exchanges credentials for a token and stores it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let data = self
            .post::<LoginRequest, LoginData>("/auth/login", &body)
            .await?
            .data
            .ok_or(Error::MissingData)?;
        self.session.set_token(data.token.clone());
        Ok(data.token)
    }

    /// Invalidates the token on the server. The local token is cleared even
    /// when the server call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let Some(token) = self.session.token() else {
            return Ok(());
        };
        let result = self
            .post::<LogoutRequest, serde_json::Value>("/auth/logout", &LogoutRequest { token })
            .await;
        self.session.clear();
        result.map(|_| ())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("http://localhost:8080/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn page_url_targets_the_query_endpoint() {
        let client = Client::with_base_url("http://localhost:8080/api/v1").unwrap();
        let query = ClassQuery::default().joined().with_page(2);
        assert_eq!(
            client.page_url(&query).unwrap().as_str(),
            "http://localhost:8080/api/v1/class/joined?page=2"
        );
    }
}
