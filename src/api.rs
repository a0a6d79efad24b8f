//! Remote service contract: wire types, the [`RemoteService`] trait, and the
//! `reqwest`-backed [`HttpService`].
//!
//! The three endpoints are the chat send (`POST`, JSON body), the live
//! search (`GET` with a `q` parameter), and the like action (`POST`, empty
//! body, target in the path). Both `POST` endpoints carry the CSRF token
//! from the deployment's cookie in a request header. Unknown response
//! fields are ignored; missing required fields are parse failures.

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::http;
use serde::{Deserialize, Serialize};
use url::Url;

/// JSON body of a chat send request.
#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
}

/// A successful chat response: the assistant text plus optional
/// server-suggested quick replies.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// Assistant response text.
    pub response: String,
    /// Server-suggested canned follow-ups, in display order.
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

/// One live-search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Content category label (news, achievement, lecturer, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    results: Vec<SearchHit>,
}

/// Outcome of a like request as reported by the server.
///
/// `already_liked` is a semantic rejection, not an error: the server is
/// idempotent and this drives an informational (not success) notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// First-time like; `count` is the server-authoritative total.
    Liked {
        /// New like count reported by the server.
        count: u64,
    },
    /// The target was already liked in this session.
    AlreadyLiked,
}

#[derive(Debug, Deserialize)]
struct LikePayload {
    status: String,
    like_count: Option<u64>,
}

impl TryFrom<LikePayload> for LikeOutcome {
    type Error = WidgetError;

    fn try_from(payload: LikePayload) -> Result<Self, WidgetError> {
        match payload.status.as_str() {
            "liked" => match payload.like_count {
                Some(count) => Ok(Self::Liked { count }),
                None => Err(WidgetError::Parse(
                    "like response has status \"liked\" but no like_count".into(),
                )),
            },
            "already_liked" => Ok(Self::AlreadyLiked),
            other => Err(WidgetError::Parse(format!(
                "unknown like status: {other:?}"
            ))),
        }
    }
}

/// The remote service the widgets talk to.
///
/// Implementors perform one network round-trip per call and surface every
/// transport-level problem (unreachable host, non-success status, malformed
/// body) as a [`WidgetError`]. All implementations must be `Send + Sync` so
/// drivers can run them from spawned tasks.
pub trait RemoteService: Send + Sync {
    /// Send one user message and return the assistant reply.
    fn send_chat(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<ChatReply, WidgetError>> + Send;

    /// Run one live-search query and return the matching entries.
    fn live_search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, WidgetError>> + Send;

    /// Submit a like for the given target.
    fn like(
        &self,
        target: &str,
    ) -> impl std::future::Future<Output = Result<LikeOutcome, WidgetError>> + Send;
}

/// `reqwest`-backed [`RemoteService`] for a live deployment.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: reqwest::Client,
    config: WidgetConfig,
    csrf_token: Option<String>,
}

impl HttpService {
    /// Create a service against the configured deployment.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] for an invalid configuration and
    /// [`WidgetError::Http`] if the HTTP client cannot be built.
    pub fn new(config: WidgetConfig) -> Result<Self, WidgetError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self {
            client,
            config,
            csrf_token: None,
        })
    }

    /// Attach a CSRF token to be sent on `POST` requests.
    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Create a service, sourcing the CSRF token from a cookie header.
    ///
    /// When the named cookie is absent the requests go out without the
    /// header; the server's rejection then surfaces as a transport failure.
    ///
    /// # Errors
    ///
    /// Same as [`HttpService::new`].
    pub fn from_cookie_header(
        config: WidgetConfig,
        cookie_header: &str,
    ) -> Result<Self, WidgetError> {
        let token = http::cookie_value(cookie_header, &config.csrf_cookie);
        let mut service = Self::new(config)?;
        service.csrf_token = token;
        Ok(service)
    }

    fn endpoint(&self, path: &str) -> Result<Url, WidgetError> {
        Url::parse(&self.config.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| WidgetError::Config(format!("invalid endpoint {path}: {e}")))
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.post(url);
        match self.csrf_token {
            Some(ref token) => builder.header(&self.config.csrf_header, token),
            None => builder,
        }
    }
}

impl RemoteService for HttpService {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, WidgetError> {
        let url = self.endpoint(&self.config.chat_path)?;
        tracing::trace!(%url, "chat send");

        self.post(url)
            .json(&ChatPayload { message })
            .send()
            .await
            .map_err(|e| WidgetError::transport("chat request failed", e))?
            .error_for_status()
            .map_err(|e| WidgetError::transport("chat HTTP error", e))?
            .json::<ChatReply>()
            .await
            .map_err(|e| WidgetError::transport("chat response body", e))
    }

    async fn live_search(&self, query: &str) -> Result<Vec<SearchHit>, WidgetError> {
        let url = self.endpoint(&self.config.search_path)?;
        tracing::trace!(%url, query, "live search");

        let payload = self
            .client
            .get(url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| WidgetError::transport("search request failed", e))?
            .error_for_status()
            .map_err(|e| WidgetError::transport("search HTTP error", e))?
            .json::<SearchPayload>()
            .await
            .map_err(|e| WidgetError::transport("search response body", e))?;

        Ok(payload.results)
    }

    async fn like(&self, target: &str) -> Result<LikeOutcome, WidgetError> {
        let url = self.endpoint(&self.config.like_path(target))?;
        tracing::trace!(%url, target, "like");

        let payload = self
            .post(url)
            .send()
            .await
            .map_err(|e| WidgetError::transport("like request failed", e))?
            .error_for_status()
            .map_err(|e| WidgetError::transport("like HTTP error", e))?
            .json::<LikePayload>()
            .await
            .map_err(|e| WidgetError::transport("like response body", e))?;

        LikeOutcome::try_from(payload)
    }
}
