//! Widget configuration with the deployment's defaults.
//!
//! [`WidgetConfig`] carries the endpoint paths, the CSRF cookie/header
//! convention, and the timing constants (debounce window, toast lifetime,
//! request timeout). The defaults match the reference deployment; override
//! fields for custom installs.

use crate::error::WidgetError;
use url::Url;

/// Configuration shared by all page widgets.
///
/// Use [`Default::default()`] for the reference deployment values, or
/// construct with field overrides.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the site, e.g. `https://prodi.example.ac.id`.
    pub base_url: String,
    /// Path of the chat endpoint (`POST`, JSON body).
    pub chat_path: String,
    /// Path of the live-search endpoint (`GET`, `q` query parameter).
    pub search_path: String,
    /// Path prefix for likeable targets; the like endpoint is
    /// `{like_prefix}/{target}/like/`.
    pub like_prefix: String,
    /// Name of the cookie carrying the CSRF token.
    pub csrf_cookie: String,
    /// Name of the request header the CSRF token is sent in.
    pub csrf_header: String,
    /// Quiet period in milliseconds before a settled search query is issued.
    pub debounce_ms: u64,
    /// Minimum trimmed query length; shorter input clears the panel instead.
    pub min_query_len: usize,
    /// How long a toast notice stays visible, in milliseconds.
    pub notice_duration_ms: u64,
    /// Entrance/exit transition allowance added to the notice lifetime.
    pub notice_transition_ms: u64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            chat_path: "/chatbot/send/".into(),
            search_path: "/api/search/".into(),
            like_prefix: "/karya".into(),
            csrf_cookie: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            debounce_ms: 300,
            min_query_len: 2,
            notice_duration_ms: 3000,
            notice_transition_ms: 300,
            timeout_seconds: 10,
        }
    }
}

impl WidgetConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute URL
    /// - `debounce_ms`, `notice_duration_ms` and `timeout_seconds` must be > 0
    /// - `min_query_len` must be at least 1
    pub fn validate(&self) -> Result<(), WidgetError> {
        if Url::parse(&self.base_url).is_err() {
            return Err(WidgetError::Config(format!(
                "base_url is not a valid absolute URL: {}",
                self.base_url
            )));
        }
        if self.debounce_ms == 0 {
            return Err(WidgetError::Config("debounce_ms must be > 0".into()));
        }
        if self.notice_duration_ms == 0 {
            return Err(WidgetError::Config("notice_duration_ms must be > 0".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(WidgetError::Config("timeout_seconds must be > 0".into()));
        }
        if self.min_query_len == 0 {
            return Err(WidgetError::Config("min_query_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Builds the like endpoint path for a target identifier.
    #[must_use]
    pub fn like_path(&self, target: &str) -> String {
        format!("{}/{}/like/", self.like_prefix, target)
    }
}
