//! Shared HTTP client construction and CSRF cookie handling.
//!
//! Provides the configured [`reqwest::Client`] used by every widget and the
//! cookie-header parser that sources the CSRF token. A missing cookie is not
//! an error here: the request is simply sent without the header and the
//! remote service's rejection surfaces as a transport failure.

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use percent_encoding::percent_decode_str;
use std::time::Duration;

/// Build a [`reqwest::Client`] for the widget endpoints.
///
/// The client has:
/// - Cookie store enabled (session and CSRF cookies)
/// - Timeout from config
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`WidgetError::Http`] if the client cannot be constructed.
pub fn build_client(config: &WidgetConfig) -> Result<reqwest::Client, WidgetError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(concat!("prodi-widgets/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WidgetError::Http(format!("failed to build HTTP client: {e}")))
}

/// Extract a named value from a `Cookie:`-style header string.
///
/// Accepts the `name=value; other=value` form and percent-decodes the value,
/// matching how the page script reads `document.cookie`. Returns `None` when
/// the cookie is absent or its value does not decode as UTF-8.
#[must_use]
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        percent_decode_str(value)
            .decode_utf8()
            .ok()
            .map(|v| v.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = WidgetConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn cookie_value_finds_named_cookie() {
        let header = "sessionid=abc123; csrftoken=tok-456; theme=dark";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("tok-456"));
    }

    #[test]
    fn cookie_value_ignores_prefix_collisions() {
        // `csrftoken2` must not match a lookup for `csrftoken`.
        let header = "csrftoken2=wrong; csrftoken=right";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("right"));
    }

    #[test]
    fn cookie_value_percent_decodes() {
        let header = "csrftoken=a%2Bb%3Dc";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("a+b=c"));
    }

    #[test]
    fn cookie_value_missing_returns_none() {
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn cookie_value_tolerates_whitespace() {
        let header = "  sessionid=abc ;  csrftoken=tok  ";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("tok"));
    }
}
