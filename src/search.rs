//! Live-search controller state.
//!
//! Converts rapid keystrokes into at most one settled query per pause and
//! guarantees the rendered result set always corresponds to the latest
//! query. Each issued query carries a monotonically increasing token;
//! responses for any other token are discarded silently (last-token-wins —
//! the network work is never cancelled, only its rendering suppressed).
//!
//! The debounce timer itself lives in the async driver
//! ([`crate::widget::SearchWidget`]); this core decides what the driver
//! should do and filters the responses it brings back.

use crate::api::SearchHit;
use crate::error::WidgetError;

/// What the driver must do after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Input is under the minimum length: results were cleared, the panel
    /// hidden, and any pending debounce must be cancelled. Nothing is sent.
    Clear,
    /// Restart the debounce window for this trimmed query text.
    Debounce(String),
}

/// A settled query, tagged with the token its response must echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed query text.
    pub text: String,
    /// Monotonic request token.
    pub token: u64,
}

/// What applying a response did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Result set recorded and the panel shown (`count` may be 0, which
    /// renders the no-results indicator).
    Rendered {
        /// Number of entries in the recorded set.
        count: usize,
    },
    /// Result set recorded, but the panel stays hidden because the user
    /// dismissed it; nothing re-shows automatically.
    Suppressed,
    /// A newer query superseded this token; response discarded.
    Stale,
    /// Transport failure; the displayed results are left untouched.
    Failed,
}

/// Debounce/token state for one search box.
#[derive(Debug)]
pub struct SearchController {
    min_query_len: usize,
    latest_token: u64,
    results: Option<Vec<SearchHit>>,
    panel_visible: bool,
    dismissed: bool,
}

impl SearchController {
    /// Create a controller; `min_query_len` gates how short a query may be.
    #[must_use]
    pub fn new(min_query_len: usize) -> Self {
        Self {
            min_query_len,
            latest_token: 0,
            results: None,
            panel_visible: false,
            dismissed: false,
        }
    }

    /// Handle a keystroke's full input text.
    ///
    /// Short input clears the recorded results immediately and advances the
    /// token so an in-flight reply for the deleted text can never render.
    /// Otherwise the (trimmed) text is handed back for debouncing.
    pub fn on_input(&mut self, raw: &str) -> InputAction {
        self.dismissed = false;
        let query = raw.trim();
        if query.chars().count() < self.min_query_len {
            self.results = None;
            self.panel_visible = false;
            // Treat anything already in flight as superseded.
            self.latest_token += 1;
            return InputAction::Clear;
        }
        InputAction::Debounce(query.to_owned())
    }

    /// Issue the settled query once the debounce window elapsed.
    pub fn issue(&mut self, text: String) -> SearchQuery {
        self.latest_token += 1;
        tracing::debug!(token = self.latest_token, query = %text, "search query issued");
        SearchQuery {
            text,
            token: self.latest_token,
        }
    }

    /// Apply the network outcome for the query tagged `token`.
    pub fn apply_results(
        &mut self,
        token: u64,
        results: Result<Vec<SearchHit>, WidgetError>,
    ) -> RenderOutcome {
        if token != self.latest_token {
            tracing::warn!(token, latest = self.latest_token, "stale search results discarded");
            return RenderOutcome::Stale;
        }
        match results {
            Ok(hits) => {
                let count = hits.len();
                self.results = Some(hits);
                if self.dismissed {
                    tracing::debug!(count, "search results recorded while panel dismissed");
                    RenderOutcome::Suppressed
                } else {
                    self.panel_visible = true;
                    RenderOutcome::Rendered { count }
                }
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "search request failed");
                RenderOutcome::Failed
            }
        }
    }

    /// Outside click: hide the panel without cancelling anything in flight.
    pub fn dismiss(&mut self) {
        self.panel_visible = false;
        self.dismissed = true;
    }

    /// Whether the result panel is currently shown.
    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// The recorded result set for the latest rendered query, if the panel
    /// is visible. `Some(&[])` means the no-results indicator is shown.
    #[must_use]
    pub fn visible_results(&self) -> Option<&[SearchHit]> {
        if self.panel_visible {
            self.results.as_deref()
        } else {
            None
        }
    }

    /// Token of the most recently issued or invalidated query.
    #[must_use]
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }
}
