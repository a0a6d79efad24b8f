//! Live-search widget driver: cancellable debounce plus token filtering.
//!
//! The debounce is an owned [`tokio::task::JoinHandle`]; each keystroke
//! aborts the previous handle before (possibly) scheduling a new one, so at
//! most one query is issued per settled interval. Issued network requests
//! are never cancelled — the controller's token check suppresses rendering
//! of superseded replies when they eventually land.

use crate::api::{RemoteService, SearchHit};
use crate::config::WidgetConfig;
use crate::notify::NoticeKind;
use crate::render;
use crate::search::{InputAction, RenderOutcome, SearchController};
use crate::widget::{lock, SharedNotices};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Toast shown when a search round-trip fails (results stay untouched).
pub const FAILED_NOTICE: &str = "Terjadi kesalahan";

/// Drives a [`SearchController`] against the remote search endpoint.
#[derive(Debug)]
pub struct SearchWidget<S> {
    state: Arc<Mutex<SearchController>>,
    service: Arc<S>,
    notices: SharedNotices,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<S: RemoteService + 'static> SearchWidget<S> {
    /// Create a widget with the configured debounce window and minimum
    /// query length.
    #[must_use]
    pub fn new(config: &WidgetConfig, service: Arc<S>, notices: SharedNotices) -> Self {
        Self {
            state: Arc::new(Mutex::new(SearchController::new(config.min_query_len))),
            service,
            notices,
            debounce: Duration::from_millis(config.debounce_ms),
            pending: None,
        }
    }

    /// Handle a keystroke's full input text.
    ///
    /// Restarts the debounce window: the previous scheduled query (if any)
    /// is aborted, and a new one is scheduled unless the input is under the
    /// minimum length, in which case the panel clears immediately.
    ///
    /// Must be called from within a `tokio` runtime.
    pub fn input(&mut self, raw: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let action = lock(&self.state).on_input(raw);
        let InputAction::Debounce(text) = action else {
            return;
        };

        let state = Arc::clone(&self.state);
        let service = Arc::clone(&self.service);
        let notices = Arc::clone(&self.notices);
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let query = lock(&state).issue(text);
            let results = service.live_search(&query.text).await;
            let outcome = lock(&state).apply_results(query.token, results);
            if matches!(outcome, RenderOutcome::Failed) {
                lock(&notices).push(NoticeKind::Error, FAILED_NOTICE);
            }
        }));
    }

    /// Outside click: hide the panel without cancelling anything in flight.
    pub fn dismiss(&mut self) {
        lock(&self.state).dismiss();
    }

    /// Whether the result panel is currently shown.
    #[must_use]
    pub fn panel_visible(&self) -> bool {
        lock(&self.state).panel_visible()
    }

    /// Snapshot of the rendered result set, if the panel is visible.
    #[must_use]
    pub fn visible_results(&self) -> Option<Vec<SearchHit>> {
        lock(&self.state).visible_results().map(<[SearchHit]>::to_vec)
    }

    /// Render the result panel from the current state.
    #[must_use]
    pub fn render(&self) -> String {
        render::results_html(&lock(&self.state))
    }

    /// Wait for the scheduled query (if any) to finish its round-trip.
    ///
    /// Intended for orderly shutdown and tests; the UI loop never needs it.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.pending.take() {
            // An aborted handle is fine; we only care that nothing is running.
            let _ = handle.await;
        }
    }
}
