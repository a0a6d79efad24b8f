//! Chat widget driver: one session, one round-trip at a time.

use crate::api::RemoteService;
use crate::chat::{ChatSession, ReplyOutcome};
use std::sync::Arc;

/// Drives a [`ChatSession`] against the remote chat endpoint.
///
/// The exclusive borrow on [`send`](Self::send) plus the session's
/// `AwaitingReply` gate together guarantee at most one outstanding request;
/// failures surface as the inline apology message, never as a fault.
#[derive(Debug)]
pub struct ChatWidget<S> {
    session: ChatSession,
    service: Arc<S>,
}

impl<S: RemoteService> ChatWidget<S> {
    /// Create a widget with a freshly seeded session.
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self {
            session: ChatSession::new(),
            service,
        }
    }

    /// The underlying session state, for rendering and inspection.
    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Show the widget.
    pub fn open(&mut self) {
        self.session.open();
    }

    /// Hide the widget without cancelling an in-flight request.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Submit user text and await the assistant reply.
    ///
    /// Returns `None` when the input was rejected locally (empty after
    /// trimming, or a reply is already pending); nothing is sent in that
    /// case. Otherwise the round-trip outcome is applied to the session and
    /// returned.
    pub async fn send(&mut self, text: &str) -> Option<ReplyOutcome> {
        let text = text.trim();
        let token = self.session.submit(text)?;
        let reply = self.service.send_chat(text).await;
        Some(self.session.apply_reply(token, reply))
    }

    /// Activate a quick reply. Behaviorally identical to typing the entry's
    /// text and submitting it.
    pub async fn quick_reply(&mut self, text: &str) -> Option<ReplyOutcome> {
        self.send(text).await
    }
}
