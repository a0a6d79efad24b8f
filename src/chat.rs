//! Assistant chat session state.
//!
//! One logical conversation with a single-outstanding-request invariant:
//! `pending_token` is `Some` exactly while the status is `AwaitingReply`,
//! and a second submission during that window is a no-op (the send control
//! is disabled in that state). The transcript is append-only; replies are
//! matched to their request token and stale ones are discarded.

use crate::api::ChatReply;
use crate::error::WidgetError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Greeting shown when a fresh session is created.
pub const GREETING: &str =
    "Halo! \u{1F44B} Saya asisten virtual Program Studi. Ada yang bisa saya bantu?";

/// Starter quick replies offered with the greeting.
pub const STARTER_REPLIES: [&str; 4] = [
    "Informasi pendaftaran",
    "Informasi kurikulum",
    "Jadwal kuliah",
    "Kontak",
];

/// Fixed apology appended on transport failure; the user must resend.
pub const FALLBACK_REPLY: &str = "Maaf, terjadi kesalahan. Silakan coba lagi.";

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The site visitor.
    User,
    /// The remote assistant.
    Assistant,
}

/// One immutable transcript entry.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Unique message id.
    pub id: Uuid,
    /// Author.
    pub sender: Sender,
    /// Message text.
    pub text: String,
    /// Clickable canned follow-ups; activation is identical to typing the
    /// entry's text and submitting it.
    pub quick_replies: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>, quick_replies: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            quick_replies,
            created_at: Utc::now(),
        }
    }
}

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// Ready for input.
    Idle,
    /// A request is pending; submissions are no-ops.
    AwaitingReply,
    /// The last round-trip failed. Gates like `Idle` (the user may resend
    /// immediately) but lets the rendering layer show a degraded state.
    Error,
}

impl ChatStatus {
    /// Whether a new submission is currently accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::AwaitingReply)
    }
}

/// What applying a reply did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Assistant message appended; session back to `Idle`.
    Answered,
    /// Transport failure; apology appended, session in `Error`.
    Failed,
    /// Token mismatch; reply discarded, session untouched.
    Stale,
}

/// State of one assistant conversation.
#[derive(Debug)]
pub struct ChatSession {
    status: ChatStatus,
    transcript: Vec<ChatMessage>,
    pending_token: Option<u64>,
    next_token: u64,
    open: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Create a session seeded with the assistant greeting and its starter
    /// quick replies.
    #[must_use]
    pub fn new() -> Self {
        let greeting = ChatMessage::new(
            Sender::Assistant,
            GREETING,
            STARTER_REPLIES.iter().map(|s| (*s).to_owned()).collect(),
        );
        Self {
            status: ChatStatus::Idle,
            transcript: vec![greeting],
            pending_token: None,
            next_token: 0,
            open: false,
        }
    }

    /// Show the widget. Never alters the transcript.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the widget. Does not cancel an in-flight request; the reply is
    /// still applied on arrival so no message is silently lost.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the widget is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ChatStatus {
        self.status
    }

    /// The append-only transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Token of the outstanding request, if any.
    #[must_use]
    pub fn pending_token(&self) -> Option<u64> {
        self.pending_token
    }

    /// Submit user text.
    ///
    /// Returns `None` without side effects when the text is empty after
    /// trimming or a reply is already pending. On acceptance the trimmed
    /// text is appended as a user message, the session enters
    /// `AwaitingReply`, and the token the driver must tag the network
    /// request with is returned.
    pub fn submit(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if !self.status.accepts_input() {
            tracing::debug!("submission ignored while a reply is pending");
            return None;
        }

        self.transcript
            .push(ChatMessage::new(Sender::User, text, Vec::new()));
        let token = self.next_token;
        self.next_token += 1;
        self.pending_token = Some(token);
        self.status = ChatStatus::AwaitingReply;
        tracing::debug!(token, "chat message submitted");
        Some(token)
    }

    /// Submit a quick reply. Identical to typing the entry and submitting.
    pub fn select_quick_reply(&mut self, text: &str) -> Option<u64> {
        self.submit(text)
    }

    /// Apply the network outcome for the request tagged `token`.
    ///
    /// A token that does not match the outstanding request means the session
    /// somehow allowed overlap; the reply is discarded and a warning logged.
    pub fn apply_reply(
        &mut self,
        token: u64,
        reply: Result<ChatReply, WidgetError>,
    ) -> ReplyOutcome {
        if self.pending_token != Some(token) {
            tracing::warn!(token, pending = ?self.pending_token, "stale chat reply discarded");
            return ReplyOutcome::Stale;
        }

        self.pending_token = None;
        match reply {
            Ok(reply) => {
                self.transcript.push(ChatMessage::new(
                    Sender::Assistant,
                    reply.response,
                    reply.quick_replies,
                ));
                self.status = ChatStatus::Idle;
                ReplyOutcome::Answered
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "chat round-trip failed");
                self.transcript
                    .push(ChatMessage::new(Sender::Assistant, FALLBACK_REPLY, Vec::new()));
                self.status = ChatStatus::Error;
                ReplyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str, quick: &[&str]) -> ChatReply {
        ChatReply {
            response: text.into(),
            quick_replies: quick.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn new_session_is_seeded_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.transcript().len(), 1);
        let greeting = &session.transcript()[0];
        assert_eq!(greeting.sender, Sender::Assistant);
        assert_eq!(greeting.quick_replies.len(), 4);
        assert_eq!(greeting.quick_replies[0], "Informasi pendaftaran");
        assert_eq!(session.status(), ChatStatus::Idle);
        assert!(session.pending_token().is_none());
    }

    #[test]
    fn submit_appends_user_message_and_awaits() {
        let mut session = ChatSession::new();
        let token = session.submit("Informasi pendaftaran").expect("accepted");

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].sender, Sender::User);
        assert_eq!(session.transcript()[1].text, "Informasi pendaftaran");
        assert_eq!(session.status(), ChatStatus::AwaitingReply);
        assert_eq!(session.pending_token(), Some(token));
    }

    #[test]
    fn submit_trims_and_rejects_empty() {
        let mut session = ChatSession::new();
        assert!(session.submit("").is_none());
        assert!(session.submit("   \t ").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.status(), ChatStatus::Idle);

        session.submit("  spasi  ").expect("accepted");
        assert_eq!(session.transcript()[1].text, "spasi");
    }

    #[test]
    fn duplicate_submissions_while_awaiting_are_noops() {
        let mut session = ChatSession::new();
        session.submit("pertama").expect("accepted");
        assert!(session.submit("kedua").is_none());
        assert!(session.submit("ketiga").is_none());

        // Exactly one user message was appended.
        let users = session
            .transcript()
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count();
        assert_eq!(users, 1);
    }

    #[test]
    fn reply_appends_assistant_message_and_idles() {
        let mut session = ChatSession::new();
        let token = session.submit("Jadwal kuliah").expect("accepted");

        let outcome = session.apply_reply(token, Ok(reply("Senin-Jumat.", &["Kontak"])));
        assert_eq!(outcome, ReplyOutcome::Answered);
        assert_eq!(session.status(), ChatStatus::Idle);
        assert!(session.pending_token().is_none());

        let last = session.transcript().last().expect("message");
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.text, "Senin-Jumat.");
        assert_eq!(last.quick_replies, vec!["Kontak".to_string()]);
    }

    #[test]
    fn failure_appends_apology_and_allows_resend() {
        let mut session = ChatSession::new();
        let token = session.submit("halo").expect("accepted");

        let outcome = session.apply_reply(token, Err(WidgetError::Timeout("10s".into())));
        assert_eq!(outcome, ReplyOutcome::Failed);
        assert_eq!(session.transcript().last().expect("message").text, FALLBACK_REPLY);
        assert!(session.pending_token().is_none());
        assert_eq!(session.status(), ChatStatus::Error);
        assert!(session.status().accepts_input());

        // No automatic retry: the next send is a fresh explicit submission.
        assert!(session.submit("halo lagi").is_some());
        assert_eq!(session.status(), ChatStatus::AwaitingReply);
    }

    #[test]
    fn mismatched_token_is_discarded() {
        let mut session = ChatSession::new();
        let token = session.submit("halo").expect("accepted");

        let outcome = session.apply_reply(token + 1, Ok(reply("salah", &[])));
        assert_eq!(outcome, ReplyOutcome::Stale);
        // Session untouched: still awaiting the real reply.
        assert_eq!(session.status(), ChatStatus::AwaitingReply);
        assert_eq!(session.pending_token(), Some(token));
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn quick_reply_is_identical_to_typing() {
        let mut typed = ChatSession::new();
        let mut clicked = ChatSession::new();

        let _ = typed.submit("Informasi pendaftaran");
        let _ = clicked.select_quick_reply("Informasi pendaftaran");

        assert_eq!(typed.transcript()[1].text, clicked.transcript()[1].text);
        assert_eq!(typed.status(), clicked.status());
    }

    #[test]
    fn close_and_reopen_preserves_transcript() {
        let mut session = ChatSession::new();
        let token = session.submit("halo").expect("accepted");
        session.apply_reply(token, Ok(reply("Halo juga!", &[])));

        let before: Vec<String> = session.transcript().iter().map(|m| m.text.clone()).collect();
        session.close();
        session.open();
        session.close();
        let after: Vec<String> = session.transcript().iter().map(|m| m.text.clone()).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn close_does_not_cancel_pending_request() {
        let mut session = ChatSession::new();
        let token = session.submit("halo").expect("accepted");
        session.close();

        // The reply still applies after the widget is hidden.
        let outcome = session.apply_reply(token, Ok(reply("di sini", &[])));
        assert_eq!(outcome, ReplyOutcome::Answered);
        assert_eq!(session.transcript().last().expect("message").text, "di sini");
    }

    #[test]
    fn pending_token_iff_awaiting_reply() {
        let mut session = ChatSession::new();
        assert_eq!(
            session.pending_token().is_some(),
            session.status() == ChatStatus::AwaitingReply
        );

        let token = session.submit("halo").expect("accepted");
        assert_eq!(
            session.pending_token().is_some(),
            session.status() == ChatStatus::AwaitingReply
        );

        session.apply_reply(token, Err(WidgetError::Http("down".into())));
        assert_eq!(
            session.pending_token().is_some(),
            session.status() == ChatStatus::AwaitingReply
        );
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut session = ChatSession::new();
        let t1 = session.submit("satu").expect("accepted");
        session.apply_reply(t1, Ok(reply("ok", &[])));
        let t2 = session.submit("dua").expect("accepted");
        assert!(t2 > t1);
    }
}
