//! Transient toast notifications.
//!
//! The queue is additive: concurrent notices coexist rather than being
//! serialized, since notices are short and infrequent. Each notice carries
//! a fixed lifetime (display duration plus transition allowance) and is
//! removed by [`NotificationQueue::sweep`], driven by the embedding UI's
//! tick. There is no external cancellation API.

use crate::config::WidgetConfig;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Action completed (green check).
    Success,
    /// Action failed (red cross).
    Error,
    /// Neutral information.
    Info,
}

impl NoticeKind {
    /// CSS-class suffix used by the rendering layer.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// One short-lived, auto-dismissing notice.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique id for the display lifecycle.
    pub id: Uuid,
    /// Visual category.
    pub kind: NoticeKind,
    /// User-visible text.
    pub message: String,
    /// When the notice (including exit transition) is done.
    pub expires_at: Instant,
}

/// Queue of currently live notices.
#[derive(Debug)]
pub struct NotificationQueue {
    lifetime: Duration,
    active: Vec<Notification>,
}

impl NotificationQueue {
    /// Create a queue with the configured display duration and transition.
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            lifetime: Duration::from_millis(
                config.notice_duration_ms + config.notice_transition_ms,
            ),
            active: Vec::new(),
        }
    }

    /// Push a new notice; it expires after the configured lifetime.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> Uuid {
        let notice = Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.lifetime,
        };
        let id = notice.id;
        tracing::debug!(kind = kind.as_str(), %id, "notice pushed");
        self.active.push(notice);
        id
    }

    /// Currently live notices, in push order.
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Drop expired notices; returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let now = Instant::now();
        let before = self.active.len();
        self.active.retain(|n| n.expires_at > now);
        before - self.active.len()
    }

    /// Whether no notice is currently live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
