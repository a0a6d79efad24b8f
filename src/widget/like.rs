//! Like widget driver: idempotent one-shot actions with toast feedback.

use crate::api::RemoteService;
use crate::like::{LikeBoard, LikeUpdate};
use crate::notify::NoticeKind;
use crate::widget::{lock, SharedNotices};
use std::sync::Arc;

/// Toast shown on a first-time like.
pub const LIKED_NOTICE: &str = "Terima kasih telah menyukai karya ini!";
/// Toast shown when the server reports the target was already liked.
pub const ALREADY_LIKED_NOTICE: &str = "Anda sudah menyukai karya ini";
/// Toast shown when the request failed and the user may retry.
pub const FAILED_NOTICE: &str = "Terjadi kesalahan";

/// Drives a [`LikeBoard`] against the remote like endpoint.
#[derive(Debug)]
pub struct LikeWidget<S> {
    board: LikeBoard,
    service: Arc<S>,
    notices: SharedNotices,
}

impl<S: RemoteService> LikeWidget<S> {
    /// Create a widget with an empty board.
    #[must_use]
    pub fn new(service: Arc<S>, notices: SharedNotices) -> Self {
        Self {
            board: LikeBoard::new(),
            service,
            notices,
        }
    }

    /// Seed the displayed count for a target from the server-rendered page.
    pub fn seed_count(&mut self, target: &str, count: u64) {
        self.board.seed_count(target, count);
    }

    /// The underlying board state, for rendering and inspection.
    #[must_use]
    pub fn board(&self) -> &LikeBoard {
        &self.board
    }

    /// Activate a like for `target`.
    ///
    /// A no-op (`LikeUpdate::Ignored`) while a request is pending or after
    /// commit; otherwise performs the round-trip, settles the board, and
    /// pushes the matching notice.
    pub async fn like(&mut self, target: &str) -> LikeUpdate {
        if !self.board.begin(target) {
            return LikeUpdate::Ignored;
        }

        let outcome = self.service.like(target).await;
        let update = self.board.settle(target, outcome);
        match update {
            LikeUpdate::Liked { .. } => {
                lock(&self.notices).push(NoticeKind::Success, LIKED_NOTICE);
            }
            LikeUpdate::AlreadyLiked => {
                lock(&self.notices).push(NoticeKind::Info, ALREADY_LIKED_NOTICE);
            }
            LikeUpdate::Failed => {
                lock(&self.notices).push(NoticeKind::Error, FAILED_NOTICE);
            }
            LikeUpdate::Ignored => {}
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatReply, LikeOutcome, SearchHit};
    use crate::error::WidgetError;
    use crate::like::LikeState;
    use crate::widget::shared_notices;
    use crate::WidgetConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock service returning a fixed like outcome.
    struct FixedLikeService {
        outcome: Result<LikeOutcome, ()>,
        calls: AtomicUsize,
    }

    impl FixedLikeService {
        fn new(outcome: Result<LikeOutcome, ()>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl RemoteService for FixedLikeService {
        async fn send_chat(&self, _message: &str) -> Result<ChatReply, WidgetError> {
            unimplemented!("not used by like tests")
        }

        async fn live_search(&self, _query: &str) -> Result<Vec<SearchHit>, WidgetError> {
            unimplemented!("not used by like tests")
        }

        async fn like(&self, _target: &str) -> Result<LikeOutcome, WidgetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
                .map_err(|()| WidgetError::Http("connection reset".into()))
        }
    }

    fn widget(
        outcome: Result<LikeOutcome, ()>,
    ) -> (LikeWidget<FixedLikeService>, Arc<FixedLikeService>, SharedNotices) {
        let service = FixedLikeService::new(outcome);
        let notices = shared_notices(&WidgetConfig::default());
        let widget = LikeWidget::new(Arc::clone(&service), Arc::clone(&notices));
        (widget, service, notices)
    }

    #[tokio::test]
    async fn first_like_commits_and_shows_success() {
        let (mut widget, service, notices) = widget(Ok(LikeOutcome::Liked { count: 8 }));
        widget.seed_count("karya-42", 7);

        let update = widget.like("karya-42").await;
        assert_eq!(update, LikeUpdate::Liked { count: 8 });
        assert_eq!(widget.board().count("karya-42"), Some(8));
        assert!(widget.board().is_liked("karya-42"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);

        let queue = lock(&notices);
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].kind, NoticeKind::Success);
        assert_eq!(queue.active()[0].message, LIKED_NOTICE);
    }

    #[tokio::test]
    async fn already_liked_keeps_counter_and_shows_info() {
        let (mut widget, _service, notices) = widget(Ok(LikeOutcome::AlreadyLiked));
        widget.seed_count("karya-42", 7);

        let update = widget.like("karya-42").await;
        assert_eq!(update, LikeUpdate::AlreadyLiked);
        assert_eq!(widget.board().count("karya-42"), Some(7));

        let queue = lock(&notices);
        assert_eq!(queue.active()[0].kind, NoticeKind::Info);
        assert_eq!(queue.active()[0].message, ALREADY_LIKED_NOTICE);
    }

    #[tokio::test]
    async fn failure_rolls_back_and_shows_error() {
        let (mut widget, _service, notices) = widget(Err(()));

        let update = widget.like("karya-42").await;
        assert_eq!(update, LikeUpdate::Failed);
        assert_eq!(widget.board().state("karya-42"), LikeState::Idle);

        let queue = lock(&notices);
        assert_eq!(queue.active()[0].kind, NoticeKind::Error);
        assert_eq!(queue.active()[0].message, FAILED_NOTICE);
    }

    #[tokio::test]
    async fn repeated_activation_sends_exactly_one_request() {
        let (mut widget, service, notices) = widget(Ok(LikeOutcome::Liked { count: 1 }));

        assert_eq!(widget.like("karya-42").await, LikeUpdate::Liked { count: 1 });
        for _ in 0..5 {
            assert_eq!(widget.like("karya-42").await, LikeUpdate::Ignored);
        }

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        // Only the one success notice, no extra feedback for ignored clicks.
        assert_eq!(lock(&notices).active().len(), 1);
    }

    #[tokio::test]
    async fn retry_after_failure_sends_again() {
        let (mut widget, service, _notices) = widget(Err(()));
        widget.like("karya-42").await;
        widget.like("karya-42").await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }
}
