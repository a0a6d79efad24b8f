//! Per-target like guard.
//!
//! A logical like must reach the server at most once per target per page
//! lifetime, even under rapid repeated activation. The guard is the state
//! field itself: `InFlight` blocks re-entry while a request is pending,
//! `Committed` is terminal. Transport failures roll back to `Idle` so the
//! user may retry explicitly.

use crate::api::LikeOutcome;
use crate::error::WidgetError;
use std::collections::HashMap;

/// Lifecycle of a like action for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeState {
    /// No request sent yet (or the last one failed); activation allowed.
    #[default]
    Idle,
    /// A request is pending; activation is a no-op.
    InFlight,
    /// The server acknowledged the like; terminal for the page lifetime.
    Committed,
}

#[derive(Debug, Default)]
struct TargetEntry {
    state: LikeState,
    /// Displayed count. Server-authoritative once a `liked` response arrives;
    /// never locally incremented, to avoid drift against concurrent likes
    /// from other visitors.
    count: Option<u64>,
}

/// What a settled like request means for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeUpdate {
    /// First-time like; show the new count and the liked style.
    Liked {
        /// Server-reported authoritative count.
        count: u64,
    },
    /// Idempotent server answer; counter unchanged, informational notice.
    AlreadyLiked,
    /// Transport failure; state rolled back so the user may retry.
    Failed,
    /// Activation ignored because a request is pending or already committed.
    Ignored,
}

/// Guard state for every likeable target on the page.
#[derive(Debug, Default)]
pub struct LikeBoard {
    targets: HashMap<String, TargetEntry>,
}

impl LikeBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the displayed count for a target from the server-rendered page.
    pub fn seed_count(&mut self, target: &str, count: u64) {
        self.targets.entry(target.to_owned()).or_default().count = Some(count);
    }

    /// Current state for a target (`Idle` when never touched).
    #[must_use]
    pub fn state(&self, target: &str) -> LikeState {
        self.targets.get(target).map_or(LikeState::Idle, |e| e.state)
    }

    /// Displayed like count for a target, when known.
    #[must_use]
    pub fn count(&self, target: &str) -> Option<u64> {
        self.targets.get(target).and_then(|e| e.count)
    }

    /// Whether the target should render in the liked style.
    #[must_use]
    pub fn is_liked(&self, target: &str) -> bool {
        self.state(target) == LikeState::Committed
    }

    /// Try to start a like request for a target.
    ///
    /// Returns `false` (and changes nothing) when a request is already
    /// pending or the like is committed; returns `true` after transitioning
    /// the target to `InFlight`.
    pub fn begin(&mut self, target: &str) -> bool {
        let entry = self.targets.entry(target.to_owned()).or_default();
        match entry.state {
            LikeState::Idle => {
                entry.state = LikeState::InFlight;
                tracing::debug!(target, "like request started");
                true
            }
            LikeState::InFlight | LikeState::Committed => {
                tracing::debug!(target, state = ?entry.state, "like activation ignored");
                false
            }
        }
    }

    /// Settle the in-flight request for a target with the network outcome.
    pub fn settle(
        &mut self,
        target: &str,
        outcome: Result<LikeOutcome, WidgetError>,
    ) -> LikeUpdate {
        let entry = self.targets.entry(target.to_owned()).or_default();
        match outcome {
            Ok(LikeOutcome::Liked { count }) => {
                entry.state = LikeState::Committed;
                entry.count = Some(count);
                tracing::debug!(target, count, "like committed");
                LikeUpdate::Liked { count }
            }
            Ok(LikeOutcome::AlreadyLiked) => {
                entry.state = LikeState::Committed;
                tracing::debug!(target, "like already recorded server-side");
                LikeUpdate::AlreadyLiked
            }
            Err(err) => {
                entry.state = LikeState::Idle;
                tracing::warn!(target, error = %err, "like request failed");
                LikeUpdate::Failed
            }
        }
    }
}
