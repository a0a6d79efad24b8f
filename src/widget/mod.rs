//! Async drivers wiring the pure controller cores to a [`RemoteService`].
//!
//! Each driver owns its core plus the service handle, performs the network
//! round-trips on the ambient `tokio` runtime, and pushes user feedback to
//! the shared [`NotificationQueue`]. No driver touches another's state;
//! cross-component effects travel through the queue only.
//!
//! [`RemoteService`]: crate::api::RemoteService
//! [`NotificationQueue`]: crate::notify::NotificationQueue

mod chat;
mod like;
mod search;

pub use chat::ChatWidget;
pub use like::LikeWidget;
pub use search::SearchWidget;

use crate::notify::NotificationQueue;
use std::sync::{Arc, Mutex, MutexGuard};

/// Notification queue shared by the widgets on one page.
pub type SharedNotices = Arc<Mutex<NotificationQueue>>;

/// Build a shared queue from config.
#[must_use]
pub fn shared_notices(config: &crate::config::WidgetConfig) -> SharedNotices {
    Arc::new(Mutex::new(NotificationQueue::new(config)))
}

/// Lock a widget mutex, recovering from poisoning (state stays usable even
/// if a panic unwound through a holder).
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
