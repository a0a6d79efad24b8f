//! # prodi-widgets
//!
//! Asynchronous interaction controllers for the Prodi study-programme
//! website: the assistant chat widget, the debounced live-search box, the
//! transient toast queue, and the idempotent like buttons.
//!
//! ## Design
//!
//! - Pure state-transition cores ([`ChatSession`], [`SearchController`],
//!   [`LikeBoard`], [`NotificationQueue`]) with no I/O, testable in isolation
//! - Thin async drivers in [`widget`] that perform the network round-trips
//!   on a `tokio` runtime via [`reqwest`]
//! - Stale responses are detected with monotonic request tokens and
//!   discarded before they can touch user-visible state
//! - Rendering is a separate pure pass ([`render`]) from state to HTML
//!   fragments
//!
//! ## Remote contract
//!
//! Three endpoints: chat send (`POST`, JSON), live search (`GET` with a `q`
//! parameter), and like (`POST`, target in the path). POST requests carry
//! the CSRF token read from the deployment's cookie. See [`api`].

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod like;
pub mod notify;
pub mod render;
pub mod search;
pub mod widget;

pub use api::{ChatReply, HttpService, LikeOutcome, RemoteService, SearchHit};
pub use chat::{ChatSession, ChatStatus};
pub use config::WidgetConfig;
pub use error::{Result, WidgetError};
pub use like::{LikeBoard, LikeState, LikeUpdate};
pub use notify::{Notification, NotificationQueue, NoticeKind};
pub use search::SearchController;
pub use widget::{ChatWidget, LikeWidget, SearchWidget, SharedNotices};

use std::sync::Arc;

/// All widgets for one page, sharing a service and a notification queue.
#[derive(Debug)]
pub struct PageWidgets {
    /// Assistant chat widget.
    pub chat: ChatWidget<HttpService>,
    /// Live-search widget.
    pub search: SearchWidget<HttpService>,
    /// Like buttons.
    pub likes: LikeWidget<HttpService>,
    /// Queue the widgets push their toasts to.
    pub notices: SharedNotices,
}

/// Construct the page widgets against a deployment.
///
/// `cookie_header` is the page's cookie string; the CSRF token is read from
/// the cookie named by the config and attached to `POST` requests. Pass
/// `None` when no cookies are available — requests then go out without the
/// header and the server's rejection surfaces as a transport failure.
///
/// # Errors
///
/// Returns [`WidgetError::Config`] for an invalid configuration and
/// [`WidgetError::Http`] if the HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # fn example() -> prodi_widgets::Result<()> {
/// let config = prodi_widgets::WidgetConfig {
///     base_url: "https://prodi.example.ac.id".into(),
///     ..Default::default()
/// };
/// let mut page = prodi_widgets::mount(config, Some("csrftoken=abc123"))?;
/// page.chat.open();
/// # Ok(())
/// # }
/// ```
pub fn mount(config: WidgetConfig, cookie_header: Option<&str>) -> Result<PageWidgets> {
    config.validate()?;

    let service = match cookie_header {
        Some(cookies) => HttpService::from_cookie_header(config.clone(), cookies)?,
        None => HttpService::new(config.clone())?,
    };
    let service = Arc::new(service);
    let notices = widget::shared_notices(&config);

    Ok(PageWidgets {
        chat: ChatWidget::new(Arc::clone(&service)),
        search: SearchWidget::new(&config, Arc::clone(&service), Arc::clone(&notices)),
        likes: LikeWidget::new(service, Arc::clone(&notices)),
        notices,
    })
}
