//! Pure rendering: controller state to HTML fragments.
//!
//! Kept fully separate from the state-transition logic so transitions can
//! be tested without constructing any visual output. The markup classes
//! match the site stylesheet. All interpolated text is escaped.

use crate::chat::{ChatMessage, ChatSession, Sender};
use crate::notify::Notification;
use crate::search::SearchController;

/// Literal shown when a query matched nothing.
pub const NO_RESULTS: &str = "Tidak ada hasil ditemukan";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one transcript message bubble, quick replies included.
#[must_use]
pub fn message_html(message: &ChatMessage) -> String {
    let side = match message.sender {
        Sender::User => "user",
        Sender::Assistant => "bot",
    };

    let mut quick = String::new();
    if !message.quick_replies.is_empty() {
        quick.push_str("<div class=\"quick-replies\">");
        for reply in &message.quick_replies {
            let text = escape(reply);
            quick.push_str(&format!(
                "<button class=\"quick-reply-btn\" data-reply=\"{text}\">{text}</button>"
            ));
        }
        quick.push_str("</div>");
    }

    format!(
        "<div class=\"chat-message {side}\"><div class=\"message-bubble\">{}{quick}</div></div>",
        escape(&message.text)
    )
}

/// Render the whole transcript, oldest first.
#[must_use]
pub fn transcript_html(session: &ChatSession) -> String {
    session.transcript().iter().map(message_html).collect()
}

/// Render the search result panel, or an empty string while hidden.
#[must_use]
pub fn results_html(controller: &SearchController) -> String {
    let Some(hits) = controller.visible_results() else {
        return String::new();
    };

    if hits.is_empty() {
        return format!("<div class=\"search-no-results\">{NO_RESULTS}</div>");
    }

    let mut out = String::from("<ul class=\"search-results-list\">");
    for hit in hits {
        out.push_str(&format!(
            "<li class=\"search-result-item\"><a href=\"{}\">\
             <span class=\"result-type\">{}</span>\
             <span class=\"result-title\">{}</span></a></li>",
            escape(&hit.url),
            escape(&hit.kind),
            escape(&hit.title),
        ));
    }
    out.push_str("</ul>");
    out
}

/// Render one toast notice.
#[must_use]
pub fn notice_html(notice: &Notification) -> String {
    format!(
        "<div class=\"toast-notification toast-{}\"><span>{}</span></div>",
        notice.kind.as_str(),
        escape(&notice.message)
    )
}
