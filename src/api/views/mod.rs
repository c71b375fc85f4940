//! Server-side HTML rendering

pub mod html;
mod layout;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::api::extractors::Viewer;
use crate::api::flash::{self, FlashMessage};

pub use html::escape;

/// A rendered page body plus the notices to show above it
pub struct Page {
    pub title: String,
    pub body: String,
    pub messages: Vec<FlashMessage>,
    pub status: StatusCode,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            messages: Vec::new(),
            status: StatusCode::OK,
        }
    }

    pub fn message(mut self, message: FlashMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = FlashMessage>) -> Self {
        self.messages.extend(messages);
        self
    }
}

/// Render `page` inside the site layout
///
/// Shows and clears the flash messages queued by the previous response.
pub fn render(req: &HttpRequest, viewer: &Viewer, page: Page) -> HttpResponse {
    let mut messages = flash::incoming(req);
    let had_incoming = !messages.is_empty();
    messages.extend(page.messages);

    let html = layout::wrap(&page.title, viewer, &messages, &page.body);

    let mut builder = HttpResponse::build(page.status);
    builder.content_type("text/html; charset=utf-8");
    if had_incoming {
        builder.cookie(flash::removal_cookie());
    }
    builder.body(html)
}

/// Standalone error page used by `OversightError`'s response mapping
pub fn error_page(status: StatusCode, detail: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1><p>{}</p><p><a href=\"/\">Back to the home page</a></p>",
        status.as_u16(),
        escape(reason),
        escape(detail)
    );
    layout::wrap(reason, &Viewer::anonymous(), &[], &body)
}
