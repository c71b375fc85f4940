//! One-shot notices
//!
//! A handler that redirects queues its messages in the `oo_flash` cookie;
//! the next rendered page shows them and clears the cookie. Pages rendered
//! directly pass their messages to the renderer instead.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

use crate::api::constants::FLASH_COOKIE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

pub fn encode(messages: &[FlashMessage]) -> String {
    // Vec<FlashMessage> 序列化不会失败
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Malformed cookies decode to no messages
pub fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Messages queued by the previous response
pub fn incoming(req: &HttpRequest) -> Vec<FlashMessage> {
    req.cookie(FLASH_COOKIE_NAME)
        .map(|c| decode(c.value()))
        .unwrap_or_default()
}

pub fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE_NAME, encode(messages));
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE_NAME, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// 302 redirect carrying `messages` plus any not yet shown
pub fn redirect(req: &HttpRequest, location: &str, messages: Vec<FlashMessage>) -> HttpResponse {
    redirect_builder(req, StatusCode::FOUND, location, messages).finish()
}

pub fn redirect_with_status(
    req: &HttpRequest,
    status: StatusCode,
    location: &str,
    messages: Vec<FlashMessage>,
) -> HttpResponse {
    redirect_builder(req, status, location, messages).finish()
}

/// Redirect builder for responses that also set other cookies
pub fn redirect_builder(
    req: &HttpRequest,
    status: StatusCode,
    location: &str,
    messages: Vec<FlashMessage>,
) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder.insert_header((LOCATION, location.to_string()));

    if !messages.is_empty() {
        let mut pending = incoming(req);
        pending.extend(messages);
        debug!("Queueing {} flash message(s) for {}", pending.len(), location);
        builder.cookie(flash_cookie(&pending));
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_encode_decode() {
        let messages = vec![
            FlashMessage::success("Tag added to database"),
            FlashMessage::danger("Invalid officer ID. Please select a valid OpenOversight ID!"),
        ];
        assert_eq!(decode(&encode(&messages)), messages);
    }

    #[test]
    fn test_garbage_decodes_to_nothing() {
        assert!(decode("not base64 !!").is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"{\"no\":1}")).is_empty());
    }

    #[test]
    fn test_redirect_keeps_pending_messages() {
        let pending = vec![FlashMessage::info("You have been logged out.")];
        let req = TestRequest::default()
            .cookie(flash_cookie(&pending))
            .to_http_request();

        let resp = redirect(&req, "/index", vec![FlashMessage::info("Updated!")]);
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/index");

        let cookie = resp
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE_NAME)
            .expect("flash cookie set");
        let queued = decode(cookie.value());
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[1].message, "Updated!");
    }

    #[test]
    fn test_redirect_without_messages_sets_no_cookie() {
        let req = TestRequest::default().to_http_request();
        let resp = redirect(&req, "/", Vec::new());
        assert_eq!(resp.cookies().count(), 0);
    }
}
