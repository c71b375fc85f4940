use rust_embed::Embed;
use tracing::error;

use super::html::{escape, link};
use crate::api::extractors::Viewer;
use crate::api::flash::FlashMessage;

// 页面骨架模板
#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

const FALLBACK_LAYOUT: &str = "<!DOCTYPE html><html><head><title>%TITLE%</title></head><body><nav>%NAV%</nav>%FLASHES%%CONTENT%</body></html>";

fn layout_source() -> String {
    match Templates::get("layout.html") {
        Some(file) => String::from_utf8_lossy(&file.data).into_owned(),
        None => {
            error!("templates/layout.html missing from the binary, using fallback layout");
            FALLBACK_LAYOUT.to_string()
        }
    }
}

fn nav(viewer: &Viewer) -> String {
    let mut items = vec![
        link("/browse", "Browse"),
        link("/find", "Find an Officer"),
        link("/submit", "Submit Images"),
        link("/label", "Volunteer"),
    ];

    match viewer.user() {
        Some(user) => {
            items.push(link("/leaderboard", "Leaderboard"));
            if user.is_administrator {
                items.push(link("/auth/users", "Users"));
            }
            items.push(link(&format!("/user/{}", user.username), "Profile"));
            items.push(link("/auth/logout", "Log Out"));
        }
        None => {
            items.push(link("/auth/login", "Log In"));
            items.push(link("/auth/register", "Register"));
        }
    }

    items.join(" ")
}

fn flashes(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                "<div class=\"flash flash-{}\">{}</div>",
                m.level.as_ref(),
                escape(&m.message)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the site layout; `body` is trusted HTML
pub fn wrap(title: &str, viewer: &Viewer, messages: &[FlashMessage], body: &str) -> String {
    // CONTENT 最后替换，避免正文里的占位符被误替换
    layout_source()
        .replace("%TITLE%", &escape(title))
        .replace("%NAV%", &nav(viewer))
        .replace("%FLASHES%", &flashes(messages))
        .replace("%VERSION%", env!("CARGO_PKG_VERSION"))
        .replace("%CONTENT%", body)
}
