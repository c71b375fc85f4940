//! Embedded stylesheets and uploaded images

use actix_web::{HttpRequest, HttpResponse, web};
use rust_embed::Embed;
use tracing::{debug, trace};

use crate::api::state::AppState;
use crate::errors::{OversightError, Result};

// 使用 RustEmbed 自动嵌入静态文件
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

fn content_type(path: &str) -> &'static str {
    match path
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("mpo") => "image/mpo",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// 处理静态资源文件
pub async fn handle_static(req: HttpRequest) -> HttpResponse {
    let path = req.match_info().query("path");
    trace!("Serving static file: {}", path);

    match StaticAssets::get(path) {
        Some(content) => HttpResponse::Ok()
            .content_type(content_type(path))
            .body(content.data.into_owned()),
        None => {
            debug!("Static file not found: {}", path);
            HttpResponse::NotFound().body("File not found")
        }
    }
}

/// Serves a stored upload by file name
pub async fn handle_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let filename = path.into_inner();
    let file_path = state
        .uploads
        .path_for(&filename)
        .ok_or_else(|| OversightError::not_found("File not found"))?;

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(content_type(&filename))
            .body(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Upload not found: {}", filename);
            Err(OversightError::not_found("File not found"))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn asset_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/static/{path:.*}").route(web::get().to(handle_static)))
        .service(web::resource("/uploads/{filename}").route(web::get().to(handle_upload)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("css/openoversight.css"), "text/css");
        assert_eq!(content_type("abc.JPG"), "image/jpeg");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }

    #[test]
    fn test_stylesheet_is_embedded() {
        assert!(StaticAssets::get("css/openoversight.css").is_some());
    }
}
