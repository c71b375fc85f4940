//! Image submission and sorting

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::api::extractors::{CurrentUser, Viewer};
use crate::api::flash::{self, FlashMessage};
use crate::api::services::helpers::{department_or_404, image_or_404, image_tag, or_blank};
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::services::ImageStore;
use crate::storage::NewImage;

pub async fn submit(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let departments = state.storage.list_departments().await?;
    let items: String = departments
        .iter()
        .map(|d| {
            format!(
                "<li>{}</li>",
                link(&format!("/submit/department/{}", d.id), &d.name)
            )
        })
        .collect();
    let body = format!(
        "<h1>Submit Images</h1>\
         <p>Choose the department whose officers appear in your photographs.</p>\
         <ul class=\"departments\">{}</ul>",
        items
    );
    Ok(render(&req, &viewer, Page::new("Submit Images", body)))
}

pub async fn submit_department(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let department = department_or_404(&state, path.into_inner()).await?;
    let upload = if viewer.is_authenticated() {
        format!(
            "<form method=\"post\" action=\"/upload/department/{}\" enctype=\"multipart/form-data\">\
             <input type=\"file\" name=\"file\" accept=\"image/*\" required>\
             <button type=\"submit\">Upload</button></form>",
            department.id
        )
    } else {
        format!(
            "<p>Please {} to upload images.</p>",
            link(
                &format!("/auth/login?next=/submit/department/{}", department.id),
                "log in"
            )
        )
    };
    let body = format!(
        "<h1>Submit Images: {}</h1>\
         <p>Accepted formats: png, jpg, jpeg, gif, mpo. Duplicate photographs are detected \
         automatically.</p>{}",
        escape(&department.name),
        upload
    );
    Ok(render(&req, &viewer, Page::new("Submit Images", body)))
}

fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "success": false, "error": message }))
}

/// Multipart upload of a single image file, answered with JSON
pub async fn upload(
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let department = department_or_404(&state, path.into_inner()).await?;
    let max_bytes = state.uploads.max_bytes();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to parse multipart field: {}", e);
                return Ok(json_error(StatusCode::BAD_REQUEST, "Invalid multipart data"));
            }
        };

        if field.name() != Some("file") {
            // 忽略未知字段
            while let Some(_chunk) = field.next().await {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("")
            .to_string();
        if ImageStore::allowed_extension(&filename).is_none() {
            warn!("Rejected upload with file name {:?}", filename);
            return Ok(json_error(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "File type not allowed",
            ));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if data.len() + bytes.len() > max_bytes {
                        return Ok(json_error(StatusCode::PAYLOAD_TOO_LARGE, "File too large"));
                    }
                    data.extend_from_slice(&bytes);
                }
                Err(e) => {
                    error!("Failed to read upload chunk: {}", e);
                    return Ok(json_error(StatusCode::BAD_REQUEST, "Failed to read file"));
                }
            }
        }
        file = Some((filename, data));
    }

    let Some((filename, data)) = file.filter(|(_, data)| !data.is_empty()) else {
        return Ok(json_error(StatusCode::BAD_REQUEST, "No file uploaded"));
    };

    let stored = state.uploads.save(&filename, &data).await?;
    let (image, created) = state
        .storage
        .create_image(NewImage {
            filepath: stored.filename,
            hash_img: stored.hash,
            department_id: department.id,
            user_id: Some(user.id()),
            date_image_taken: None,
        })
        .await?;
    info!(
        "User {} uploaded image {} to department {}",
        user.username, image.id, department.id
    );

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "image_id": image.id,
        "duplicate": !created,
    })))
}

pub async fn sort_images(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let department = department_or_404(&state, path.into_inner()).await?;
    let next = state.storage.next_unsorted_image(department.id).await?;

    let body = match next {
        Some(image) => format!(
            "<h1>Sort images: {}</h1>\
             <p>Do you see police officers in the photo?</p>{}\
             <div class=\"actions\">{}{}</div>",
            escape(&department.name),
            image_tag(&image, "Unsorted image"),
            html::button_form(&format!("/image/classify/{}/1", image.id), "Yes"),
            html::button_form(&format!("/image/classify/{}/0", image.id), "No"),
        ),
        None => format!(
            "<h1>Sort images: {}</h1><p>All images have been sorted!</p>",
            escape(&department.name)
        ),
    };
    Ok(render(&req, &user.viewer(), Page::new("Sort Images", body)))
}

/// POST only
pub async fn classify(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<(i32, u8)>,
) -> Result<HttpResponse> {
    let (image_id, contains_cops) = path.into_inner();
    let image = image_or_404(&state, image_id).await?;
    state
        .storage
        .classify_image(image.id, contains_cops == 1, user.id())
        .await?;

    Ok(flash::redirect(
        &req,
        &format!("/sort/department/{}", image.department_id),
        vec![FlashMessage::success("Updated image classification")],
    ))
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => "Not sorted".to_string(),
    }
}

pub async fn display_submission(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let image = image_or_404(&state, path.into_inner()).await?;
    let department = department_or_404(&state, image.department_id).await?;
    let faces = state.storage.faces_for_image(image.id).await?;

    let tags: String = faces
        .iter()
        .map(|f| {
            format!(
                "<li>{} (officer {})</li>",
                link(&format!("/tag/{}", f.id), &format!("Tag {}", f.id)),
                link(&format!("/officer/{}", f.officer_id), &f.officer_id.to_string())
            )
        })
        .collect();

    let details = html::table(
        &["Field", "Value"],
        &[
            vec!["Image ID".into(), image.id.to_string()],
            vec!["Department".into(), escape(&department.name)],
            vec!["Contains officers".into(), yes_no(image.contains_cops)],
            vec![
                "Fully tagged".into(),
                yes_no(Some(image.is_tagged)),
            ],
            vec![
                "Uploaded".into(),
                image.date_image_inserted.format("%Y-%m-%d %H:%M").to_string(),
            ],
            vec![
                "Taken".into(),
                or_blank(
                    image
                        .date_image_taken
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .as_deref(),
                ),
            ],
        ],
    );
    let body = format!(
        "<h1>Image ID {}</h1>{}{}<h3>Tags</h3><ul>{}</ul>",
        image.id,
        image_tag(&image, &format!("Image {}", image.id)),
        details,
        tags
    );
    Ok(render(&req, &user.viewer(), Page::new("Image", body)))
}

#[derive(Debug, Deserialize)]
pub struct TaggedQuery {
    pub department_id: Option<i32>,
}

pub async fn complete_tagging(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<TaggedQuery>,
) -> Result<HttpResponse> {
    let image = image_or_404(&state, path.into_inner()).await?;
    state.storage.mark_image_tagged(image.id).await?;
    info!("User {} marked image {} as tagged", user.username, image.id);

    let location = match query.department_id {
        Some(dept) => format!("/cop_face/department/{}", dept),
        None => "/cop_face/".to_string(),
    };
    Ok(flash::redirect(
        &req,
        &location,
        vec![FlashMessage::success("Marked image as completed.")],
    ))
}
