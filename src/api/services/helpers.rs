//! Lookups and fragments shared by the page handlers

use migration::entities::{department, face, image, officer, user};

use crate::api::state::AppState;
use crate::api::views::html::{escape, link};
use crate::errors::{OversightError, Result};

pub async fn department_or_404(state: &AppState, id: i32) -> Result<department::Model> {
    state
        .storage
        .get_department(id)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("Department {} not found", id)))
}

pub async fn officer_or_404(state: &AppState, id: i32) -> Result<officer::Model> {
    state
        .storage
        .get_officer(id)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("Officer {} not found", id)))
}

pub async fn image_or_404(state: &AppState, id: i32) -> Result<image::Model> {
    state
        .storage
        .get_image(id)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("Image {} not found", id)))
}

pub async fn face_or_404(state: &AppState, id: i32) -> Result<face::Model> {
    state
        .storage
        .get_face(id)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("Tag {} not found", id)))
}

pub async fn user_or_404(state: &AppState, id: i32) -> Result<user::Model> {
    state
        .storage
        .get_user(id)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("User {} not found", id)))
}

/// (id, name) select options; `blank` adds an empty first entry
pub async fn department_options(state: &AppState, blank: bool) -> Result<Vec<(String, String)>> {
    let mut options = Vec::new();
    if blank {
        options.push((String::new(), String::new()));
    }
    options.extend(
        state
            .storage
            .list_departments()
            .await?
            .into_iter()
            .map(|d| (d.id.to_string(), d.name)),
    );
    Ok(options)
}

pub async fn unit_options(
    state: &AppState,
    department_id: Option<i32>,
) -> Result<Vec<(String, String)>> {
    let mut options = vec![(String::new(), "None".to_string())];
    options.extend(
        state
            .storage
            .list_units(department_id)
            .await?
            .into_iter()
            .map(|u| (u.id.to_string(), u.descrip)),
    );
    Ok(options)
}

/// Link to the uploaded file behind an image row
pub fn image_src(image: &image::Model) -> String {
    let path = image.filepath.as_str();
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with("static/") {
        format!("/{}", path)
    } else {
        format!("/uploads/{}", image.filepath)
    }
}

pub fn image_tag(image: &image::Model, alt: &str) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" class=\"photo\">",
        escape(&image_src(image)),
        escape(alt)
    )
}

pub fn officer_link(officer: &officer::Model) -> String {
    link(&format!("/officer/{}", officer.id), &officer.full_name())
}

pub fn or_blank(value: Option<&str>) -> String {
    escape(value.unwrap_or(""))
}
