//! Public informational pages

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::api::extractors::Viewer;
use crate::api::state::AppState;
use crate::api::views::html::{escape, link};
use crate::api::views::{Page, render};
use crate::errors::Result;

pub async fn index(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    let body = format!(
        "<h1>OpenOversight</h1>\
         <p class=\"lead\">A public, searchable database of law enforcement officers.</p>\
         <ul class=\"actions\"><li>{}</li><li>{}</li><li>{}</li><li>{}</li></ul>",
        link("/find", "Find an Officer"),
        link("/browse", "Browse Departments"),
        link("/submit", "Submit Images"),
        link("/label", "Volunteer to Identify Officers"),
    );
    render(&req, &viewer, Page::new("OpenOversight", body))
}

pub async fn browse(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let departments = state.storage.list_departments().await?;
    let items: String = departments
        .iter()
        .map(|d| {
            format!(
                "<li>{} ({})</li>",
                link(&format!("/department/{}", d.id), &d.name),
                escape(&d.short_name)
            )
        })
        .collect();
    let body = format!("<h1>Browse Departments</h1><ul class=\"departments\">{}</ul>", items);
    Ok(render(&req, &viewer, Page::new("Browse", body)))
}

pub async fn about(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    let body = "<h1>About OpenOversight</h1>\
        <p>OpenOversight is a volunteer-driven project that improves law enforcement \
        accountability through public and crowdsourced data. We maintain a database of \
        officer demographic information and photographs so that members of the public \
        can identify officers with whom they have had an encounter.</p>\
        <p>The data is contributed by volunteers who sort submitted photographs and tag \
        the officers that appear in them.</p>";
    render(&req, &viewer, Page::new("About", body))
}

pub async fn privacy(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    let body = "<h1>Privacy Policy</h1>\
        <p>We store the email address and username you register with, a hash of your \
        password, and the classifications and tags you contribute.</p>\
        <p>Photographs you submit are stored on our servers and may be published \
        alongside officer records. We do not sell or share your account details.</p>";
    render(&req, &viewer, Page::new("Privacy", body))
}

pub async fn tutorial(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    let body = format!(
        "<h1>Volunteer Tutorial</h1>\
         <h3>Sorting</h3><p>You will be shown a photograph and asked whether any police \
         officers appear in it. Answer yes or no; every answer helps.</p>\
         <h3>Tagging</h3><p>For photographs that contain officers, draw a box around an \
         officer's face and enter their OpenOversight ID. Use {} to look up the ID by \
         name or badge number.</p>\
         <p>When every officer in a picture is tagged, mark the image as completed.</p>",
        link("/tagger_find", "the officer lookup")
    );
    render(&req, &viewer, Page::new("Tutorial", body))
}

pub async fn label(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let departments = state.storage.list_departments().await?;
    let rows: String = departments
        .iter()
        .map(|d| {
            format!(
                "<li>{}: {} | {}</li>",
                escape(&d.name),
                link(&format!("/sort/department/{}", d.id), "Sort images"),
                link(&format!("/cop_face/department/{}", d.id), "Tag officers"),
            )
        })
        .collect();
    let body = format!(
        "<h1>Volunteer</h1>\
         <p>Help us identify officers by sorting and tagging submitted photographs. \
         New here? Read the {}.</p><ul class=\"departments\">{}</ul>",
        link("/tutorial", "tutorial"),
        rows
    );
    Ok(render(&req, &viewer, Page::new("Volunteer", body)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintQuery {
    pub officer_star: Option<String>,
    pub officer_first_name: Option<String>,
    pub officer_last_name: Option<String>,
    pub officer_middle_initial: Option<String>,
    pub officer_image: Option<String>,
}

/// Collects the officer details a complaint form asks for
pub async fn complaint(
    req: HttpRequest,
    viewer: Viewer,
    query: web::Query<ComplaintQuery>,
) -> HttpResponse {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or(""));
    let mut body = format!(
        "<h1>File a Complaint</h1>\
         <p>Copy the details below into your complaint.</p>\
         <dl><dt>Officer first name</dt><dd>{}</dd>\
         <dt>Officer middle initial</dt><dd>{}</dd>\
         <dt>Officer last name</dt><dd>{}</dd>\
         <dt>Badge number</dt><dd>{}</dd></dl>",
        value(&query.officer_first_name),
        value(&query.officer_middle_initial),
        value(&query.officer_last_name),
        value(&query.officer_star),
    );
    if let Some(image) = query.officer_image.as_deref().filter(|i| !i.is_empty()) {
        let src = if image.starts_with('/') || image.contains("://") {
            image.to_string()
        } else {
            format!("/{}", image)
        };
        body.push_str(&format!(
            "<p><img src=\"{}\" alt=\"Officer photo\" class=\"photo\"></p>",
            escape(&src)
        ));
    }
    render(&req, &viewer, Page::new("File a Complaint", body))
}
