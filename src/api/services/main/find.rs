//! Officer search and the tagger's officer lookup

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::api::extractors::Viewer;
use crate::api::flash;
use crate::api::forms::main::{FindOfficerForm, FindOfficerIdForm, MAX_AGE, MIN_AGE};
use crate::api::forms::{Choice, FormErrors, Gender, Race, Rank, raw};
use crate::api::services::helpers::{department_options, image_tag, officer_link};
use crate::api::state::AppState;
use crate::api::views::html;
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::storage::OfficerFilter;

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

async fn find_body(
    state: &AppState,
    form: &FindOfficerForm,
    errors: &FormErrors,
) -> Result<String> {
    let departments = department_options(state, false).await?;
    let mut fields = html::select(
        "dept",
        "Department",
        &departments,
        raw(&form.dept),
        errors.field("dept"),
    );
    fields.push_str(&html::text_input("name", "Last name", raw(&form.name), errors.field("name")));
    fields.push_str(&html::text_input(
        "badge",
        "Badge number",
        raw(&form.badge),
        errors.field("badge"),
    ));
    fields.push_str(&html::select(
        "rank",
        "Rank",
        &Rank::options(),
        or_default(&form.rank, "Not Sure"),
        errors.field("rank"),
    ));
    fields.push_str(&html::select(
        "race",
        "Race",
        &Race::options(),
        or_default(&form.race, "Not Sure"),
        errors.field("race"),
    ));
    fields.push_str(&html::select(
        "gender",
        "Gender",
        &Gender::options(),
        or_default(&form.gender, "Not Sure"),
        errors.field("gender"),
    ));
    fields.push_str(&html::input(
        "number",
        "min_age",
        "Minimum age",
        or_default(&form.min_age, &MIN_AGE.to_string()),
        errors.field("min_age"),
    ));
    fields.push_str(&html::input(
        "number",
        "max_age",
        "Maximum age",
        or_default(&form.max_age, "85"),
        errors.field("max_age"),
    ));
    Ok(format!(
        "<h1>Find an Officer</h1><p>Ages range from {} to {}.</p>{}",
        MIN_AGE,
        MAX_AGE,
        html::form("/find", &fields, "Search")
    ))
}

pub async fn find_page(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut form = FindOfficerForm::default();
    // 默认选中用户偏好的部门
    if let Some(pref) = viewer.user().and_then(|u| u.dept_pref) {
        form.dept = Some(pref.to_string());
    }
    let body = find_body(&state, &form, &FormErrors::new()).await?;
    Ok(render(&req, &viewer, Page::new("Find an Officer", body)))
}

pub async fn find(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    form: web::Form<FindOfficerForm>,
) -> Result<HttpResponse> {
    match form.validate() {
        Ok(search) => {
            let location = format!("/department/{}?{}", search.dept, search.query_string());
            debug!("Officer search redirected to {}", location);
            Ok(flash::redirect(&req, &location, Vec::new()))
        }
        Err(errors) => {
            let body = find_body(&state, &form, &errors).await?;
            Ok(render(&req, &viewer, Page::new("Find an Officer", body)))
        }
    }
}

async fn tagger_find_body(
    state: &AppState,
    form: &FindOfficerIdForm,
    errors: &FormErrors,
) -> Result<String> {
    let departments = department_options(state, true).await?;
    let mut fields = html::select(
        "dept",
        "Department",
        &departments,
        raw(&form.dept),
        errors.field("dept"),
    );
    fields.push_str(&html::text_input("name", "Last name", raw(&form.name), errors.field("name")));
    fields.push_str(&html::text_input(
        "badge",
        "Badge number",
        raw(&form.badge),
        errors.field("badge"),
    ));
    Ok(format!(
        "<h1>Find an Officer's OpenOversight ID</h1>\
         <p>Search for the officer you are tagging to get their ID.</p>{}",
        html::form("/tagger_find", &fields, "Search")
    ))
}

pub async fn tagger_find_page(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = tagger_find_body(&state, &FindOfficerIdForm::default(), &FormErrors::new()).await?;
    Ok(render(&req, &viewer, Page::new("Find an Officer ID", body)))
}

/// Valid searches are re-posted to the gallery with 307
pub async fn tagger_find(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    form: web::Form<FindOfficerIdForm>,
) -> Result<HttpResponse> {
    match form.validate() {
        Ok(_) => Ok(flash::redirect_with_status(
            &req,
            StatusCode::TEMPORARY_REDIRECT,
            "/tagger_gallery",
            Vec::new(),
        )),
        Err(errors) => {
            let body = tagger_find_body(&state, &form, &errors).await?;
            Ok(render(&req, &viewer, Page::new("Find an Officer ID", body)))
        }
    }
}

pub async fn tagger_gallery(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    form: web::Form<FindOfficerIdForm>,
) -> Result<HttpResponse> {
    let search = match form.validate() {
        Ok(search) => search,
        Err(_) => {
            return Ok(flash::redirect_with_status(
                &req,
                StatusCode::TEMPORARY_REDIRECT,
                "/tagger_find",
                Vec::new(),
            ));
        }
    };

    let filter = OfficerFilter {
        department_id: search.dept,
        name: search.name,
        badge: search.badge,
        ..Default::default()
    };
    let per_page = state.config.site.officers_per_page;
    let (officers, total) = state.storage.list_officers(&filter, 1, per_page).await?;

    let mut cards = String::new();
    for officer in &officers {
        let faces = state.storage.faces_for_officer(officer.id).await?;
        let photo = match faces.first() {
            Some(face) => match state.storage.get_image(face.img_id).await? {
                Some(image) => image_tag(&image, &officer.full_name()),
                None => String::new(),
            },
            None => "<div class=\"no-photo\">No photo</div>".to_string(),
        };
        cards.push_str(&format!(
            "<div class=\"officer-card\">{}<p>{}</p><p>OpenOversight ID: <strong>{}</strong></p></div>",
            photo,
            officer_link(officer),
            officer.id
        ));
    }
    if officers.is_empty() {
        cards.push_str("<p>No officers match this search.</p>");
    }

    let body = format!(
        "<h1>Officer Gallery</h1><p>Showing {} of {} matching officers.</p><div class=\"gallery\">{}</div>",
        officers.len(),
        total,
        cards
    );
    Ok(render(&req, &viewer, Page::new("Officer Gallery", body)))
}
