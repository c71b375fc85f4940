//! Department officer listings, new departments and units

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::info;

use crate::api::extractors::{CurrentUser, Viewer};
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::choices::is_not_sure;
use crate::api::forms::main::{AddUnitForm, DepartmentForm, MAX_AGE, MIN_AGE};
use crate::api::forms::validators::{parse_int, present};
use crate::api::forms::{FormErrors, raw};
use crate::api::permissions::{
    is_administrator, require_ac_or_admin, require_admin, require_department,
};
use crate::api::services::helpers::{department_or_404, officer_link, or_blank};
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::{OversightError, Result};
use crate::storage::OfficerFilter;

/// Filters carried in the officer list URL; unparsable values are ignored
#[derive(Debug, Default, Deserialize)]
pub struct OfficerListQuery {
    pub page: Option<String>,
    pub name: Option<String>,
    pub badge: Option<String>,
    pub rank: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub unit: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

/// URL 里的年龄和查找表单一样限定在 MIN_AGE..=MAX_AGE
fn age_bound(value: &Option<String>) -> Option<i32> {
    present(value)
        .and_then(parse_int::<i32>)
        .map(|age| age.clamp(MIN_AGE, MAX_AGE))
}

impl OfficerListQuery {
    fn filter(&self, department_id: i32) -> OfficerFilter {
        let choice = |v: &Option<String>| {
            present(v)
                .filter(|v| !is_not_sure(v))
                .map(str::to_string)
        };
        OfficerFilter {
            department_id: Some(department_id),
            name: present(&self.name).map(str::to_string),
            badge: present(&self.badge).map(str::to_string),
            rank: choice(&self.rank),
            unit_id: present(&self.unit).and_then(parse_int),
            race: choice(&self.race),
            gender: choice(&self.gender),
            min_age: age_bound(&self.min_age),
            max_age: age_bound(&self.max_age),
        }
    }

    fn page(&self) -> u64 {
        present(&self.page).and_then(parse_int).unwrap_or(1).max(1)
    }

    /// Current filters with a different page number
    fn page_link(&self, department_id: i32, page: u64) -> String {
        let mut params = vec![format!("page={}", page)];
        let fields = [
            ("name", &self.name),
            ("badge", &self.badge),
            ("rank", &self.rank),
            ("race", &self.race),
            ("gender", &self.gender),
            ("unit", &self.unit),
            ("min_age", &self.min_age),
            ("max_age", &self.max_age),
        ];
        for (key, value) in fields {
            if let Some(v) = present(value) {
                params.push(format!("{}={}", key, urlencoding::encode(v)));
            }
        }
        format!("/department/{}?{}", department_id, params.join("&"))
    }
}

pub async fn list_officers(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<OfficerListQuery>,
) -> Result<HttpResponse> {
    let department = department_or_404(&state, path.into_inner()).await?;
    let per_page = state.config.site.officers_per_page.max(1);
    let page = query.page();
    let (officers, total) = state
        .storage
        .list_officers(&query.filter(department.id), page, per_page)
        .await?;

    let mut rows = Vec::with_capacity(officers.len());
    for officer in &officers {
        let assignments = state.storage.assignments_for_officer(officer.id).await?;
        let current = assignments.last();
        rows.push(vec![
            officer_link(officer),
            or_blank(current.and_then(|a| a.rank.as_deref())),
            or_blank(current.and_then(|a| a.star_no.as_deref())),
            or_blank(officer.race.as_deref()),
            or_blank(officer.gender.as_deref()),
        ]);
    }

    let pages = total.div_ceil(per_page).max(1);
    let mut pager = String::new();
    if page > 1 {
        pager.push_str(&link(&query.page_link(department.id, page - 1), "Previous"));
    }
    pager.push_str(&format!(" Page {} of {} ", page, pages));
    if page < pages {
        pager.push_str(&link(&query.page_link(department.id, page + 1), "Next"));
    }

    let body = format!(
        "<h1>{} Officers</h1><p>{} officers found. {}</p>{}<p class=\"pager\">{}</p>",
        escape(&department.name),
        total,
        link("/find", "Refine search"),
        html::table(&["Name", "Rank", "Badge", "Race", "Gender"], &rows),
        pager
    );
    Ok(render(&req, &viewer, Page::new(format!("{} Officers", department.short_name), body)))
}

fn department_body(form: &DepartmentForm, errors: &FormErrors) -> String {
    let mut fields = html::text_input(
        "name",
        "Full name of law enforcement agency",
        raw(&form.name),
        errors.field("name"),
    );
    fields.push_str(&html::text_input(
        "short_name",
        "Shortened acronym for law enforcement agency, e.g. CPD",
        raw(&form.short_name),
        errors.field("short_name"),
    ));
    format!(
        "<h1>Add Police Department</h1>{}",
        html::form("/department/new", &fields, "Add")
    )
}

pub async fn new_department_page(req: HttpRequest, user: CurrentUser) -> Result<HttpResponse> {
    require_admin(&user)?;
    let body = department_body(&DepartmentForm::default(), &FormErrors::new());
    Ok(render(&req, &user.viewer(), Page::new("New Department", body)))
}

pub async fn new_department(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<DepartmentForm>,
) -> Result<HttpResponse> {
    require_admin(&user)?;
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            let body = department_body(&form, &errors);
            return Ok(render(&req, &user.viewer(), Page::new("New Department", body)));
        }
    };

    match state.storage.create_department(&new.name, &new.short_name).await {
        Ok(department) => {
            info!("Admin {} added department {}", user.username, department.name);
            Ok(flash::redirect(
                &req,
                "/browse",
                vec![FlashMessage::success(format!(
                    "New department {} added!",
                    department.name
                ))],
            ))
        }
        Err(OversightError::Validation(message)) => {
            let page = Page::new("New Department", department_body(&form, &FormErrors::new()))
                .message(FlashMessage::danger(message));
            Ok(render(&req, &user.viewer(), page))
        }
        Err(e) => Err(e),
    }
}

/// Administrators pick any department, area coordinators only their own
async fn unit_department_options(
    state: &AppState,
    user: &CurrentUser,
) -> Result<Vec<(String, String)>> {
    let departments = state.storage.list_departments().await?;
    Ok(departments
        .into_iter()
        .filter(|d| is_administrator(user) || user.ac_department_id == Some(d.id))
        .map(|d| (d.id.to_string(), d.name))
        .collect())
}

async fn unit_body(
    state: &AppState,
    user: &CurrentUser,
    form: &AddUnitForm,
    errors: &FormErrors,
) -> Result<String> {
    let options = unit_department_options(state, user).await?;
    let mut fields = html::text_input(
        "descrip",
        "Unit name or description",
        raw(&form.descrip),
        errors.field("descrip"),
    );
    fields.push_str(&html::select(
        "department",
        "Department",
        &options,
        raw(&form.department),
        errors.field("department"),
    ));
    Ok(format!("<h1>Add Unit</h1>{}", html::form("/unit/new", &fields, "Add")))
}

pub async fn new_unit_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    require_ac_or_admin(&user)?;
    let body = unit_body(&state, &user, &AddUnitForm::default(), &FormErrors::new()).await?;
    Ok(render(&req, &user.viewer(), Page::new("New Unit", body)))
}

pub async fn new_unit(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<AddUnitForm>,
) -> Result<HttpResponse> {
    require_ac_or_admin(&user)?;
    let (descrip, department_id) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let body = unit_body(&state, &user, &form, &errors).await?;
            return Ok(render(&req, &user.viewer(), Page::new("New Unit", body)));
        }
    };

    require_department(&user, department_id)?;
    let department = department_or_404(&state, department_id).await?;

    let unit = state.storage.create_unit(&descrip, department.id).await?;
    info!("User {} added unit {} to {}", user.username, unit.descrip, department.name);

    Ok(flash::redirect(
        &req,
        &format!("/department/{}", department.id),
        vec![FlashMessage::success(format!("New unit {} added!", unit.descrip))],
    ))
}
