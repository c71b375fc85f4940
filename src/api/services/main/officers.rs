//! Officer profiles, records and assignments

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use migration::entities::{assignment, officer};

use crate::api::extractors::{CurrentUser, Viewer};
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::main::{AddOfficerForm, AssignmentForm, AssignmentFields, EditOfficerForm};
use crate::api::forms::{Choice, FormErrors, Gender, Race, Rank, raw};
use crate::api::permissions::{require_ac_or_admin, require_department};
use crate::api::services::helpers::{
    department_options, department_or_404, image_tag, officer_or_404, or_blank, unit_options,
};
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::{OversightError, Result};
use crate::storage::{AssignmentUpdate, NewAssignment};

async fn unit_name(state: &AppState, unit_id: Option<i32>) -> Result<String> {
    Ok(match unit_id {
        Some(id) => state
            .storage
            .get_unit(id)
            .await?
            .map(|u| escape(&u.descrip))
            .unwrap_or_default(),
        None => String::new(),
    })
}

/// Unit ids must belong to the officer's department
async fn check_unit(
    state: &AppState,
    unit_id: Option<i32>,
    department_id: i32,
    errors: &mut FormErrors,
) -> Result<()> {
    if let Some(id) = unit_id {
        let valid = state
            .storage
            .get_unit(id)
            .await?
            .is_some_and(|u| u.department_id == department_id);
        if !valid {
            errors.add("unit", "Not a valid choice");
        }
    }
    Ok(())
}

fn complaint_link(officer: &officer::Model, current: Option<&assignment::Model>) -> String {
    let params = [
        ("officer_star", current.and_then(|a| a.star_no.clone()).unwrap_or_default()),
        ("officer_first_name", officer.first_name.clone()),
        ("officer_last_name", officer.last_name.clone()),
        ("officer_middle_initial", officer.middle_initial.clone()),
    ];
    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    link(&format!("/complaint?{}", query.join("&")), "File a complaint about this officer")
}

async fn assignment_fields(
    state: &AppState,
    department_id: i32,
    form: &AssignmentForm,
    errors: &FormErrors,
) -> Result<String> {
    let units = unit_options(state, Some(department_id)).await?;
    let mut fields = html::text_input(
        "star_no",
        "Badge number",
        raw(&form.star_no),
        errors.field("star_no"),
    );
    fields.push_str(&html::select(
        "rank",
        "Rank",
        &Rank::options(),
        raw(&form.rank),
        errors.field("rank"),
    ));
    fields.push_str(&html::select("unit", "Unit", &units, raw(&form.unit), errors.field("unit")));
    fields.push_str(&html::input(
        "date",
        "star_date",
        "Assignment date",
        raw(&form.star_date),
        errors.field("star_date"),
    ));
    Ok(fields)
}

/// Profile page; POST renders the same page
pub async fn officer_profile(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let officer = officer_or_404(&state, path.into_inner()).await?;
    let department = department_or_404(&state, officer.department_id).await?;
    let assignments = state.storage.assignments_for_officer(officer.id).await?;
    let faces = state.storage.faces_for_officer(officer.id).await?;
    let can_manage = viewer.can_manage(officer.department_id);

    let details = html::table(
        &["Field", "Value"],
        &[
            vec!["OpenOversight ID".into(), officer.id.to_string()],
            vec!["Name".into(), escape(&officer.full_name())],
            vec!["Department".into(), escape(&department.name)],
            vec!["Race".into(), or_blank(officer.race.as_deref())],
            vec!["Gender".into(), or_blank(officer.gender.as_deref())],
            vec![
                "Birth year".into(),
                officer.birth_year.map(|y| y.to_string()).unwrap_or_default(),
            ],
            vec![
                "First employed".into(),
                officer.employment_date.map(|d| d.to_string()).unwrap_or_default(),
            ],
            vec![
                "Unique internal identifier".into(),
                or_blank(officer.unique_internal_identifier.as_deref()),
            ],
        ],
    );

    let mut rows = Vec::with_capacity(assignments.len());
    for a in &assignments {
        let mut row = vec![
            or_blank(a.star_no.as_deref()),
            or_blank(a.rank.as_deref()),
            unit_name(&state, a.unit_id).await?,
            a.star_date.map(|d| d.to_string()).unwrap_or_default(),
        ];
        if can_manage {
            row.push(link(
                &format!("/officer/{}/assignment/{}", officer.id, a.id),
                "Edit",
            ));
        }
        rows.push(row);
    }
    let mut headers = vec!["Badge", "Rank", "Unit", "Start date"];
    if can_manage {
        headers.push("");
    }

    let mut photos = String::new();
    for face in &faces {
        if let Some(image) = state.storage.get_image(face.img_id).await? {
            photos.push_str(&link(&format!("/tag/{}", face.id), &format!("Tag {}", face.id)));
            photos.push_str(&image_tag(&image, &officer.full_name()));
        }
    }
    if photos.is_empty() {
        photos.push_str("<p>No photos of this officer yet.</p>");
    }

    let mut body = format!(
        "<h1>Officer Detail: {}</h1>{}<p>{}</p><h3>Assignment History</h3>{}<h3>Photos</h3><div class=\"gallery\">{}</div>",
        escape(&officer.full_name()),
        details,
        complaint_link(&officer, assignments.last()),
        html::table(&headers, &rows),
        photos
    );

    if can_manage {
        let fields = assignment_fields(
            &state,
            officer.department_id,
            &AssignmentForm::default(),
            &FormErrors::new(),
        )
        .await?;
        body.push_str(&format!(
            "<section class=\"admin\"><h3>Admin only</h3><p>{}</p><h4>Add assignment</h4>{}</section>",
            link(&format!("/officer/{}/edit", officer.id), "Edit officer"),
            html::form(
                &format!("/officer/{}/assignment/new", officer.id),
                &fields,
                "Add Assignment"
            )
        ));
    }

    Ok(render(&req, &viewer, Page::new("Officer Detail", body)))
}

async fn add_officer_body(
    state: &AppState,
    form: &AddOfficerForm,
    errors: &FormErrors,
) -> Result<String> {
    let departments = department_options(state, false).await?;
    let units = unit_options(state, None).await?;
    let mut fields = html::text_input(
        "first_name",
        "First name",
        raw(&form.first_name),
        errors.field("first_name"),
    );
    fields.push_str(&html::text_input(
        "middle_initial",
        "Middle initial",
        raw(&form.middle_initial),
        errors.field("middle_initial"),
    ));
    fields.push_str(&html::text_input(
        "last_name",
        "Last name",
        raw(&form.last_name),
        errors.field("last_name"),
    ));
    fields.push_str(&html::select(
        "race",
        "Race",
        &Race::options(),
        raw(&form.race),
        errors.field("race"),
    ));
    fields.push_str(&html::select(
        "gender",
        "Gender",
        &Gender::options(),
        raw(&form.gender),
        errors.field("gender"),
    ));
    fields.push_str(&html::text_input(
        "star_no",
        "Badge number",
        raw(&form.star_no),
        errors.field("star_no"),
    ));
    fields.push_str(&html::select(
        "rank",
        "Rank",
        &Rank::options(),
        raw(&form.rank),
        errors.field("rank"),
    ));
    fields.push_str(&html::select("unit", "Unit", &units, raw(&form.unit), errors.field("unit")));
    fields.push_str(&html::input(
        "date",
        "employment_date",
        "Employment date",
        raw(&form.employment_date),
        errors.field("employment_date"),
    ));
    fields.push_str(&html::input(
        "number",
        "birth_year",
        "Birth year",
        raw(&form.birth_year),
        errors.field("birth_year"),
    ));
    fields.push_str(&html::text_input(
        "unique_internal_identifier",
        "Unique internal identifier",
        raw(&form.unique_internal_identifier),
        errors.field("unique_internal_identifier"),
    ));
    fields.push_str(&html::select(
        "department",
        "Department",
        &departments,
        raw(&form.department),
        errors.field("department"),
    ));
    Ok(format!("<h1>Add Officer</h1>{}", html::form("/officer/new", &fields, "Add Officer")))
}

pub async fn new_officer_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    require_ac_or_admin(&user)?;
    let mut form = AddOfficerForm::default();
    if let Some(dept) = user.ac_department_id {
        form.department = Some(dept.to_string());
    }
    let body = add_officer_body(&state, &form, &FormErrors::new()).await?;
    Ok(render(&req, &user.viewer(), Page::new("Add Officer", body)))
}

pub async fn new_officer(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<AddOfficerForm>,
) -> Result<HttpResponse> {
    require_ac_or_admin(&user)?;
    let validated = form.validate();
    let new = match validated {
        Ok(new) => new,
        Err(errors) => {
            let body = add_officer_body(&state, &form, &errors).await?;
            return Ok(render(&req, &user.viewer(), Page::new("Add Officer", body)));
        }
    };

    require_department(&user, new.department_id)?;
    department_or_404(&state, new.department_id).await?;

    let mut errors = FormErrors::new();
    check_unit(&state, new.unit_id, new.department_id, &mut errors).await?;
    if !errors.is_empty() {
        let body = add_officer_body(&state, &form, &errors).await?;
        return Ok(render(&req, &user.viewer(), Page::new("Add Officer", body)));
    }

    let officer = state.storage.create_officer(new).await?;
    info!("User {} added officer {}", user.username, officer.id);

    Ok(flash::redirect(
        &req,
        &format!("/officer/{}", officer.id),
        vec![FlashMessage::success(format!(
            "New Officer {} added!",
            officer.last_name
        ))],
    ))
}

fn form_from_officer(officer: &officer::Model) -> EditOfficerForm {
    EditOfficerForm {
        first_name: Some(officer.first_name.clone()),
        last_name: Some(officer.last_name.clone()),
        middle_initial: Some(officer.middle_initial.clone()),
        race: officer.race.clone(),
        gender: officer.gender.clone(),
        employment_date: officer.employment_date.map(|d| d.to_string()),
        birth_year: officer.birth_year.map(|y| y.to_string()),
        unique_internal_identifier: officer.unique_internal_identifier.clone(),
        department: Some(officer.department_id.to_string()),
    }
}

async fn edit_officer_body(
    state: &AppState,
    officer_id: i32,
    form: &EditOfficerForm,
    errors: &FormErrors,
) -> Result<String> {
    let departments = department_options(state, false).await?;
    let mut fields = html::text_input(
        "first_name",
        "First name",
        raw(&form.first_name),
        errors.field("first_name"),
    );
    fields.push_str(&html::text_input(
        "middle_initial",
        "Middle initial",
        raw(&form.middle_initial),
        errors.field("middle_initial"),
    ));
    fields.push_str(&html::text_input(
        "last_name",
        "Last name",
        raw(&form.last_name),
        errors.field("last_name"),
    ));
    fields.push_str(&html::select(
        "race",
        "Race",
        &Race::options(),
        raw(&form.race),
        errors.field("race"),
    ));
    fields.push_str(&html::select(
        "gender",
        "Gender",
        &Gender::options(),
        raw(&form.gender),
        errors.field("gender"),
    ));
    fields.push_str(&html::input(
        "date",
        "employment_date",
        "Employment date",
        raw(&form.employment_date),
        errors.field("employment_date"),
    ));
    fields.push_str(&html::input(
        "number",
        "birth_year",
        "Birth year",
        raw(&form.birth_year),
        errors.field("birth_year"),
    ));
    fields.push_str(&html::text_input(
        "unique_internal_identifier",
        "Unique internal identifier",
        raw(&form.unique_internal_identifier),
        errors.field("unique_internal_identifier"),
    ));
    fields.push_str(&html::select(
        "department",
        "Department",
        &departments,
        raw(&form.department),
        errors.field("department"),
    ));
    Ok(format!(
        "<h1>Edit Officer</h1>{}",
        html::form(&format!("/officer/{}/edit", officer_id), &fields, "Update")
    ))
}

pub async fn edit_officer_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let officer = officer_or_404(&state, path.into_inner()).await?;
    require_department(&user, officer.department_id)?;
    let body = edit_officer_body(
        &state,
        officer.id,
        &form_from_officer(&officer),
        &FormErrors::new(),
    )
    .await?;
    Ok(render(&req, &user.viewer(), Page::new("Edit Officer", body)))
}

pub async fn edit_officer(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<EditOfficerForm>,
) -> Result<HttpResponse> {
    let officer = officer_or_404(&state, path.into_inner()).await?;
    require_department(&user, officer.department_id)?;

    let update = match form.validate() {
        Ok(update) => update,
        Err(errors) => {
            let body = edit_officer_body(&state, officer.id, &form, &errors).await?;
            return Ok(render(&req, &user.viewer(), Page::new("Edit Officer", body)));
        }
    };

    // moving an officer needs rights in the target department too
    if let Some(dept) = update.department_id
        && dept != officer.department_id
    {
        require_department(&user, dept)?;
        department_or_404(&state, dept).await?;
    }

    let updated = state.storage.update_officer(officer.id, update).await?;
    info!("User {} edited officer {}", user.username, updated.id);

    Ok(flash::redirect(
        &req,
        &format!("/officer/{}", updated.id),
        vec![FlashMessage::success(format!(
            "Officer {} edited",
            updated.last_name
        ))],
    ))
}

/// POST only
pub async fn add_assignment(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<AssignmentForm>,
) -> Result<HttpResponse> {
    let officer = officer_or_404(&state, path.into_inner()).await?;
    require_department(&user, officer.department_id)?;
    let profile = format!("/officer/{}", officer.id);

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(_) => {
            return Ok(flash::redirect(
                &req,
                &profile,
                vec![FlashMessage::danger("Error adding assignment. Please check the form.")],
            ));
        }
    };
    let mut errors = FormErrors::new();
    check_unit(&state, fields.unit_id, officer.department_id, &mut errors).await?;
    if !errors.is_empty() {
        return Ok(flash::redirect(
            &req,
            &profile,
            vec![FlashMessage::danger("Error adding assignment: unknown unit.")],
        ));
    }

    let AssignmentFields {
        star_no,
        rank,
        unit_id,
        star_date,
    } = fields;
    let assignment = state
        .storage
        .create_assignment(NewAssignment {
            officer_id: officer.id,
            star_no,
            rank,
            unit_id,
            star_date,
        })
        .await?;
    info!("User {} added assignment {} to officer {}", user.username, assignment.id, officer.id);

    Ok(flash::redirect(
        &req,
        &profile,
        vec![FlashMessage::success("Added new assignment!")],
    ))
}

async fn assignment_for(
    state: &AppState,
    officer: &officer::Model,
    assignment_id: i32,
) -> Result<assignment::Model> {
    state
        .storage
        .get_assignment(assignment_id)
        .await?
        .filter(|a| a.officer_id == officer.id)
        .ok_or_else(|| OversightError::not_found(format!("Assignment {} not found", assignment_id)))
}

fn form_from_assignment(a: &assignment::Model) -> AssignmentForm {
    AssignmentForm {
        star_no: a.star_no.clone(),
        rank: a.rank.clone(),
        unit: a.unit_id.map(|u| u.to_string()),
        star_date: a.star_date.map(|d| d.to_string()),
    }
}

pub async fn edit_assignment_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (officer_id, assignment_id) = path.into_inner();
    let officer = officer_or_404(&state, officer_id).await?;
    require_department(&user, officer.department_id)?;
    let assignment = assignment_for(&state, &officer, assignment_id).await?;

    let fields = assignment_fields(
        &state,
        officer.department_id,
        &form_from_assignment(&assignment),
        &FormErrors::new(),
    )
    .await?;
    let body = format!(
        "<h1>Edit Assignment for {}</h1>{}",
        escape(&officer.full_name()),
        html::form(
            &format!("/officer/{}/assignment/{}", officer.id, assignment.id),
            &fields,
            "Update"
        )
    );
    Ok(render(&req, &user.viewer(), Page::new("Edit Assignment", body)))
}

pub async fn edit_assignment(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    form: web::Form<AssignmentForm>,
) -> Result<HttpResponse> {
    let (officer_id, assignment_id) = path.into_inner();
    let officer = officer_or_404(&state, officer_id).await?;
    require_department(&user, officer.department_id)?;
    let assignment = assignment_for(&state, &officer, assignment_id).await?;

    let validated = form.validate();
    let mut errors = validated.as_ref().err().cloned().unwrap_or_default();
    if let Ok(fields) = &validated {
        check_unit(&state, fields.unit_id, officer.department_id, &mut errors).await?;
    }
    let fields = match validated {
        Ok(fields) if errors.is_empty() => fields,
        _ => {
            let inputs = assignment_fields(&state, officer.department_id, &form, &errors).await?;
            let body = format!(
                "<h1>Edit Assignment for {}</h1>{}",
                escape(&officer.full_name()),
                html::form(
                    &format!("/officer/{}/assignment/{}", officer.id, assignment.id),
                    &inputs,
                    "Update"
                )
            );
            return Ok(render(&req, &user.viewer(), Page::new("Edit Assignment", body)));
        }
    };

    state
        .storage
        .update_assignment(
            assignment.id,
            AssignmentUpdate {
                star_no: fields.star_no,
                rank: fields.rank,
                unit_id: fields.unit_id,
                star_date: fields.star_date,
            },
        )
        .await?;
    info!("User {} edited assignment {}", user.username, assignment.id);

    Ok(flash::redirect(
        &req,
        &format!("/officer/{}", officer.id),
        vec![FlashMessage::success("Edited officer assignment")],
    ))
}
