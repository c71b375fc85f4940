//! User administration

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use migration::entities::user;

use crate::api::extractors::CurrentUser;
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::FormErrors;
use crate::api::forms::auth::EditUserForm;
use crate::api::forms::validators::checkbox;
use crate::api::permissions::require_admin;
use crate::api::services::helpers::{department_options, user_or_404};
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::{OversightError, Result};
use crate::storage::UserUpdate;

fn yes_no(value: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    text.to_string()
}

pub async fn list_users(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    require_admin(&user)?;
    let users = state.storage.list_users().await?;
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                link(&format!("/auth/users/{}", u.id), &u.username),
                escape(&u.email),
                yes_no(u.confirmed),
                yes_no(u.is_area_coordinator),
                yes_no(u.is_administrator),
                yes_no(u.is_disabled),
            ]
        })
        .collect();
    let body = format!(
        "<h1>Users</h1>{}",
        html::table(
            &["Username", "Email", "Confirmed", "Area Coordinator", "Administrator", "Disabled"],
            &rows,
        )
    );
    Ok(render(&req, &user.viewer(), Page::new("Users", body)))
}

async fn edit_user_body(
    state: &AppState,
    target: &user::Model,
    roles: &EditUserForm,
    errors: &FormErrors,
) -> Result<String> {
    let options = department_options(state, true).await?;
    let selected = roles.ac_department.clone().unwrap_or_default();
    let mut fields = html::checkbox(
        "is_area_coordinator",
        "Is area coordinator",
        checkbox(&roles.is_area_coordinator),
    );
    for e in errors.field("is_area_coordinator") {
        fields.push_str(&format!("<div class=\"form-error\">{}</div>", escape(e)));
    }
    fields.push_str(&html::select(
        "ac_department",
        "Area coordinator department",
        &options,
        &selected,
        errors.field("ac_department"),
    ));
    fields.push_str(&html::checkbox(
        "is_administrator",
        "Is administrator",
        checkbox(&roles.is_administrator),
    ));
    fields.push_str(&html::checkbox(
        "is_disabled",
        "Is disabled",
        checkbox(&roles.is_disabled),
    ));
    Ok(format!(
        "<h1>Edit User {}</h1><p>Email: {}</p>{}",
        escape(&target.username),
        escape(&target.email),
        html::form(&format!("/auth/users/{}", target.id), &fields, "Update")
    ))
}

fn form_from_user(target: &user::Model) -> EditUserForm {
    let flag = |v: bool| v.then(|| "y".to_string());
    EditUserForm {
        is_area_coordinator: flag(target.is_area_coordinator),
        ac_department: target.ac_department_id.map(|d| d.to_string()),
        is_administrator: flag(target.is_administrator),
        is_disabled: flag(target.is_disabled),
    }
}

pub async fn edit_user_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    require_admin(&user)?;
    let target = user_or_404(&state, path.into_inner()).await?;
    let body = edit_user_body(&state, &target, &form_from_user(&target), &FormErrors::new()).await?;
    Ok(render(&req, &user.viewer(), Page::new("Edit User", body)))
}

pub async fn edit_user(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<EditUserForm>,
) -> Result<HttpResponse> {
    require_admin(&user)?;
    let target = user_or_404(&state, path.into_inner()).await?;

    let mut validated = form.validate();
    if let Ok(roles) = &validated
        && let Some(dept) = roles.ac_department_id
        && state.storage.get_department(dept).await?.is_none()
    {
        let mut errors = FormErrors::new();
        errors.add("ac_department", "Not a valid choice");
        validated = Err(errors);
    }

    let roles = match validated {
        Ok(roles) => roles,
        Err(errors) => {
            let body = edit_user_body(&state, &target, &form, &errors).await?;
            return Ok(render(&req, &user.viewer(), Page::new("Edit User", body)));
        }
    };

    if target.id == user.id() && (!roles.is_administrator || roles.is_disabled) {
        return Err(OversightError::forbidden(
            "You cannot remove your own administrator rights",
        ));
    }

    let ac_department_id = if roles.is_area_coordinator {
        roles.ac_department_id
    } else {
        None
    };
    let updated = state
        .storage
        .update_user(
            target.id,
            UserUpdate {
                is_area_coordinator: Some(roles.is_area_coordinator),
                ac_department_id: Some(ac_department_id),
                is_administrator: Some(roles.is_administrator),
                is_disabled: Some(roles.is_disabled),
                ..Default::default()
            },
        )
        .await?;
    info!("Admin {} updated user {}", user.username, updated.username);

    Ok(flash::redirect(
        &req,
        &format!("/auth/users/{}", updated.id),
        vec![FlashMessage::success(format!(
            "{} has been updated!",
            updated.username
        ))],
    ))
}
