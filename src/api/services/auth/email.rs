//! Email address change and default department preference

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use super::tokens;
use crate::api::constants::HOME_PATH;
use crate::api::extractors::CurrentUser;
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::auth::{ChangeDefaultDepartmentForm, ChangeEmailForm};
use crate::api::forms::{FormErrors, raw};
use crate::api::services::helpers::department_options;
use crate::api::state::AppState;
use crate::api::views::html;
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::storage::UserUpdate;

fn change_email_body(form: &ChangeEmailForm, errors: &FormErrors) -> String {
    let mut fields = html::text_input(
        "email",
        "New Email",
        raw(&form.email),
        errors.field("email"),
    );
    fields.push_str(&html::password_input("password", "Password", errors.field("password")));
    format!(
        "<h1>Change Your Email Address</h1>{}",
        html::form("/auth/change-email", &fields, "Update Email Address")
    )
}

pub async fn change_email_page(req: HttpRequest, user: CurrentUser) -> HttpResponse {
    let body = change_email_body(&ChangeEmailForm::default(), &FormErrors::new());
    render(&req, &user.viewer(), Page::new("Change Email", body))
}

pub async fn change_email_request(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<ChangeEmailForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let validated = form.validate();
    let mut errors = validated.as_ref().err().cloned().unwrap_or_default();
    if let Ok(change) = &validated
        && state.storage.find_user_by_email(&change.email).await?.is_some()
    {
        errors.add("email", "Email already registered.");
    }

    let change = match validated {
        Ok(change) if errors.is_empty() => change,
        _ => {
            let body = change_email_body(&form, &errors);
            return Ok(render(&req, &user.viewer(), Page::new("Change Email", body)));
        }
    };

    if !state.hasher.verify(&change.password, &user.password_hash)? {
        let page = Page::new("Change Email", change_email_body(&form, &FormErrors::new()))
            .message(FlashMessage::danger("Invalid email or password."));
        return Ok(render(&req, &user.viewer(), page));
    }

    tokens::send_email_change(&state, &user, &change.email).await?;
    Ok(flash::redirect(
        &req,
        HOME_PATH,
        vec![FlashMessage::info(
            "An email with instructions to confirm your new email address has been sent to you.",
        )],
    ))
}

pub async fn change_email(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    token: web::Path<String>,
) -> Result<HttpResponse> {
    let message = if tokens::change_email(&state, &user, &token).await? {
        FlashMessage::success("Your email address has been updated.")
    } else {
        FlashMessage::danger("Invalid request.")
    };
    Ok(flash::redirect(&req, HOME_PATH, vec![message]))
}

async fn change_dept_body(state: &AppState, selected: Option<i32>) -> Result<String> {
    let options = department_options(state, true).await?;
    let selected = selected.map(|d| d.to_string()).unwrap_or_default();
    let fields = html::select("dept_pref", "Default department", &options, &selected, &[]);
    Ok(format!(
        "<h1>Change Default Department</h1>{}",
        html::form("/auth/change-dept", &fields, "Update")
    ))
}

pub async fn change_dept_page(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = change_dept_body(&state, user.dept_pref).await?;
    Ok(render(&req, &user.viewer(), Page::new("Default Department", body)))
}

pub async fn change_dept(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<ChangeDefaultDepartmentForm>,
) -> Result<HttpResponse> {
    let dept_pref = match form.validate() {
        Ok(dept) => dept,
        Err(_) => {
            let body = change_dept_body(&state, user.dept_pref).await?;
            let page = Page::new("Default Department", body)
                .message(FlashMessage::danger("Not a valid department."));
            return Ok(render(&req, &user.viewer(), page));
        }
    };

    if let Some(id) = dept_pref
        && state.storage.get_department(id).await?.is_none()
    {
        let body = change_dept_body(&state, user.dept_pref).await?;
        let page = Page::new("Default Department", body)
            .message(FlashMessage::danger("Not a valid department."));
        return Ok(render(&req, &user.viewer(), page));
    }

    state
        .storage
        .update_user(
            user.id(),
            UserUpdate {
                dept_pref: Some(dept_pref),
                ..Default::default()
            },
        )
        .await?;
    info!("User {} set default department {:?}", user.username, dept_pref);

    Ok(flash::redirect(
        &req,
        HOME_PATH,
        vec![FlashMessage::success("Updated!")],
    ))
}
