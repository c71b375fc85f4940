//! Password change and reset

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use super::tokens;
use crate::api::constants::HOME_PATH;
use crate::api::extractors::{CurrentUser, Viewer};
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::auth::{ChangePasswordForm, PasswordResetForm, PasswordResetRequestForm};
use crate::api::forms::{FormErrors, raw};
use crate::api::state::AppState;
use crate::api::views::html;
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::storage::UserUpdate;

fn change_password_body(errors: &FormErrors) -> String {
    let mut fields = html::password_input(
        "old_password",
        "Old password",
        errors.field("old_password"),
    );
    fields.push_str(&html::password_input("password", "New password", errors.field("password")));
    fields.push_str(&html::password_input(
        "password2",
        "Confirm new password",
        errors.field("password2"),
    ));
    format!(
        "<h1>Change Your Password</h1>{}",
        html::form("/auth/change-password", &fields, "Update Password")
    )
}

pub async fn change_password_page(req: HttpRequest, user: CurrentUser) -> HttpResponse {
    let page = Page::new("Change Password", change_password_body(&FormErrors::new()));
    render(&req, &user.viewer(), page)
}

pub async fn change_password(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<ChangePasswordForm>,
) -> Result<HttpResponse> {
    let change = match form.validate() {
        Ok(change) => change,
        Err(errors) => {
            let page = Page::new("Change Password", change_password_body(&errors));
            return Ok(render(&req, &user.viewer(), page));
        }
    };

    if !state.hasher.verify(&change.old_password, &user.password_hash)? {
        let page = Page::new("Change Password", change_password_body(&FormErrors::new()))
            .message(FlashMessage::danger("Invalid password."));
        return Ok(render(&req, &user.viewer(), page));
    }

    let password_hash = state.hasher.hash(&change.password)?;
    state
        .storage
        .update_user(
            user.id(),
            UserUpdate {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;
    info!("User {} changed their password", user.username);

    Ok(flash::redirect(
        &req,
        HOME_PATH,
        vec![FlashMessage::success("Your password has been updated.")],
    ))
}

fn reset_request_body(form: &PasswordResetRequestForm, errors: &FormErrors) -> String {
    let fields = html::text_input("email", "Email", raw(&form.email), errors.field("email"));
    format!(
        "<h1>Reset Your Password</h1>{}",
        html::form("/auth/reset", &fields, "Reset Password")
    )
}

/// Logged in users have no use for the reset pages
fn anonymous_only(req: &HttpRequest, viewer: &Viewer) -> Option<HttpResponse> {
    viewer
        .is_authenticated()
        .then(|| flash::redirect(req, HOME_PATH, Vec::new()))
}

pub async fn reset_request_page(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    if let Some(resp) = anonymous_only(&req, &viewer) {
        return resp;
    }
    let body = reset_request_body(&PasswordResetRequestForm::default(), &FormErrors::new());
    render(&req, &viewer, Page::new("Reset Password", body))
}

pub async fn reset_request(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    form: web::Form<PasswordResetRequestForm>,
) -> Result<HttpResponse> {
    if let Some(resp) = anonymous_only(&req, &viewer) {
        return Ok(resp);
    }
    let email = match form.validate() {
        Ok(email) => email,
        Err(errors) => {
            let body = reset_request_body(&form, &errors);
            return Ok(render(&req, &viewer, Page::new("Reset Password", body)));
        }
    };

    // the same answer whether or not the address is known
    if let Some(user) = state.storage.find_user_by_email(&email).await? {
        tokens::send_password_reset(&state, &user).await?;
    }

    Ok(flash::redirect(
        &req,
        "/auth/login",
        vec![FlashMessage::info(
            "An email with instructions to reset your password has been sent to you.",
        )],
    ))
}

fn reset_body(token: &str, form: &PasswordResetForm, errors: &FormErrors) -> String {
    let mut fields = html::text_input("email", "Email", raw(&form.email), errors.field("email"));
    fields.push_str(&html::password_input("password", "New password", errors.field("password")));
    fields.push_str(&html::password_input(
        "password2",
        "Confirm password",
        errors.field("password2"),
    ));
    format!(
        "<h1>Reset Your Password</h1>{}",
        html::form(&format!("/auth/reset/{}", token), &fields, "Reset Password")
    )
}

pub async fn reset_page(
    req: HttpRequest,
    viewer: Viewer,
    token: web::Path<String>,
) -> HttpResponse {
    if let Some(resp) = anonymous_only(&req, &viewer) {
        return resp;
    }
    let body = reset_body(&token, &PasswordResetForm::default(), &FormErrors::new());
    render(&req, &viewer, Page::new("Reset Password", body))
}

pub async fn reset(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    token: web::Path<String>,
    form: web::Form<PasswordResetForm>,
) -> Result<HttpResponse> {
    if let Some(resp) = anonymous_only(&req, &viewer) {
        return Ok(resp);
    }
    let reset = match form.validate() {
        Ok(reset) => reset,
        Err(errors) => {
            let body = reset_body(&token, &form, &errors);
            return Ok(render(&req, &viewer, Page::new("Reset Password", body)));
        }
    };

    let Some(user) = state.storage.find_user_by_email(&reset.email).await? else {
        return Ok(flash::redirect(&req, HOME_PATH, Vec::new()));
    };

    if tokens::reset_password(&state, &user, &token, &reset.password).await? {
        Ok(flash::redirect(
            &req,
            "/auth/login",
            vec![FlashMessage::success("Your password has been updated.")],
        ))
    } else {
        Ok(flash::redirect(&req, HOME_PATH, Vec::new()))
    }
}
