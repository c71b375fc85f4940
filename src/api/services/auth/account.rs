//! Login, logout, registration and account confirmation

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{info, warn};

use super::tokens;
use crate::api::constants::HOME_PATH;
use crate::api::extractors::{CurrentUser, Viewer, safe_next};
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::auth::{LoginForm, RegistrationForm};
use crate::api::forms::validators::checkbox;
use crate::api::forms::{FormErrors, raw};
use crate::api::state::AppState;
use crate::api::views::html::{self, link};
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::storage::NewUser;

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

fn login_body(form: &LoginForm, errors: &FormErrors, next: Option<&str>) -> String {
    let mut fields = html::text_input("email", "Email", raw(&form.email), errors.field("email"));
    fields.push_str(&html::password_input("password", "Password", errors.field("password")));
    fields.push_str(&html::checkbox(
        "remember_me",
        "Keep me logged in",
        checkbox(&form.remember_me),
    ));
    if let Some(next) = next {
        fields.push_str(&html::hidden("next", next));
    }
    format!(
        "<h1>Log In</h1>{}<p>{}</p><p>{}</p>",
        html::form("/auth/login", &fields, "Log In"),
        link("/auth/reset", "Forgot your password?"),
        link("/auth/register", "New user? Click here to register."),
    )
}

pub async fn login_page(
    req: HttpRequest,
    viewer: Viewer,
    query: web::Query<NextQuery>,
) -> HttpResponse {
    let next = safe_next(query.next.as_deref());
    let body = login_body(&LoginForm::default(), &FormErrors::new(), next.as_deref());
    render(&req, &viewer, Page::new("Log In", body))
}

pub async fn login(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let next = safe_next(form.next.as_deref().or(query.next.as_deref()));

    let credentials = match form.validate() {
        Ok(c) => c,
        Err(errors) => {
            let body = login_body(&form, &errors, next.as_deref());
            return Ok(render(&req, &viewer, Page::new("Log In", body)));
        }
    };

    let user = state.storage.find_user_by_email(&credentials.email).await?;
    let verified = match &user {
        Some(user) => state.hasher.verify(&credentials.password, &user.password_hash)?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            info!("Failed login attempt for {}", credentials.email);
            let body = login_body(&form, &FormErrors::new(), next.as_deref());
            let page = Page::new("Log In", body)
                .message(FlashMessage::danger("Invalid username or password."));
            return Ok(render(&req, &viewer, page));
        }
    };

    if user.is_disabled {
        warn!("Disabled user {} tried to log in", user.username);
        let body = login_body(&form, &FormErrors::new(), next.as_deref());
        let page =
            Page::new("Log In", body).message(FlashMessage::danger("User has been disabled."));
        return Ok(render(&req, &viewer, page));
    }

    let token = state
        .tokens
        .generate_session_token(user.id, credentials.remember)?;
    info!("User {} logged in", user.username);

    let location = next.unwrap_or_else(|| HOME_PATH.to_string());
    Ok(
        flash::redirect_builder(&req, StatusCode::FOUND, &location, Vec::new())
            .cookie(state.session_cookie(token, credentials.remember))
            .finish(),
    )
}

pub async fn logout(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> HttpResponse {
    info!("User {} logged out", user.username);
    flash::redirect_builder(
        &req,
        StatusCode::FOUND,
        HOME_PATH,
        vec![FlashMessage::info("You have been logged out.")],
    )
    .cookie(state.expired_session_cookie())
    .finish()
}

fn register_body(form: &RegistrationForm, errors: &FormErrors) -> String {
    let mut fields = html::text_input("email", "Email", raw(&form.email), errors.field("email"));
    fields.push_str(&html::text_input(
        "username",
        "Username",
        raw(&form.username),
        errors.field("username"),
    ));
    fields.push_str(&html::password_input("password", "Password", errors.field("password")));
    fields.push_str(&html::password_input(
        "password2",
        "Confirm password",
        errors.field("password2"),
    ));
    format!(
        "<h1>Register</h1><p>Passwords must be between 8 and 64 characters.</p>{}",
        html::form("/auth/register", &fields, "Register")
    )
}

pub async fn register_page(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    let body = register_body(&RegistrationForm::default(), &FormErrors::new());
    render(&req, &viewer, Page::new("Register", body))
}

pub async fn register(
    req: HttpRequest,
    viewer: Viewer,
    state: web::Data<AppState>,
    form: web::Form<RegistrationForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let validated = form.validate();
    let mut errors = validated.as_ref().err().cloned().unwrap_or_default();

    // uniqueness is reported alongside the shape errors
    if let Some(email) = form.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
        && state.storage.find_user_by_email(email).await?.is_some()
    {
        errors.add("email", "Email already registered.");
    }
    if let Some(username) = form.username.as_deref().map(str::trim).filter(|u| !u.is_empty())
        && state.storage.find_user_by_username(username).await?.is_some()
    {
        errors.add("username", "Username already in use.");
    }

    let registration = match validated {
        Ok(r) if errors.is_empty() => r,
        _ => {
            let body = register_body(&form, &errors);
            return Ok(render(&req, &viewer, Page::new("Register", body)));
        }
    };

    let password_hash = state.hasher.hash(&registration.password)?;
    let user = state
        .storage
        .create_user(NewUser {
            email: registration.email,
            username: registration.username,
            password_hash,
            confirmed: false,
            is_administrator: false,
            is_area_coordinator: false,
            ac_department_id: None,
        })
        .await?;
    info!("Registered user {}", user.username);

    tokens::send_confirmation(&state, &user).await?;
    Ok(flash::redirect(
        &req,
        "/auth/login",
        vec![FlashMessage::info("A confirmation email has been sent to you.")],
    ))
}

pub async fn unconfirmed(req: HttpRequest, viewer: Viewer) -> HttpResponse {
    match viewer.user() {
        Some(user) if !user.confirmed => {
            let body = format!(
                "<h1>Hello, {}!</h1><h3>Please Confirm Your Account</h3>\
                 <p>You have not confirmed your account yet. Before you can access this site you need to confirm your account. Check your inbox, you should have received an email with a confirmation link.</p>\
                 <p>Need another confirmation email? {}</p>",
                html::escape(&user.username),
                link("/auth/confirm", "Click here")
            );
            render(&req, &viewer, Page::new("Confirm your account", body))
        }
        _ => flash::redirect(&req, HOME_PATH, Vec::new()),
    }
}

pub async fn confirm(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    token: web::Path<String>,
) -> Result<HttpResponse> {
    if user.confirmed {
        return Ok(flash::redirect(&req, HOME_PATH, Vec::new()));
    }
    let message = if tokens::confirm_account(&state, &user, &token).await? {
        FlashMessage::success("You have confirmed your account. Thanks!")
    } else {
        FlashMessage::danger("The confirmation link is invalid or has expired.")
    };
    Ok(flash::redirect(&req, HOME_PATH, vec![message]))
}

pub async fn resend_confirmation(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    tokens::send_confirmation(&state, &user).await?;
    Ok(flash::redirect(
        &req,
        HOME_PATH,
        vec![FlashMessage::info("A new confirmation email has been sent to you.")],
    ))
}
