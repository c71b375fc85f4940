//! Mailed account token checks
//!
//! Each operation returns `Ok(false)` for a token that is malformed, expired,
//! of the wrong kind, or issued for someone else.

use tracing::{debug, info};

use migration::entities::user;

use crate::api::jwt::{AccountClaims, TokenType};
use crate::api::state::AppState;
use crate::errors::Result;
use crate::services::AccountMails;
use crate::storage::UserUpdate;

fn claims_for(
    state: &AppState,
    user: &user::Model,
    token: &str,
    expected: TokenType,
) -> Option<AccountClaims> {
    match state.tokens.validate_account_token(token, expected) {
        Ok(claims) if claims.sub == user.id => Some(claims),
        Ok(claims) => {
            debug!(
                "{} token for user {} presented by user {}",
                expected, claims.sub, user.id
            );
            None
        }
        Err(e) => {
            debug!("{} token rejected: {}", expected, e);
            None
        }
    }
}

pub async fn confirm_account(state: &AppState, user: &user::Model, token: &str) -> Result<bool> {
    if claims_for(state, user, token, TokenType::Confirm).is_none() {
        return Ok(false);
    }
    if !user.confirmed {
        state
            .storage
            .update_user(
                user.id,
                UserUpdate {
                    confirmed: Some(true),
                    ..Default::default()
                },
            )
            .await?;
        info!("User {} confirmed their account", user.username);
    }
    Ok(true)
}

pub async fn reset_password(
    state: &AppState,
    user: &user::Model,
    token: &str,
    new_password: &str,
) -> Result<bool> {
    if claims_for(state, user, token, TokenType::Reset).is_none() {
        return Ok(false);
    }
    let password_hash = state.hasher.hash(new_password)?;
    state
        .storage
        .update_user(
            user.id,
            UserUpdate {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;
    info!("Password reset for user {}", user.username);
    Ok(true)
}

/// Moves the user to the address carried by the token, unless it was taken meanwhile
pub async fn change_email(state: &AppState, user: &user::Model, token: &str) -> Result<bool> {
    let Some(new_email) =
        claims_for(state, user, token, TokenType::ChangeEmail).and_then(|c| c.new_email)
    else {
        return Ok(false);
    };
    if state.storage.find_user_by_email(&new_email).await?.is_some() {
        debug!("Email change to {} refused, address in use", new_email);
        return Ok(false);
    }
    state
        .storage
        .update_user(
            user.id,
            UserUpdate {
                email: Some(new_email),
                ..Default::default()
            },
        )
        .await?;
    info!("User {} changed their email", user.username);
    Ok(true)
}

/// Issue a confirmation token and mail it
pub async fn send_confirmation(state: &AppState, user: &user::Model) -> Result<()> {
    let token = state
        .tokens
        .generate_account_token(TokenType::Confirm, user.id, None)?;
    let mail =
        AccountMails::new(&state.config.mail).confirm_account(&user.email, &user.username, &token);
    state.mailer.send(mail).await
}

pub async fn send_password_reset(state: &AppState, user: &user::Model) -> Result<()> {
    let token = state
        .tokens
        .generate_account_token(TokenType::Reset, user.id, None)?;
    let mail =
        AccountMails::new(&state.config.mail).reset_password(&user.email, &user.username, &token);
    state.mailer.send(mail).await
}

/// The confirmation goes to the new address
pub async fn send_email_change(
    state: &AppState,
    user: &user::Model,
    new_email: &str,
) -> Result<()> {
    let token = state
        .tokens
        .generate_account_token(TokenType::ChangeEmail, user.id, Some(new_email))?;
    let mail =
        AccountMails::new(&state.config.mail).change_email(new_email, &user.username, &token);
    state.mailer.send(mail).await
}
