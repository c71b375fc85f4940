//! Public user profiles and the leaderboard

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use crate::api::extractors::CurrentUser;
use crate::api::flash::{self, FlashMessage};
use crate::api::permissions::require_admin;
use crate::api::services::helpers::user_or_404;
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::{OversightError, Result};
use crate::storage::{LeaderboardEntry, UserUpdate};

pub async fn profile(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();
    let target = state
        .storage
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| OversightError::not_found(format!("User {} not found", username)))?;

    let status = if target.is_disabled { "Disabled" } else { "Active" };
    let mut rows = vec![
        vec!["Username".into(), escape(&target.username)],
        vec!["Status".into(), status.to_string()],
        vec![
            "Member since".into(),
            target.created_at.format("%Y-%m-%d").to_string(),
        ],
    ];
    if user.is_administrator {
        rows.push(vec!["User Email".into(), escape(&target.email)]);
    }
    if let Some(dept) = target.dept_pref
        && let Some(department) = state.storage.get_department(dept).await?
    {
        rows.push(vec!["Default department".into(), escape(&department.name)]);
    }

    let mut body = format!(
        "<h1>Profile: {}</h1>{}",
        escape(&target.username),
        html::table(&["Field", "Value"], &rows)
    );
    if user.is_administrator {
        body.push_str(&format!(
            "<section class=\"admin\"><h3>Admin only</h3>{}<p>{}</p></section>",
            html::button_form(
                &format!("/user/toggle/{}", target.id),
                "Toggle (Disable/Enable) User"
            ),
            link(&format!("/auth/users/{}", target.id), "Edit user roles")
        ));
    }
    Ok(render(&req, &user.viewer(), Page::new("Profile", body)))
}

/// POST only
pub async fn toggle_user(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    require_admin(&user)?;
    let target = user_or_404(&state, path.into_inner()).await?;
    if target.id == user.id() {
        return Err(OversightError::forbidden("You cannot disable your own account"));
    }

    let updated = state
        .storage
        .update_user(
            target.id,
            UserUpdate {
                is_disabled: Some(!target.is_disabled),
                ..Default::default()
            },
        )
        .await?;
    info!(
        "User {} set disabled={} on {}",
        user.username, updated.is_disabled, updated.username
    );

    Ok(flash::redirect(
        &req,
        &format!("/user/{}", urlencoding::encode(&updated.username)),
        vec![FlashMessage::success(format!("{} has been updated!", updated.username))],
    ))
}

fn ranking(entries: &[LeaderboardEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                (i + 1).to_string(),
                link(&format!("/user/{}", urlencoding::encode(&e.user.username)), &e.user.username),
                e.count.to_string(),
            ]
        })
        .collect();
    html::table(&["Rank", "User", "Count"], &rows)
}

pub async fn leaderboard(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let limit = state.config.site.leaderboard_size;
    let sorters = state.storage.top_sorters(limit).await?;
    let taggers = state.storage.top_taggers(limit).await?;

    let body = format!(
        "<h1>Leaderboard</h1>\
         <h3>Top Users by Number of Images Sorted</h3>{}\
         <h3>Top Users by Number of Images Tagged</h3>{}",
        ranking(&sorters),
        ranking(&taggers)
    );
    Ok(render(&req, &user.viewer(), Page::new("Leaderboard", body)))
}
