//! 账户路由 `/auth`
//!
//! Each path is a single resource so unsupported methods answer 405.

use actix_web::web;

use super::account::{
    confirm, login, login_page, logout, register, register_page, resend_confirmation, unconfirmed,
};
use super::email::{
    change_dept, change_dept_page, change_email, change_email_page, change_email_request,
};
use super::password::{
    change_password, change_password_page, reset, reset_page, reset_request, reset_request_page,
};
use super::users::{edit_user, edit_user_page, list_users};

pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .service(
            web::resource("/login")
                .route(web::get().to(login_page))
                .route(web::post().to(login)),
        )
        .service(web::resource("/logout").route(web::get().to(logout)))
        .service(
            web::resource("/register")
                .route(web::get().to(register_page))
                .route(web::post().to(register)),
        )
        .service(web::resource("/unconfirmed").route(web::get().to(unconfirmed)))
        .service(web::resource("/confirm").route(web::get().to(resend_confirmation)))
        .service(web::resource("/confirm/{token}").route(web::get().to(confirm)))
        .service(
            web::resource("/change-password")
                .route(web::get().to(change_password_page))
                .route(web::post().to(change_password)),
        )
        .service(
            web::resource("/reset")
                .route(web::get().to(reset_request_page))
                .route(web::post().to(reset_request)),
        )
        .service(
            web::resource("/reset/{token}")
                .route(web::get().to(reset_page))
                .route(web::post().to(reset)),
        )
        .service(
            web::resource("/change-email")
                .route(web::get().to(change_email_page))
                .route(web::post().to(change_email_request)),
        )
        .service(web::resource("/change-email/{token}").route(web::get().to(change_email)))
        .service(
            web::resource("/change-dept")
                .route(web::get().to(change_dept_page))
                .route(web::post().to(change_dept)),
        )
        .service(web::resource("/users").route(web::get().to(list_users)))
        .service(
            web::resource("/users/{user_id:\\d+}")
                .route(web::get().to(edit_user_page))
                .route(web::post().to(edit_user)),
        )
}
