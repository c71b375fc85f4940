//! HTTP 层：路由、中间件、表单与页面渲染

pub mod constants;
pub mod extractors;
pub mod flash;
pub mod forms;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod services;
pub mod state;
pub mod views;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Compress;
use actix_web::{App, web};

use crate::errors::OversightError;
use middleware::{ConfirmedGuard, RequestLogger, SameOriginGuard, SessionLoader};
use services::{asset_routes, auth_routes, main_routes};
use state::AppState;

async fn not_found() -> Result<actix_web::HttpResponse, OversightError> {
    Err(OversightError::not_found("Page not found"))
}

/// Assemble the application for a worker (or a test)
///
/// Middleware runs outermost first: request logging, session loading, then
/// the same-origin check. The confirmed-account guard only covers the main
/// site so `/auth` stays reachable for unconfirmed users.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let upload_limit = state.uploads.max_bytes() + 64 * 1024;
    App::new()
        .app_data(state)
        .app_data(web::PayloadConfig::new(upload_limit))
        .app_data(web::FormConfig::default().limit(64 * 1024))
        .wrap(SameOriginGuard)
        .wrap(SessionLoader)
        .wrap(Compress::default())
        .wrap(RequestLogger)
        .service(auth_routes())
        .configure(asset_routes)
        .service(web::scope("").wrap(ConfirmedGuard).configure(main_routes))
        .default_service(web::to(not_found))
}
