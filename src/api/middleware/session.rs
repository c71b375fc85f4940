//! 会话中间件
//!
//! Decodes the session cookie, loads the user and stores a [`Viewer`] in the
//! request extensions. Disabled users and stale tokens are anonymous.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, trace, warn};

use crate::api::constants;
use crate::api::extractors::Viewer;
use crate::api::state::AppState;

#[derive(Clone, Default)]
pub struct SessionLoader;

impl<S, B> Transform<S, ServiceRequest> for SessionLoader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionLoaderMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionLoaderMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionLoaderMiddleware<S> {
    service: Rc<S>,
}

async fn load_viewer(state: &AppState, token: &str) -> Viewer {
    let user_id = match state.tokens.validate_session_token(token) {
        Ok(id) => id,
        Err(e) => {
            debug!("Session token rejected: {}", e);
            return Viewer::anonymous();
        }
    };

    match state.storage.get_user(user_id).await {
        Ok(Some(user)) if user.is_disabled => {
            debug!("Session for disabled user {} ignored", user.id);
            Viewer::anonymous()
        }
        Ok(Some(user)) => Viewer(Some(user)),
        Ok(None) => {
            debug!("Session refers to missing user {}", user_id);
            Viewer::anonymous()
        }
        Err(e) => {
            warn!("Failed to load session user {}: {}", user_id, e);
            Viewer::anonymous()
        }
    }
}

impl<S, B> Service<ServiceRequest> for SessionLoaderMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let token = req
                .cookie(constants::SESSION_COOKIE_NAME)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty());
            let state = req.app_data::<web::Data<AppState>>().cloned();

            let viewer = match (token, state) {
                (Some(token), Some(state)) => load_viewer(&state, &token).await,
                (Some(_), None) => {
                    warn!("AppState missing; session cookie ignored");
                    Viewer::anonymous()
                }
                _ => Viewer::anonymous(),
            };

            trace!(
                "Session viewer: {}",
                viewer.user().map(|u| u.username.as_str()).unwrap_or("anonymous")
            );
            req.extensions_mut().insert(viewer);
            srv.call(req).await
        })
    }
}
