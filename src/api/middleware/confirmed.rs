//! Sends logged in but unconfirmed users to the confirmation notice

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::LOCATION,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

use crate::api::extractors::Viewer;

#[derive(Clone, Default)]
pub struct ConfirmedGuard;

impl<S, B> Transform<S, ServiceRequest> for ConfirmedGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ConfirmedGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ConfirmedGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ConfirmedGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ConfirmedGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
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
            let unconfirmed = req
                .extensions()
                .get::<Viewer>()
                .and_then(|v| v.user())
                .is_some_and(|u| !u.confirmed);

            if unconfirmed {
                debug!("Unconfirmed user redirected from {}", req.path());
                return Ok(req.into_response(
                    HttpResponse::Found()
                        .insert_header((LOCATION, "/auth/unconfirmed"))
                        .finish()
                        .map_into_right_body(),
                ));
            }

            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
