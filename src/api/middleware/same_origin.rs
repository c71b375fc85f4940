//! Cross-site form post protection
//!
//! Browsers send `Origin` on cross-site POSTs. When it is present on an unsafe
//! method its host must match the request host.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{CONTENT_TYPE, ORIGIN},
    },
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{trace, warn};

#[derive(Clone, Default)]
pub struct SameOriginGuard;

impl<S, B> Transform<S, ServiceRequest> for SameOriginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SameOriginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SameOriginMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SameOriginMiddleware<S> {
    service: Rc<S>,
}

/// 检查是否是安全方法（不修改资源）
fn is_safe_method(method: &Method) -> bool {
    matches!(method, &Method::GET | &Method::HEAD | &Method::OPTIONS)
}

/// Host part of an `Origin` value such as `https://example.org:8443`
pub(crate) fn origin_host(origin: &str) -> Option<&str> {
    let rest = origin.split_once("://").map(|(_, r)| r)?;
    let host = rest.split('/').next().unwrap_or(rest);
    (!host.is_empty()).then_some(host)
}

fn same_origin(req: &ServiceRequest) -> bool {
    let Some(origin) = req.headers().get(ORIGIN).and_then(|h| h.to_str().ok()) else {
        return true;
    };
    let conn = req.connection_info();
    match origin_host(origin) {
        Some(host) => host.eq_ignore_ascii_case(conn.host()),
        None => false,
    }
}

impl<S, B> Service<ServiceRequest> for SameOriginMiddleware<S>
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
            if is_safe_method(req.method()) || same_origin(&req) {
                trace!("Origin check passed for {} {}", req.method(), req.path());
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            warn!("Cross-origin {} to {} rejected", req.method(), req.path());
            Ok(req.into_response(
                HttpResponse::Forbidden()
                    .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                    .body("Cross-origin request rejected")
                    .map_into_right_body(),
            ))
        })
    }
}
