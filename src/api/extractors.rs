//! Request user extractors
//!
//! `SessionLoader` puts a [`Viewer`] into the request extensions; handlers
//! pull it out with these extractors.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};

use crate::api::permissions;
use crate::errors::OversightError;

use migration::entities::user;

/// The user behind the request, if any
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<user::Model>);

impl Viewer {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(&self) -> Option<&user::Model> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(permissions::is_administrator)
    }

    pub fn can_manage(&self, department_id: i32) -> bool {
        self.0
            .as_ref()
            .is_some_and(|u| permissions::can_manage_department(u, department_id))
    }
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req.extensions().get::<Viewer>().cloned().unwrap_or_default()))
    }
}

/// A logged in user; anonymous requests are sent to the login page
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    /// The same user as a [`Viewer`], for rendering
    pub fn viewer(&self) -> Viewer {
        Viewer(Some(self.0.clone()))
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = user::Model;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = OversightError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<Viewer>().and_then(|v| v.0.clone());
        ready(match user {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                let next = match req.uri().query() {
                    Some(q) if !q.is_empty() => format!("{}?{}", req.path(), q),
                    _ => req.path().to_string(),
                };
                Err(OversightError::login_required(next))
            }
        })
    }
}

/// Only relative, same-site paths are followed after login
pub fn safe_next(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    let is_safe = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.contains("://");
    is_safe.then(|| next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/officer/3")), Some("/officer/3".to_string()));
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("https://evil.example/")), None);
        assert_eq!(safe_next(Some("officer/3")), None);
        assert_eq!(safe_next(None), None);
    }

    #[actix_web::test]
    async fn test_current_user_requires_login() {
        let req = TestRequest::with_uri("/leaderboard?x=1").to_http_request();
        let err = CurrentUser::extract(&req).await.unwrap_err();
        assert_eq!(err.message(), "/leaderboard?x=1");
    }

    #[actix_web::test]
    async fn test_viewer_defaults_to_anonymous() {
        let req = TestRequest::default().to_http_request();
        let viewer = Viewer::extract(&req).await.unwrap();
        assert!(!viewer.is_authenticated());
        assert!(!viewer.is_admin());
        assert!(!viewer.can_manage(1));
    }
}
