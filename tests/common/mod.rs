//! 集成测试公共设施
//!
//! Every test gets its own SQLite file seeded with the demo data set and a
//! cookie-carrying client that follows redirects like a browser.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::web;
use tempfile::TempDir;

use openoversight::api::create_app;
use openoversight::api::state::AppState;
use openoversight::config::StaticConfig;
use openoversight::services::MemoryMailer;
use openoversight::storage::seed::seed_demo_data;
use openoversight::storage::{SeaOrmStorage, StorageFactory};

pub const USER_EMAIL: &str = "jen@example.org";
pub const USER_PASSWORD: &str = "dog";
pub const ADMIN_EMAIL: &str = "redshiftzero@example.org";
pub const ADMIN_PASSWORD: &str = "cat";
pub const AC_EMAIL: &str = "raq929@example.org";
pub const AC_PASSWORD: &str = "horse";
pub const UNCONFIRMED_EMAIL: &str = "freddy@example.org";
pub const UNCONFIRMED_PASSWORD: &str = "dog";

pub struct TestContext {
    _dir: TempDir,
    pub state: web::Data<AppState>,
    pub mailer: MemoryMailer,
}

impl TestContext {
    pub fn storage(&self) -> &SeaOrmStorage {
        &self.state.storage
    }
}

pub fn test_config(dir: &TempDir) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.database.database_url =
        format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    config.uploads.directory = dir.path().join("uploads").to_string_lossy().into_owned();
    config.uploads.max_size_mb = 1;
    config.auth.secret_key = "integration-test-secret".to_string();
    // 测试中使用最低的哈希成本
    config.auth.argon2_memory_kib = 1024;
    config.auth.argon2_iterations = 1;
    config
}

/// Fresh database with the demo data set
pub async fn setup() -> TestContext {
    let dir = TempDir::new().expect("创建临时目录失败");
    let config = Arc::new(test_config(&dir));
    let storage = StorageFactory::create(&config.database)
        .await
        .expect("创建存储失败");
    let mailer = MemoryMailer::new();
    let state = AppState::new(config, storage, Arc::new(mailer.clone()))
        .expect("创建状态失败");
    seed_demo_data(&state.storage, &state.hasher)
        .await
        .expect("导入演示数据失败");

    TestContext {
        _dir: dir,
        state: web::Data::new(state),
        mailer,
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(create_app(ctx.state.clone())).await
}

/// A followed response
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub path: String,
    pub body: String,
}

impl Page {
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// Browser-like client: keeps cookies, follows redirects
pub struct Client<S> {
    app: S,
    cookies: HashMap<String, String>,
}

impl<S, B> Client<S>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    pub fn new(app: S) -> Self {
        Self {
            app,
            cookies: HashMap::new(),
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    fn with_cookies(&self, mut req: TestRequest) -> TestRequest {
        for (name, value) in &self.cookies {
            req = req.cookie(Cookie::new(name.clone(), value.clone()));
        }
        req
    }

    fn store_cookies(&mut self, resp: &ServiceResponse<B>) {
        for cookie in resp.response().cookies() {
            let removed = cookie.max_age().is_some_and(|age| age.is_zero())
                || cookie.value().is_empty();
            if removed {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies
                    .insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
    }

    /// Single request, no redirect handling; returns status, location and body
    pub async fn send(&mut self, req: TestRequest) -> (StatusCode, Option<String>, String) {
        let req = self.with_cookies(req).to_request();
        let resp = test::call_service(&self.app, req).await;
        self.store_cookies(&resp);
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = test::read_body(resp).await;
        (status, location, String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn get_raw(&mut self, path: &str) -> (StatusCode, Option<String>) {
        let (status, location, _) = self.send(TestRequest::get().uri(path)).await;
        (status, location)
    }

    pub async fn post_raw(
        &mut self,
        path: &str,
        form: &[(&str, &str)],
    ) -> (StatusCode, Option<String>) {
        let (status, location, _) = self
            .send(TestRequest::post().uri(path).set_form(form))
            .await;
        (status, location)
    }

    async fn follow(
        &mut self,
        method: Method,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Page {
        let mut method = method;
        let mut path = path.to_string();
        for _ in 0..10 {
            let mut req = TestRequest::default().method(method.clone()).uri(&path);
            if method == Method::POST
                && let Some(form) = form
            {
                req = req.set_form(form);
            }
            let (status, location, body) = self.send(req).await;
            match (status, location) {
                (StatusCode::TEMPORARY_REDIRECT, Some(location)) => path = location,
                (s, Some(location)) if s.is_redirection() => {
                    method = Method::GET;
                    path = location;
                }
                _ => return Page { status, path, body },
            }
        }
        panic!("too many redirects starting at {}", path);
    }

    pub async fn get(&mut self, path: &str) -> Page {
        self.follow(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> Page {
        self.follow(Method::POST, path, Some(form)).await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Page {
        self.post("/auth/login", &[("email", email), ("password", password)])
            .await
    }

    pub async fn login_user(&mut self) -> Page {
        self.login(USER_EMAIL, USER_PASSWORD).await
    }

    pub async fn login_admin(&mut self) -> Page {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn login_ac(&mut self) -> Page {
        self.login(AC_EMAIL, AC_PASSWORD).await
    }

    pub async fn logout(&mut self) -> Page {
        self.get("/auth/logout").await
    }
}

/// The path of the first link in a mail body
pub fn link_path(body: &str) -> String {
    let start = body.find("http").expect("mail has a link");
    let url: String = body[start..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(&url);
    match after_scheme.find('/') {
        Some(i) => after_scheme[i..].to_string(),
        None => "/".to_string(),
    }
}
