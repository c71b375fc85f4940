use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};

use crate::api::constants;
use crate::api::jwt::JwtService;
use crate::config::{SameSitePolicy, StaticConfig};
use crate::errors::Result;
use crate::services::{ImageStore, Mailer};
use crate::storage::SeaOrmStorage;
use crate::utils::password::PasswordHasher;

/// Everything a request handler needs, shared through `web::Data`
pub struct AppState {
    pub config: Arc<StaticConfig>,
    pub storage: Arc<SeaOrmStorage>,
    pub tokens: JwtService,
    pub hasher: PasswordHasher,
    pub mailer: Arc<dyn Mailer>,
    pub uploads: ImageStore,
}

impl AppState {
    pub fn new(
        config: Arc<StaticConfig>,
        storage: Arc<SeaOrmStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self> {
        let hasher = PasswordHasher::from_config(&config.auth)?;
        Ok(Self {
            tokens: JwtService::from_config(&config.auth),
            uploads: ImageStore::new(&config.uploads),
            hasher,
            config,
            storage,
            mailer,
        })
    }

    fn same_site(&self) -> SameSite {
        match self.config.auth.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        }
    }

    /// Session cookie; persistent only with "remember me"
    pub fn session_cookie(&self, token: String, remember: bool) -> Cookie<'static> {
        let mut cookie = Cookie::new(constants::SESSION_COOKIE_NAME, token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.config.auth.cookie_secure);
        cookie.set_same_site(self.same_site());
        if remember {
            let lifetime = self.tokens.session_lifetime(true);
            cookie.set_max_age(actix_web::cookie::time::Duration::seconds(
                lifetime.num_seconds(),
            ));
        }
        cookie
    }

    pub fn expired_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(constants::SESSION_COOKIE_NAME, "");
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(self.same_site());
        cookie.make_removal();
        cookie
    }
}
