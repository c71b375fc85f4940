use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::config::AuthConfig;

/// 令牌用途，写入 claims 的 `token_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TokenType {
    Session,
    Confirm,
    Reset,
    ChangeEmail,
}

/// Session cookie claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

/// Claims of the tokens mailed to users (confirmation, reset, email change)
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountClaims {
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
}

/// JWT Service for generating and validating tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_hours: u64,
    remember_days: u64,
    token_expiry_secs: u64,
}

impl JwtService {
    pub fn new(
        secret: &str,
        session_hours: u64,
        remember_days: u64,
        token_expiry_secs: u64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_hours,
            remember_days,
            token_expiry_secs,
        }
    }

    /// Create JwtService from config
    pub fn from_config(config: &AuthConfig) -> Self {
        // 密钥为空时生成随机值，重启后会话全部失效
        let secret = if config.secret_key.is_empty() {
            tracing::warn!(
                "auth.secret_key not configured, generating a random one; sessions will not survive restarts"
            );
            crate::utils::generate_secure_token(32)
        } else {
            config.secret_key.clone()
        };

        Self::new(
            &secret,
            config.session_hours,
            config.remember_days,
            config.token_expiry_secs,
        )
    }

    /// Lifetime of a session cookie in seconds
    pub fn session_lifetime(&self, remember: bool) -> Duration {
        if remember {
            Duration::days(self.remember_days as i64)
        } else {
            Duration::hours(self.session_hours as i64)
        }
    }

    /// Generate a session token for a logged in user
    pub fn generate_session_token(
        &self,
        user_id: i32,
        remember: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.session_lifetime(remember)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: TokenType::Session.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a session token, returning the user id
    pub fn validate_session_token(&self, token: &str) -> Result<i32, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != TokenType::Session.as_ref() {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims.sub)
    }

    /// Generate a mailed account token
    ///
    /// `new_email` is only meaningful for [`TokenType::ChangeEmail`].
    pub fn generate_account_token(
        &self,
        token_type: TokenType,
        user_id: i32,
        new_email: Option<&str>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccountClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry_secs as i64)).timestamp(),
            token_type: token_type.to_string(),
            new_email: new_email.map(str::to_string),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a mailed account token of the expected type
    pub fn validate_account_token(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<AccountClaims, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<AccountClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != expected.as_ref() {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test_secret_key_32_bytes_long!!", 12, 30, 3600)
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let service = create_test_service();
        let token = service.generate_session_token(7, false).unwrap();
        assert_eq!(service.validate_session_token(&token).unwrap(), 7);
    }

    #[test]
    fn test_remember_me_extends_lifetime() {
        let service = create_test_service();
        assert!(service.session_lifetime(true) > service.session_lifetime(false));
    }

    #[test]
    fn test_account_token_carries_new_email() {
        let service = create_test_service();
        let token = service
            .generate_account_token(TokenType::ChangeEmail, 1, Some("alice@example.org"))
            .unwrap();
        let claims = service
            .validate_account_token(&token, TokenType::ChangeEmail)
            .unwrap();

        assert_eq!(claims.sub, 1);
        assert_eq!(claims.token_type, "change_email");
        assert_eq!(claims.new_email.as_deref(), Some("alice@example.org"));
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = create_test_service();
        let reset = service
            .generate_account_token(TokenType::Reset, 1, None)
            .unwrap();

        assert!(service.validate_account_token(&reset, TokenType::Confirm).is_err());
        assert!(service.validate_session_token(&reset).is_err());

        let session = service.generate_session_token(1, true).unwrap();
        assert!(service.validate_account_token(&session, TokenType::Reset).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_session_token("beepboopbeep").is_err());
        assert!(
            service
                .validate_account_token("beepboopbeep", TokenType::Confirm)
                .is_err()
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = create_test_service();
        let service2 = JwtService::new("different_secret_key_32_bytes!!", 12, 30, 3600);

        let token = service1.generate_session_token(1, false).unwrap();
        assert!(service2.validate_session_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // 手动创建一个已过期的 token
        let service = create_test_service();

        let now = chrono::Utc::now();
        let claims = AccountClaims {
            sub: 1,
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
            token_type: "confirm".to_string(),
            new_email: None,
        };

        let encoding_key =
            jsonwebtoken::EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!");
        let token =
            jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &encoding_key).unwrap();

        let result = service.validate_account_token(&token, TokenType::Confirm);
        assert!(
            result.is_err(),
            "Expected expired token to be rejected, but got: {:?}",
            result
        );
    }
}
