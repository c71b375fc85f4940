use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone)]
pub enum OversightError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Forbidden(String),
    /// Anonymous request to a login-only page; carries the path to return to
    LoginRequired(String),
    Unconfirmed,
    Serialization(String),
    Token(String),
    PasswordHash(String),
    Mail(String),
}

impl OversightError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            OversightError::DatabaseConfig(_) => "E001",
            OversightError::DatabaseConnection(_) => "E002",
            OversightError::DatabaseOperation(_) => "E003",
            OversightError::FileOperation(_) => "E004",
            OversightError::Validation(_) => "E005",
            OversightError::NotFound(_) => "E006",
            OversightError::Forbidden(_) => "E007",
            OversightError::LoginRequired(_) => "E008",
            OversightError::Unconfirmed => "E009",
            OversightError::Serialization(_) => "E010",
            OversightError::Token(_) => "E011",
            OversightError::PasswordHash(_) => "E012",
            OversightError::Mail(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            OversightError::DatabaseConfig(_) => "Database Configuration Error",
            OversightError::DatabaseConnection(_) => "Database Connection Error",
            OversightError::DatabaseOperation(_) => "Database Operation Error",
            OversightError::FileOperation(_) => "File Operation Error",
            OversightError::Validation(_) => "Validation Error",
            OversightError::NotFound(_) => "Resource Not Found",
            OversightError::Forbidden(_) => "Forbidden",
            OversightError::LoginRequired(_) => "Login Required",
            OversightError::Unconfirmed => "Account Not Confirmed",
            OversightError::Serialization(_) => "Serialization Error",
            OversightError::Token(_) => "Token Error",
            OversightError::PasswordHash(_) => "Password Hash Error",
            OversightError::Mail(_) => "Mail Delivery Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            OversightError::DatabaseConfig(msg) => msg,
            OversightError::DatabaseConnection(msg) => msg,
            OversightError::DatabaseOperation(msg) => msg,
            OversightError::FileOperation(msg) => msg,
            OversightError::Validation(msg) => msg,
            OversightError::NotFound(msg) => msg,
            OversightError::Forbidden(msg) => msg,
            OversightError::LoginRequired(next) => next,
            OversightError::Unconfirmed => "Please confirm your account",
            OversightError::Serialization(msg) => msg,
            OversightError::Token(msg) => msg,
            OversightError::PasswordHash(msg) => msg,
            OversightError::Mail(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// HTTP status used when this error ends a request
    pub fn http_status(&self) -> StatusCode {
        match self {
            OversightError::LoginRequired(_) | OversightError::Unconfirmed => StatusCode::FOUND,
            OversightError::Forbidden(_) => StatusCode::FORBIDDEN,
            OversightError::NotFound(_) => StatusCode::NOT_FOUND,
            OversightError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for OversightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OversightError {}

// 便捷的构造函数
impl OversightError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        OversightError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        OversightError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        OversightError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        OversightError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        OversightError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        OversightError::NotFound(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        OversightError::Forbidden(msg.into())
    }

    pub fn login_required<T: Into<String>>(next: T) -> Self {
        OversightError::LoginRequired(next.into())
    }

    pub fn token<T: Into<String>>(msg: T) -> Self {
        OversightError::Token(msg.into())
    }

    pub fn mail<T: Into<String>>(msg: T) -> Self {
        OversightError::Mail(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for OversightError {
    fn from(err: sea_orm::DbErr) -> Self {
        OversightError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for OversightError {
    fn from(err: std::io::Error) -> Self {
        OversightError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for OversightError {
    fn from(err: serde_json::Error) -> Self {
        OversightError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for OversightError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        OversightError::Token(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for OversightError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        OversightError::PasswordHash(err.to_string())
    }
}

impl ResponseError for OversightError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            OversightError::LoginRequired(next) => {
                let location = format!("/auth/login?next={}", urlencoding::encode(next));
                HttpResponse::Found()
                    .insert_header((LOCATION, location))
                    .finish()
            }
            OversightError::Unconfirmed => HttpResponse::Found()
                .insert_header((LOCATION, "/auth/unconfirmed"))
                .finish(),
            other => {
                let status = other.http_status();
                if status.is_server_error() {
                    tracing::error!("{}", other.format_simple());
                }
                // 服务端错误不向用户暴露内部细节
                let detail = if status.is_server_error() {
                    "Something went wrong on our end. Please try again later."
                } else {
                    other.message()
                };
                HttpResponse::build(status)
                    .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                    .body(crate::api::views::error_page(status, detail))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OversightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_required_redirects_with_next() {
        let resp = OversightError::login_required("/officer/new").error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, "/auth/login?next=%2Fofficer%2Fnew");
    }

    #[test]
    fn test_forbidden_is_403() {
        let err = OversightError::forbidden("not your department");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "E007");
    }

    #[test]
    fn test_database_errors_are_500() {
        let err: OversightError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.format_simple().starts_with("Database Operation Error"));
    }
}
