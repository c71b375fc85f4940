//! API 模块常量定义
//!
//! 包含会话、Cookie 等相关的硬编码常量。

/// Session Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "oo_session";

/// Flash 消息 Cookie 名称
pub const FLASH_COOKIE_NAME: &str = "oo_flash";

/// Where users land after login / logout
pub const HOME_PATH: &str = "/index";
