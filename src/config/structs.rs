use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Cookie SameSite 策略
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "Invalid SameSite policy: '{}'. Valid: Strict, Lax, None",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 服务器地址、端口、CPU 数量
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - auth: 会话、令牌和密码哈希
/// - mail: 发件人和邮件中的链接地址
/// - uploads: 图片上传目录
/// - site: 页面展示相关
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：OO，分隔符：__
    /// 示例：OO__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("OO")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for session cookies and emailed tokens.
    /// Empty = random per process.
    #[serde(default)]
    pub secret_key: String,
    /// Lifetime of a session without "remember me"
    #[serde(default = "default_session_hours")]
    pub session_hours: u64,
    /// Lifetime of a "remember me" session
    #[serde(default = "default_remember_days")]
    pub remember_days: u64,
    /// Lifetime of confirmation / reset / email change tokens
    #[serde(default = "default_token_expiry_secs")]
    pub token_expiry_secs: u64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub cookie_same_site: SameSitePolicy,
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
}

/// 邮件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_sender")]
    pub sender: String,
    /// Absolute URL prefix for links in outgoing mail
    #[serde(default = "default_mail_base_url")]
    pub base_url: String,
    #[serde(default = "default_mail_subject_prefix")]
    pub subject_prefix: String,
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_directory")]
    pub directory: String,
    #[serde(default = "default_upload_max_size_mb")]
    pub max_size_mb: u64,
}

/// 页面展示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_officers_per_page")]
    pub officers_per_page: u64,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: u64,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "openoversight.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_session_hours() -> u64 {
    12
}

fn default_remember_days() -> u64 {
    30
}

fn default_token_expiry_secs() -> u64 {
    3600
}

fn default_argon2_memory_kib() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_mail_sender() -> String {
    "OpenOversight Admin <openoversight@example.org>".to_string()
}

fn default_mail_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_mail_subject_prefix() -> String {
    "[OpenOversight]".to_string()
}

fn default_upload_directory() -> String {
    "uploads".to_string()
}

fn default_upload_max_size_mb() -> u64 {
    10
}

fn default_officers_per_page() -> u64 {
    20
}

fn default_leaderboard_size() -> u64 {
    20
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            session_hours: default_session_hours(),
            remember_days: default_remember_days(),
            token_expiry_secs: default_token_expiry_secs(),
            cookie_secure: false,
            cookie_same_site: SameSitePolicy::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: default_mail_sender(),
            base_url: default_mail_base_url(),
            subject_prefix: default_mail_subject_prefix(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_upload_directory(),
            max_size_mb: default_upload_max_size_mb(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            officers_per_page: default_officers_per_page(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("[auth]"));

        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config must parse");
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.auth.token_expiry_secs, 3600);
        assert_eq!(parsed.auth.cookie_same_site, SameSitePolicy::Lax);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [database]
            database_url = "sqlite://test.db"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.database.database_url, "sqlite://test.db");
        assert_eq!(parsed.database.pool_size, 10);
        assert_eq!(parsed.site.officers_per_page, 20);
    }

    #[test]
    fn test_same_site_from_str() {
        assert_eq!("strict".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Strict));
        assert!("sideways".parse::<SameSitePolicy>().is_err());
    }
}
