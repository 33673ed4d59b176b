use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite://rms.db | SQLite 数据库 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | COOKIE_SECURE | false | 会话 Cookie 是否带 Secure |
/// | AUTH_DELAY_MS | 500 | 登录固定延迟(毫秒) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | DEFAULT_MANAGER_USERNAME / DEFAULT_MANAGER_PASSWORD | - | 空库时创建的管理员 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite://data/rms.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 连接串
    pub database_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 会话 Cookie 是否仅通过 HTTPS 发送
    pub cookie_secure: bool,
    /// 登录接口在给出结果前的固定延迟 (毫秒)
    pub auth_delay_ms: u64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 空用户表时自动创建的管理员账号
    pub default_manager: Option<DefaultManager>,
}

/// Bootstrap manager credentials
#[derive(Debug, Clone)]
pub struct DefaultManager {
    pub username: String,
    pub password: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let default_manager = match (
            std::env::var("DEFAULT_MANAGER_USERNAME"),
            std::env::var("DEFAULT_MANAGER_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(DefaultManager { username, password }),
            _ => None,
        };

        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://rms.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt: JwtConfig::default(),
            cookie_secure: env_parse("COOKIE_SECURE", false),
            auth_delay_ms: env_parse("AUTH_DELAY_MS", 500),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            default_manager,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_url: impl Into<String>, jwt: JwtConfig) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.jwt = jwt;
        config.auth_delay_ms = 0;
        config.cookie_secure = false;
        config.default_manager = None;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_disable_auth_delay() {
        let jwt = JwtConfig {
            secret: "test-secret-test-secret-test-secret!".into(),
            ..JwtConfig::default()
        };
        let config = Config::with_overrides("sqlite::memory:", jwt);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.auth_delay_ms, 0);
        assert!(config.default_manager.is_none());
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_is_production() {
        let jwt = JwtConfig {
            secret: "test-secret-test-secret-test-secret!".into(),
            ..JwtConfig::default()
        };
        let mut config = Config::with_overrides("sqlite::memory:", jwt);
        config.environment = "development".into();
        assert!(!config.is_production());
        config.environment = "production".into();
        assert!(config.is_production());
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        assert_eq!(env_parse("RMS_TEST_UNSET_VARIABLE", 42u16), 42);
    }
}
