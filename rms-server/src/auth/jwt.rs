//! JWT 令牌服务
//!
//! 处理会话令牌的生成、验证和解析。令牌放在 `token` Cookie 中，
//! 有两种主体：员工 (user) 和桌台点餐端 (table)。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use shared::{ClientKind, SessionInfo};
use thiserror::Error;

/// JWT 配置
///
/// | 环境变量 | 默认值 |
/// |----------|--------|
/// | JWT_SECRET | 开发环境随机生成，生产环境必填 (≥ 32 字符) |
/// | JWT_EXPIRATION_MINUTES | 1440 |
/// | JWT_ISSUER | rms-server |
/// | JWT_AUDIENCE | rms-clients |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated key", e);
                    generate_secure_printable_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "rms-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "rms-clients".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
///
/// - user: `sub` = 用户 ID，带 `username` / `role`
/// - table: `sub` = usage ID (点餐端会话)，带 `table_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub kind: ClientKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// 过期时间戳 (秒)
    pub exp: i64,
    /// 签发时间戳 (秒)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        return "RmsServerDevelopmentSecureKeyDoNotUseInProduction".to_string();
    }

    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable is not set".to_string(),
        )),
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为员工生成会话令牌
    pub fn generate_user_token(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
    ) -> Result<String, JwtError> {
        let mut claims = self.base_claims(user_id, ClientKind::User);
        claims.username = Some(username.to_string());
        claims.role = Some(role);
        self.encode(&claims)
    }

    /// 为桌台点餐端生成会话令牌 (`sub` 为 usage ID)
    pub fn generate_table_token(&self, usage_id: &str, table_id: &str) -> Result<String, JwtError> {
        let mut claims = self.base_claims(usage_id, ClientKind::Table);
        claims.table_id = Some(table_id.to_string());
        self.encode(&claims)
    }

    fn base_claims(&self, sub: &str, kind: ClientKind) -> Claims {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);
        Claims {
            sub: sub.to_string(),
            kind,
            username: None,
            role: None,
            table_id: None,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        }
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 令牌有效期 (秒)，用作 Cookie Max-Age
    pub fn lifetime_seconds(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 员工会话
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub exp: i64,
}

impl CurrentUser {
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// 桌台点餐端会话
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTable {
    pub usage_id: String,
    pub table_id: String,
    pub exp: i64,
}

/// 当前会话上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入请求扩展
///
/// ```ignore
/// async fn handler(Extension(client): Extension<CurrentClient>) -> Json<SessionInfo> {
///     Json(client.session_info())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentClient {
    User(CurrentUser),
    Table(CurrentTable),
}

impl TryFrom<Claims> for CurrentClient {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        match claims.kind {
            ClientKind::User => {
                let (Some(username), Some(role)) = (claims.username, claims.role) else {
                    return Err(JwtError::InvalidToken(
                        "user claim without username or role".to_string(),
                    ));
                };
                Ok(CurrentClient::User(CurrentUser {
                    id: claims.sub,
                    username,
                    role,
                    exp: claims.exp,
                }))
            }
            ClientKind::Table => {
                let Some(table_id) = claims.table_id else {
                    return Err(JwtError::InvalidToken(
                        "table claim without table_id".to_string(),
                    ));
                };
                Ok(CurrentClient::Table(CurrentTable {
                    usage_id: claims.sub,
                    table_id,
                    exp: claims.exp,
                }))
            }
        }
    }
}

impl CurrentClient {
    /// 用户 ID 或 usage ID
    pub fn id(&self) -> &str {
        match self {
            CurrentClient::User(u) => &u.id,
            CurrentClient::Table(t) => &t.usage_id,
        }
    }

    pub fn kind(&self) -> ClientKind {
        match self {
            CurrentClient::User(_) => ClientKind::User,
            CurrentClient::Table(_) => ClientKind::Table,
        }
    }

    pub fn as_user(&self) -> Option<&CurrentUser> {
        match self {
            CurrentClient::User(u) => Some(u),
            CurrentClient::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&CurrentTable> {
        match self {
            CurrentClient::Table(t) => Some(t),
            CurrentClient::User(_) => None,
        }
    }

    pub fn session_info(&self) -> SessionInfo {
        match self {
            CurrentClient::User(u) => SessionInfo {
                id: u.id.clone(),
                kind: ClientKind::User,
                username: Some(u.username.clone()),
                role: Some(u.role),
                table_id: None,
                expires_at: u.exp * 1000,
            },
            CurrentClient::Table(t) => SessionInfo {
                id: t.usage_id.clone(),
                kind: ClientKind::Table,
                username: None,
                role: None,
                table_id: Some(t.table_id.clone()),
                expires_at: t.exp * 1000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-unit-test-secret-1234".into(),
            expiration_minutes: 60,
            issuer: "rms-server".into(),
            audience: "rms-clients".into(),
        })
    }

    #[test]
    fn test_user_token_roundtrip() {
        let service = service();
        let token = service
            .generate_user_token("user-1", "alice", Role::Chef)
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.kind, ClientKind::User);

        let client = CurrentClient::try_from(claims).unwrap();
        let user = client.as_user().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Chef);
        assert!(client.as_table().is_none());
    }

    #[test]
    fn test_table_token_roundtrip() {
        let service = service();
        let token = service.generate_table_token("usage-1", "table-1").unwrap();
        let client = CurrentClient::try_from(service.validate_token(&token).unwrap()).unwrap();

        assert_eq!(client.id(), "usage-1");
        assert_eq!(client.kind(), ClientKind::Table);
        let info = client.session_info();
        assert_eq!(info.table_id.as_deref(), Some("table-1"));
        assert!(info.role.is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = service().config;
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let token = service.generate_user_token("u", "bob", Role::Staff).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let mut config = service().config;
        config.secret = "another-secret-another-secret-another".into();
        let forged = JwtService::with_config(config)
            .generate_user_token("u", "mallory", Role::Manager)
            .unwrap();

        assert!(matches!(
            service().validate_token(&forged),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let mut config = service().config;
        config.audience = "someone-else".into();
        let token = JwtService::with_config(config)
            .generate_table_token("u", "t")
            .unwrap();

        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_user_claim_without_role_is_malformed() {
        let claims = Claims {
            sub: "u".into(),
            kind: ClientKind::User,
            username: Some("x".into()),
            role: None,
            table_id: None,
            exp: 0,
            iat: 0,
            iss: String::new(),
            aud: String::new(),
        };
        assert!(CurrentClient::try_from(claims).is_err());
    }

    #[test]
    fn test_printable_secret() {
        let key = generate_secure_printable_jwt_secret();
        assert_eq!(key.len(), 64);
        assert_ne!(key, generate_secure_printable_jwt_secret());
    }
}
