//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES, DEFAULT_JWT_ALGORITHM, DEFAULT_MEMBER_CODE_PREFIX,
    DEFAULT_MEMBER_CODE_WIDTH, DEFAULT_RECENT_ATTENDANCE_LIMIT, MAX_RECENT_ATTENDANCE_LIMIT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub members: MemberSettings,
    pub cors: CorsSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemberSettings {
    pub code_prefix: String,
    pub code_width: usize,
    pub recent_limit: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

/// Admin account created at startup when it does not exist yet.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BootstrapSettings {
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub format: LogFormat,
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Load configuration from `.env`, `config/default`, `config/{APP_ENV}`
    /// and `__`-separated environment variables, in that order.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pre-populated with every default except `jwt.secret` and
    /// `database.url`, which must always be supplied.
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8000)?
            .set_default("app.name", "gym-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("jwt.algorithm", DEFAULT_JWT_ALGORITHM)?
            .set_default("jwt.access_token_expiry_minutes", DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES)?
            .set_default("members.code_prefix", DEFAULT_MEMBER_CODE_PREFIX)?
            .set_default("members.code_width", DEFAULT_MEMBER_CODE_WIDTH as i64)?
            .set_default("members.recent_limit", DEFAULT_RECENT_ATTENDANCE_LIMIT)?
            .set_default("cors.allowed_origins", vec!["http://localhost:8501"])?
            .set_default("telemetry.format", "json")
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::InvalidConfig(format!(
                "jwt.secret must be at least {} bytes",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if !matches!(self.jwt.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(AppError::InvalidConfig(format!(
                "unsupported jwt.algorithm: {}",
                self.jwt.algorithm
            )));
        }
        if self.jwt.access_token_expiry_minutes <= 0 {
            return Err(AppError::InvalidConfig(
                "jwt.access_token_expiry_minutes must be positive".into(),
            ));
        }
        if self.members.code_prefix.is_empty()
            || !self.members.code_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::InvalidConfig(
                "members.code_prefix must be non-empty and alphanumeric".into(),
            ));
        }
        if self.members.recent_limit < 1 || self.members.recent_limit > MAX_RECENT_ATTENDANCE_LIMIT {
            return Err(AppError::InvalidConfig(format!(
                "members.recent_limit must be between 1 and {}",
                MAX_RECENT_ATTENDANCE_LIMIT
            )));
        }
        if self.bootstrap.admin_username.is_some() != self.bootstrap.admin_password.is_some() {
            return Err(AppError::InvalidConfig(
                "bootstrap.admin_username and bootstrap.admin_password must be set together".into(),
            ));
        }
        Ok(())
    }
}
