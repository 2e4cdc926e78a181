/*
 * Responsibility
 * - Environment / configuration loading (DATABASE_URL, session, lockout policy)
 * - Validation of configuration values (fail startup when required keys are absent)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Frontend routes the access gate redirects to. Kept separate from `Config`
/// so the shared state does not carry the whole configuration around.
#[derive(Debug, Clone)]
pub struct RoutePaths {
    pub login: String,
    pub landing: String,
}

/// Login-throttling policy constants.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Consecutive failures that trigger a lockout.
    pub threshold: u32,
    /// How long a locked key stays locked.
    pub lockout: Duration,
    /// How long consecutive failures keep counting toward the threshold.
    pub window: Duration,
}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub session_secret: String,
    pub session_ttl_days: i64,
    pub session_leeway_seconds: u64,

    pub lockout: LockoutPolicy,
    /// Valkey/Redis URL for the shared attempt store. Absent means the
    /// process-local in-memory store is used.
    pub attempt_store_url: Option<String>,

    pub paths: RoutePaths,

    pub mail_sender: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let session_secret = std::env::var("SESSION_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("SESSION_JWT_SECRET"))?;
        // HS256 secret; anything shorter is effectively a test value.
        if session_secret.len() < 32 {
            return Err(ConfigError::Invalid("SESSION_JWT_SECRET"));
        }

        let session_ttl_days = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(5);
        if session_ttl_days <= 0 {
            return Err(ConfigError::Invalid("SESSION_TTL_DAYS"));
        }

        let session_leeway_seconds = std::env::var("SESSION_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let lockout_threshold = std::env::var("LOCKOUT_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);
        if lockout_threshold == 0 {
            return Err(ConfigError::Invalid("LOCKOUT_THRESHOLD"));
        }

        let lockout_minutes = std::env::var("LOCKOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(15);

        let attempt_window_minutes = std::env::var("ATTEMPT_WINDOW_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(15);

        let attempt_store_url = std::env::var("ATTEMPT_STORE_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let login_path = std::env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string());
        let landing_path =
            std::env::var("LANDING_PATH").unwrap_or_else(|_| "/dashboard".to_string());

        let mail_sender = std::env::var("MAIL_SENDER")
            .unwrap_or_else(|_| "no-reply@warehouse.local".to_string());

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            session_secret,
            session_ttl_days,
            session_leeway_seconds,
            lockout: LockoutPolicy {
                threshold: lockout_threshold,
                lockout: Duration::minutes(lockout_minutes),
                window: Duration::minutes(attempt_window_minutes),
            },
            attempt_store_url,
            paths: RoutePaths {
                login: login_path,
                landing: landing_path,
            },
            mail_sender,
        })
    }
}
