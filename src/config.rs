//! Application configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EMPLOYEE_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_API_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 86_400;
pub const DEFAULT_TOAST_LIMIT: usize = 1;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid EMPLOYEE_API_BASE_URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl ApiTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_API_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub employee_api_base_url: String,
    pub api_timeouts: ApiTimeouts,
    pub session_idle_timeout: Duration,
    pub cookie_secure: bool,
    pub toast_limit: usize,
    pub max_sessions: usize,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `EMPLOYEE_API_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `EMPLOYEE_API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `EMPLOYEE_API_CONNECT_TIMEOUT_SECS`: default 10
    /// - `SESSION_IDLE_TIMEOUT_SECS`: default 86400
    /// - `COOKIE_SECURE`: inferred from the base URL scheme when absent
    /// - `TOAST_LIMIT`: default 1
    /// - `MAX_SESSIONS`: default 10000
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number or the base
    /// URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let employee_api_base_url = normalize_base_url(
            lookup("EMPLOYEE_API_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_EMPLOYEE_API_BASE_URL),
        )?;

        let api_timeouts = ApiTimeouts {
            request_secs: parse_or(&lookup, "EMPLOYEE_API_REQUEST_TIMEOUT_SECS", DEFAULT_API_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "EMPLOYEE_API_CONNECT_TIMEOUT_SECS", DEFAULT_API_CONNECT_TIMEOUT_SECS),
        };
        let session_idle_timeout =
            Duration::from_secs(parse_or(&lookup, "SESSION_IDLE_TIMEOUT_SECS", DEFAULT_SESSION_IDLE_TIMEOUT_SECS));

        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| employee_api_base_url.starts_with("https://"));

        let toast_limit = parse_or(&lookup, "TOAST_LIMIT", DEFAULT_TOAST_LIMIT).max(1);
        let max_sessions = parse_or(&lookup, "MAX_SESSIONS", DEFAULT_MAX_SESSIONS).max(1);

        Ok(Self {
            port,
            employee_api_base_url,
            api_timeouts,
            session_idle_timeout,
            cookie_secure,
            toast_limit,
            max_sessions,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            employee_api_base_url: DEFAULT_EMPLOYEE_API_BASE_URL.to_owned(),
            api_timeouts: ApiTimeouts::default(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
            cookie_secure: false,
            toast_limit: DEFAULT_TOAST_LIMIT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Trim trailing slashes and require an http(s) scheme.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for any other scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
