use std::time::Duration;

use anyhow::Context;

use kitchen_core::Role;

const DEFAULT_ORIGIN: &str = "http://localhost:8000";
const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub origin: String,
    pub token: Option<String>,
    pub role: Role,
    pub reconnect_delay: Duration,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let origin = lookup("KITCHEN_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let token = lookup("KITCHEN_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let role = match lookup("KITCHEN_ROLE") {
            Some(raw) => raw
                .parse::<Role>()
                .with_context(|| format!("Invalid KITCHEN_ROLE '{}'", raw))?,
            None => Role::Cook,
        };
        let reconnect_ms = millis(&lookup, "KITCHEN_RECONNECT_DELAY_MS", DEFAULT_RECONNECT_DELAY_MS)?;
        let timeout_ms = millis(&lookup, "KITCHEN_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let log_format = match lookup("KITCHEN_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            origin,
            token,
            role,
            reconnect_delay: Duration::from_millis(reconnect_ms),
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> anyhow::Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} '{}'", key, raw)),
        None => Ok(default),
    }
}
