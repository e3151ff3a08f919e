use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub default_limit: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("STATS_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT),
            api_base_url,
            request_timeout: Duration::from_millis(parse_or(
                "REQUEST_TIMEOUT_MS",
                lookup("REQUEST_TIMEOUT_MS"),
                DEFAULT_TIMEOUT_MS,
            )),
            default_limit: parse_or("DEFAULT_LIMIT", lookup("DEFAULT_LIMIT"), DEFAULT_LIMIT),
        }
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(value) = value else {
        return default;
    };

    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("ignoring invalid {key}={value:?}, using {default}");
            default
        }
    }
}
