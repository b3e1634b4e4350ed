//! Runtime settings read from the environment.

use std::time::Duration;

use crate::foundation::error::{SpudcatError, SpudcatResult};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Config {
    /// Listen port (`PORT`).
    pub port: u16,
    /// Per outbound request (`HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
    /// Budget for fetching both subjects of one `/meme` request (`REQUEST_TIMEOUT_SECS`).
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read from the process environment.
    pub fn load() -> SpudcatResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary key lookup; unset or empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> SpudcatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => parse::<u16>("PORT", &v)?,
            None => DEFAULT_PORT,
        };
        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => secs("HTTP_TIMEOUT_SECS", &v)?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };
        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(v) => secs("REQUEST_TIMEOUT_SECS", &v)?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            port,
            http_timeout,
            request_timeout,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> SpudcatResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| SpudcatError::validation(format!("{key}={value:?}: {e}")))
}

fn secs(key: &str, value: &str) -> SpudcatResult<Duration> {
    let n = parse::<u64>(key, value)?;
    if n == 0 {
        return Err(SpudcatError::validation(format!("{key} must be > 0")));
    }
    Ok(Duration::from_secs(n))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
