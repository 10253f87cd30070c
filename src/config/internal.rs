//! The actual internal configuration structure.
//!
//! This is the buffer between any external stable UI (TOML, env vars, CLI)
//! and the types the rest of the crate is built against.

use std::time::Duration;

/// One dimension's token-bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    pub capacity: i64,
    pub interval_seconds: u64,
}

impl LimiterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

/// abf's internal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub login_limiter: LimiterConfig,
    pub password_limiter: LimiterConfig,
    pub ip_limiter: LimiterConfig,
    pub validate_configs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            login_limiter: LimiterConfig {
                capacity: 10,
                interval_seconds: 60,
            },
            password_limiter: LimiterConfig {
                capacity: 100,
                interval_seconds: 60,
            },
            ip_limiter: LimiterConfig {
                capacity: 1000,
                interval_seconds: 60,
            },
            validate_configs: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("server port must be set".to_string());
        }
        for (name, limiter) in [
            ("login-limiter", &self.login_limiter),
            ("password-limiter", &self.password_limiter),
            ("ip-limiter", &self.ip_limiter),
        ] {
            if limiter.capacity < 0 {
                return Err(format!("{name}.capacity must not be negative"));
            }
            if limiter.interval_seconds == 0 {
                return Err(format!("{name}.interval-seconds must be set"));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
