//! Configuration sourced from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct LimiterToml {
    pub capacity: Option<i64>,
    pub interval_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ServerToml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Toml {
    #[serde(default)]
    pub server: ServerToml,
    #[serde(default)]
    pub login_limiter: LimiterToml,
    #[serde(default)]
    pub password_limiter: LimiterToml,
    #[serde(default)]
    pub ip_limiter: LimiterToml,
}

impl Toml {
    pub fn from_path<P>(path: &P) -> Self
    where
        P: AsRef<Path> + core::fmt::Debug + ?Sized,
    {
        tracing::info!("Loading TOML from {path:?}");
        let f = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to load file at {path:?}: {e}"));
        let t = ::toml::from_str(&f).expect("failed to deserialize TOML configuration");
        tracing::info!("TOML file contents: {t:?}");
        t
    }
}
