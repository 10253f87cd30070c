//! Layered configuration: a TOML file, then `ABF_`-prefixed environment
//! variables, then CLI flags, each layer overriding only the keys it sets.

pub mod cli;
pub mod env;
pub mod internal;
pub mod toml;

use cli::Cli;
use clap::Parser;
use env::apply_env;
use toml::Toml;

/// Parses CLI flags, loads the TOML file they name (if any), applies
/// environment overrides, then applies CLI overrides, logging each step.
pub fn render_config() -> internal::Config {
    let mut config = internal::Config::default();

    tracing::info!("Parsing CLI options");
    let c = Cli::parse();
    tracing::info!(config = ?c, "CLI options");

    if let Some(path) = c.config.as_ref() {
        tracing::info!("Applying TOML options from {path:?}");
        let t = Toml::from_path(path);
        apply_toml(&mut config, &t);
    } else {
        tracing::info!("No configuration file provided");
    }

    tracing::info!("Applying environment options");
    apply_env(&mut config);

    tracing::info!("Applying CLI options");
    apply_cli(&mut config, &c);

    tracing::info!(?config, "Full configuration");
    config
}

fn apply_toml(conf: &mut internal::Config, toml: &Toml) {
    if let Some(host) = toml.server.host.clone() {
        conf.host = host;
    }
    if let Some(port) = toml.server.port {
        conf.port = port;
    }
    apply_limiter_toml(&mut conf.login_limiter, &toml.login_limiter);
    apply_limiter_toml(&mut conf.password_limiter, &toml.password_limiter);
    apply_limiter_toml(&mut conf.ip_limiter, &toml.ip_limiter);
}

fn apply_limiter_toml(conf: &mut internal::LimiterConfig, toml: &toml::LimiterToml) {
    if let Some(capacity) = toml.capacity {
        conf.capacity = capacity;
    }
    if let Some(interval_seconds) = toml.interval_seconds {
        conf.interval_seconds = interval_seconds;
    }
}

fn apply_cli(conf: &mut internal::Config, cli: &Cli) {
    let Cli {
        config: _,
        host,
        port,
        validate_configs,
    } = cli;

    if let Some(host) = host {
        conf.host = host.clone();
    }
    if let Some(port) = port {
        conf.port = *port;
    }
    conf.validate_configs |= validate_configs;
}
