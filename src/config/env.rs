//! Environment variable overrides, prefixed `ABF_`. Sits between the TOML
//! file and CLI flags in the configuration layering order.

use super::internal::Config;

const HOST: &str = "ABF_SERVER_HOST";
const PORT: &str = "ABF_SERVER_PORT";
const LOGIN_CAPACITY: &str = "ABF_LOGIN_LIMITER_CAPACITY";
const LOGIN_INTERVAL: &str = "ABF_LOGIN_LIMITER_INTERVAL_SECONDS";
const PASSWORD_CAPACITY: &str = "ABF_PASSWORD_LIMITER_CAPACITY";
const PASSWORD_INTERVAL: &str = "ABF_PASSWORD_LIMITER_INTERVAL_SECONDS";
const IP_CAPACITY: &str = "ABF_IP_LIMITER_CAPACITY";
const IP_INTERVAL: &str = "ABF_IP_LIMITER_INTERVAL_SECONDS";

/// Reads `ABF_*` environment variables and applies any that are set and
/// well-formed on top of `conf`. Unset or unparsable variables leave the
/// existing value untouched; a parse failure is logged and ignored rather
/// than treated as fatal, since env vars are the middle layer and a typo
/// there shouldn't take the process down ahead of the CLI layer.
pub fn apply_env(conf: &mut Config) {
    if let Some(v) = read(HOST) {
        conf.host = v;
    }
    if let Some(v) = read_parsed::<u16>(PORT) {
        conf.port = v;
    }
    if let Some(v) = read_parsed::<i64>(LOGIN_CAPACITY) {
        conf.login_limiter.capacity = v;
    }
    if let Some(v) = read_parsed::<u64>(LOGIN_INTERVAL) {
        conf.login_limiter.interval_seconds = v;
    }
    if let Some(v) = read_parsed::<i64>(PASSWORD_CAPACITY) {
        conf.password_limiter.capacity = v;
    }
    if let Some(v) = read_parsed::<u64>(PASSWORD_INTERVAL) {
        conf.password_limiter.interval_seconds = v;
    }
    if let Some(v) = read_parsed::<i64>(IP_CAPACITY) {
        conf.ip_limiter.capacity = v;
    }
    if let Some(v) = read_parsed::<u64>(IP_INTERVAL) {
        conf.ip_limiter.interval_seconds = v;
    }
}

fn read(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) => Some(v),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(name, "environment variable is not valid unicode, ignoring");
            None
        }
    }
}

fn read_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = read(name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(name, value = %raw, "could not parse environment variable, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_vars_leave_defaults_untouched() {
        let mut conf = Config::default();
        let before = conf.clone();
        apply_env(&mut conf);
        assert_eq!(conf, before);
    }

    #[test]
    fn set_host_overrides_default() {
        std::env::set_var(HOST, "10.0.0.1");
        let mut conf = Config::default();
        apply_env(&mut conf);
        assert_eq!(conf.host, "10.0.0.1");
        std::env::remove_var(HOST);
    }
}
