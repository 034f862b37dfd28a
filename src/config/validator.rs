//! Parsing and sanity checks for individual environment values.

use crate::config::Network;
use crate::error::ConfigError;
use std::str::FromStr;

pub fn required(key: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Parses `value` if present, otherwise returns `default`.
pub fn parsed_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, v.clone(), e.to_string())),
    }
}

pub fn positive(key: &'static str, n: u64) -> Result<u64, ConfigError> {
    if n == 0 {
        Err(ConfigError::invalid(key, "0", "must be greater than zero"))
    } else {
        Ok(n)
    }
}

pub fn network(value: Option<String>) -> Result<Network, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(Network::Tcp),
        Some(v) if v.eq_ignore_ascii_case("tcp") => Ok(Network::Tcp),
        Some(v) if v.eq_ignore_ascii_case("unix") => Ok(Network::Unix),
        Some(v) => Err(ConfigError::invalid("DB_NETWORK", v, "expected tcp or unix")),
    }
}
