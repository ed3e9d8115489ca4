//! Environment variable helpers shared by pool and service configuration.

use std::str::FromStr;

/// Read `key` and parse it, falling back to `default` when unset or unparsable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read `key` and parse it, reporting which variable was missing or malformed.
pub fn env_required<T: FromStr>(key: &str) -> Result<T, String> {
    let raw = std::env::var(key).map_err(|_| format!("{} environment variable not set", key))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("{}='{}' could not be parsed", key, raw))
}

/// Interpret common truthy/falsy spellings (`1/0`, `true/false`, `yes/no`, `on/off`).
pub fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
