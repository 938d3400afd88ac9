//! Runtime configuration read from the environment, with defaults.

use crate::i18n::DisplayLocale;
use std::env;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub locale: DisplayLocale,
    pub backend_timeout: Duration,
    pub notice_dismiss_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend_url: "http://127.0.0.1:5000".to_string(),
            locale: DisplayLocale::Spanish,
            backend_timeout: Duration::from_secs(10),
            notice_dismiss_ms: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparseable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let locale = match lookup("BOOKING_LOCALE") {
            Some(tag) => DisplayLocale::from_tag(&tag).unwrap_or_else(|| {
                warn!("unsupported BOOKING_LOCALE {tag:?}, using default");
                defaults.locale
            }),
            None => defaults.locale,
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            backend_url: lookup("BACKEND_URL").unwrap_or(defaults.backend_url),
            locale,
            backend_timeout: lookup("BACKEND_TIMEOUT_SECS")
                .and_then(|value| value.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.backend_timeout),
            notice_dismiss_ms: lookup("NOTICE_DISMISS_MS")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.notice_dismiss_ms),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.locale, DisplayLocale::Spanish);
        assert_eq!(config.notice_dismiss_ms, 5000);
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("BACKEND_URL", "http://api:5000"),
            ("BOOKING_LOCALE", "en_US"),
            ("BACKEND_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.backend_url, "http://api:5000");
        assert_eq!(config.locale, DisplayLocale::English);
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "http"), ("BOOKING_LOCALE", "xx")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.locale, DisplayLocale::Spanish);
    }
}
