//! Runtime configuration, read from the environment once at startup.

use std::time::Duration;

use tracing::warn;

use crate::search::{DEFAULT_CACHE_TTL, DEFAULT_DEADLINE};

/// Environment variable holding the comma-separated API keys.
const API_KEYS_ENV: &str = "BOOKSCOUT_API_KEYS";
/// Environment variable for the per-IP requests-per-minute ceiling.
const RATE_LIMIT_ENV: &str = "BOOKSCOUT_RATE_LIMIT_PER_MINUTE";
/// Environment variable for the cached-result lifetime, in seconds.
const CACHE_TTL_ENV: &str = "BOOKSCOUT_CACHE_TTL_SECS";
/// Environment variable for the scrape deadline, in seconds.
const SCRAPE_DEADLINE_ENV: &str = "BOOKSCOUT_SCRAPE_DEADLINE_SECS";
/// Environment variable holding comma-separated CORS origins.
const ALLOWED_ORIGINS_ENV: &str = "BOOKSCOUT_ALLOWED_ORIGINS";
/// Environment variable for the HTTP bind address.
const BIND_ADDR_ENV: &str = "BOOKSCOUT_BIND_ADDR";

const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 10;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Process-wide configuration.
///
/// Built once at startup and passed by reference into the pipeline and the
/// API layer; nothing reads the environment after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Accepted bearer keys. Empty means every API request is rejected.
    pub api_keys: Vec<String>,
    /// Per-IP request ceiling for a 60-second window.
    pub rate_limit_per_minute: u32,
    /// Lifetime of cached search results.
    pub cache_ttl: Duration,
    /// Overall deadline for the concurrent scrape phase.
    pub scrape_deadline: Duration,
    /// Origins echoed back in `Access-Control-Allow-Origin`.
    pub allowed_origins: Vec<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            cache_ttl: DEFAULT_CACHE_TTL,
            scrape_deadline: DEFAULT_DEADLINE,
            allowed_origins: Vec::new(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from `BOOKSCOUT_*` environment variables.
    ///
    /// Unset variables fall back to defaults; malformed numeric values are
    /// logged and ignored rather than aborting startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_keys: parse_list(get(API_KEYS_ENV)),
            rate_limit_per_minute: parse_number(
                RATE_LIMIT_ENV,
                get(RATE_LIMIT_ENV),
                defaults.rate_limit_per_minute,
            ),
            cache_ttl: Duration::from_secs(parse_number(
                CACHE_TTL_ENV,
                get(CACHE_TTL_ENV),
                defaults.cache_ttl.as_secs(),
            )),
            scrape_deadline: Duration::from_secs(parse_number(
                SCRAPE_DEADLINE_ENV,
                get(SCRAPE_DEADLINE_ENV),
                defaults.scrape_deadline.as_secs(),
            )),
            allowed_origins: parse_list(get(ALLOWED_ORIGINS_ENV)),
            bind_addr: get(BIND_ADDR_ENV)
                .map(|raw| raw.trim().to_string())
                .filter(|addr| !addr.is_empty())
                .unwrap_or(defaults.bind_addr),
        }
    }
}

/// Splits a comma-separated value, dropping empty segments.
fn parse_list(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Parses a numeric value, falling back to the default on garbage.
fn parse_number<T: std::str::FromStr + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring malformed {}: {:?}", name, raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]);
        assert!(config.api_keys.is_empty());
        assert_eq!(config.rate_limit_per_minute, 10);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.scrape_deadline, Duration::from_secs(30));
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_api_keys_split_on_commas() {
        let config = config_from(&[("BOOKSCOUT_API_KEYS", "alpha, beta ,gamma")]);
        assert_eq!(config.api_keys, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_empty_list_segments_dropped() {
        let config = config_from(&[("BOOKSCOUT_API_KEYS", "alpha,,  ,beta")]);
        assert_eq!(config.api_keys, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_numeric_overrides() {
        let config = config_from(&[
            ("BOOKSCOUT_RATE_LIMIT_PER_MINUTE", "25"),
            ("BOOKSCOUT_CACHE_TTL_SECS", "60"),
            ("BOOKSCOUT_SCRAPE_DEADLINE_SECS", "5"),
        ]);
        assert_eq!(config.rate_limit_per_minute, 25);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.scrape_deadline, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let config = config_from(&[
            ("BOOKSCOUT_RATE_LIMIT_PER_MINUTE", "lots"),
            ("BOOKSCOUT_CACHE_TTL_SECS", "-5"),
        ]);
        assert_eq!(config.rate_limit_per_minute, 10);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_allowed_origins_and_bind_addr() {
        let config = config_from(&[
            ("BOOKSCOUT_ALLOWED_ORIGINS", "https://example.com"),
            ("BOOKSCOUT_BIND_ADDR", "0.0.0.0:9000"),
        ]);
        assert_eq!(config.allowed_origins, vec!["https://example.com"]);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_blank_bind_addr_falls_back() {
        let config = config_from(&[("BOOKSCOUT_BIND_ADDR", "   ")]);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }
}
