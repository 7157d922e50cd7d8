//! Configuration module for environment variables and application settings

use anyhow::{Result, anyhow, bail};
use std::env;
use std::time::Duration;

const DEFAULT_PUBLIC_API_URL: &str = "https://api.publicapis.org/entries";
/// One year
const MAX_TOKEN_TTL_MINUTES: u64 = 525_600;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify access tokens
    pub jwt_secret: String,

    /// Lifetime of an issued access token
    pub token_ttl: Duration,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream public API configuration
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `JWT_SECRET` is mandatory; everything else falls back to a default.
    /// Values that are present but unparseable are reported rather than
    /// silently replaced.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET environment variable is required"))?;

        let ttl_minutes: u64 = parse_or(&lookup, "TOKEN_TTL_MINUTES", 60)?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&ttl_minutes) {
            bail!("TOKEN_TTL_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES}");
        }
        let ttl_secs = ttl_minutes
            .checked_mul(60)
            .ok_or_else(|| anyhow!("TOKEN_TTL_MINUTES is too large"))?;

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),

            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", 3000)?,
            },

            upstream: UpstreamConfig {
                url: lookup("PUBLIC_API_URL")
                    .unwrap_or_else(|| DEFAULT_PUBLIC_API_URL.to_string()),
                timeout: Duration::from_secs(parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 10)?),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        assert!(Config::from_lookup(lookup_from(&[("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.upstream.url, DEFAULT_PUBLIC_API_URL);
        assert_eq!(config.upstream.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("TOKEN_TTL_MINUTES", "15"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.token_ttl, Duration::from_secs(15 * 60));

        assert!(Config::from_lookup(lookup_from(&[("JWT_SECRET", "s"), ("PORT", "http")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("JWT_SECRET", "s"), ("TOKEN_TTL_MINUTES", "0")]))
                .is_err()
        );
    }

    #[test]
    fn test_oversized_token_ttl_is_rejected() {
        for ttl in ["18446744073709551615", "153722867280912930", "525601"] {
            let err = Config::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s"),
                ("TOKEN_TTL_MINUTES", ttl),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains("TOKEN_TTL_MINUTES"), "{ttl}: {err}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("TOKEN_TTL_MINUTES", "525600"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(525_600 * 60));
    }
}
