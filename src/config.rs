use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::http::DEFAULT_SOURCE_URL;
use crate::corpus::coordinator::CoordinatorSettings;
use crate::ranking::ranker::{RankOptions, DEFAULT_TOP_K, MAX_TOP_K};

/// Where product records are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBackend {
    /// JSON product records over HTTP (default)
    Http,
    /// JSON product records on the local filesystem
    File,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_backend: SourceBackend,
    /// Base URL that relative HTTP locators are resolved against
    pub source_url: String,
    pub fetch_timeout: Duration,
    pub top_k: usize,
    /// Keep the target product in its own recommendation list
    pub include_self: bool,
    pub remove_stop_words: bool,
    pub export_path: String,
    /// Fetch attempts per update command
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_backend: SourceBackend::Http,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_timeout: Duration::from_secs(30),
            top_k: DEFAULT_TOP_K,
            include_self: true,
            remove_stop_words: false,
            export_path: "output/recommendations.txt".to_string(),
            max_attempts: 1,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; malformed numbers and booleans are errors
    /// rather than silently falling back.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            source_backend: parse_backend(env::var("REVIEWMATCH_SOURCE").ok().as_deref())?,
            source_url: env::var("REVIEWMATCH_SOURCE_URL").unwrap_or(defaults.source_url),
            fetch_timeout: Duration::from_secs(parse_var(
                "REVIEWMATCH_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            top_k: parse_var("REVIEWMATCH_TOP_K", defaults.top_k)?,
            include_self: parse_bool_var("REVIEWMATCH_INCLUDE_SELF", defaults.include_self)?,
            remove_stop_words: parse_bool_var(
                "REVIEWMATCH_STOP_WORDS",
                defaults.remove_stop_words,
            )?,
            export_path: env::var("REVIEWMATCH_EXPORT_PATH").unwrap_or(defaults.export_path),
            max_attempts: parse_var("REVIEWMATCH_MAX_ATTEMPTS", defaults.max_attempts)?.max(1),
            retry_delay: Duration::from_millis(parse_var(
                "REVIEWMATCH_RETRY_DELAY_MS",
                defaults.retry_delay.as_millis() as u64,
            )?),
        })
    }

    /// Check that `top_k` is within 1..=MAX_TOP_K.
    pub fn require_top_k(&self) -> Result<()> {
        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            anyhow::bail!(
                "REVIEWMATCH_TOP_K must be between 1 and {MAX_TOP_K}, got {}.\n\
                 Set it in your .env file or pass --top-k.",
                self.top_k
            );
        }
        Ok(())
    }

    /// Pipeline settings for the coordinator.
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            rank: RankOptions {
                top_k: self.top_k,
                include_self: self.include_self,
            },
            remove_stop_words: self.remove_stop_words,
        }
    }
}

/// Unset means HTTP; anything other than "http" or "file" is an error.
fn parse_backend(raw: Option<&str>) -> Result<SourceBackend> {
    match raw.map(|r| r.trim().to_lowercase()).as_deref() {
        None | Some("http") => Ok(SourceBackend::Http),
        Some("file") => Ok(SourceBackend::File),
        Some(other) => anyhow::bail!(
            "REVIEWMATCH_SOURCE must be \"http\" or \"file\", got \"{other}\""
        ),
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool_var(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("{name} must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" yes ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = Config::default();
        let settings = config.coordinator_settings();
        assert_eq!(settings.rank.top_k, 5);
        assert!(settings.rank.include_self);
        assert!(!settings.remove_stop_words);
        assert!(config.require_top_k().is_ok());
    }

    #[test]
    fn test_top_k_outside_range_rejected() {
        for top_k in [0, MAX_TOP_K + 1, 100] {
            let config = Config {
                top_k,
                ..Config::default()
            };
            assert!(config.require_top_k().is_err(), "top_k {top_k} accepted");
        }
        let config = Config {
            top_k: 1,
            ..Config::default()
        };
        assert!(config.require_top_k().is_ok());
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend(None).unwrap(), SourceBackend::Http);
        assert_eq!(parse_backend(Some("http")).unwrap(), SourceBackend::Http);
        assert_eq!(parse_backend(Some(" File ")).unwrap(), SourceBackend::File);
        assert!(parse_backend(Some("fiel")).is_err());
        assert!(parse_backend(Some("")).is_err());
    }
}
