//! Configuration module for modwatch.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use url::Url;

// --- Custom deserializer for Duration from milliseconds ---
fn deserialize_duration_from_ms<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

// --- Custom deserializer for Duration from seconds ---
fn deserialize_duration_from_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff() -> Duration {
    Duration::from_millis(250)
}

fn default_max_backoff() -> Duration {
    Duration::from_secs(10)
}

fn default_base_for_backoff() -> u32 {
    2
}

fn default_probe_interval() -> Duration {
    Duration::from_secs(5)
}

/// Jitter applied to retry backoff durations.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitterSetting {
    /// No jitter applied to the backoff duration.
    None,
    /// Full jitter applied, randomizing the backoff duration.
    #[default]
    Full,
}

/// Retry policy for HTTP requests to the moderation backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpRetryConfig {
    /// Maximum number of retries for transient errors.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base for exponential backoff calculations.
    #[serde(default = "default_base_for_backoff")]
    pub base_for_backoff: u32,
    /// Initial backoff duration before the first retry.
    #[serde(
        default = "default_initial_backoff",
        deserialize_with = "deserialize_duration_from_ms",
        rename = "initial_backoff_ms"
    )]
    pub initial_backoff: Duration,
    /// Maximum backoff duration between retries.
    #[serde(
        default = "default_max_backoff",
        deserialize_with = "deserialize_duration_from_seconds",
        rename = "max_backoff_secs"
    )]
    pub max_backoff: Duration,
    /// Jitter to apply to the backoff duration.
    #[serde(default)]
    pub jitter: JitterSetting,
}

impl Default for HttpRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_for_backoff: default_base_for_backoff(),
            initial_backoff: default_initial_backoff(),
            max_backoff: default_max_backoff(),
            jitter: JitterSetting::default(),
        }
    }
}

impl HttpRetryConfig {
    /// A policy that never retries. Used by tests that assert on exact
    /// request counts.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Application configuration for modwatch.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the moderation backend API, e.g. `https://host/api/v1/`.
    pub api_base_url: Url,

    /// Opaque credential attached to every request. Produced by the external
    /// auth collaborator; this client never inspects it.
    pub credential: Option<String>,

    /// Retry policy for HTTP requests.
    #[serde(default)]
    pub http_retry: HttpRetryConfig,

    /// How often the watch command probes the processing queue.
    #[serde(
        default = "default_probe_interval",
        deserialize_with = "deserialize_duration_from_seconds",
        rename = "probe_interval_secs"
    )]
    pub probe_interval: Duration,
}

impl AppConfig {
    /// Loads configuration from an optional YAML file plus `MODWATCH__`
    /// environment overrides (e.g. `MODWATCH__API_BASE_URL`).
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("MODWATCH").separator("__"))
            .build()?;
        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_config_defaults() {
        let config = HttpRetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(250));
        assert_eq!(config.max_backoff, Duration::from_secs(10));
        assert_eq!(config.jitter, JitterSetting::Full);
    }

    #[test]
    fn retry_config_deserializes_from_wire_names() {
        let config: HttpRetryConfig = serde_json::from_value(serde_json::json!({
            "max_retries": 5,
            "initial_backoff_ms": 100,
            "max_backoff_secs": 30,
            "jitter": "none"
        }))
        .unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_backoff, Duration::from_millis(100));
        assert_eq!(config.max_backoff, Duration::from_secs(30));
        assert_eq!(config.jitter, JitterSetting::None);
    }

    #[test]
    fn no_retries_policy_disables_retries_only() {
        let config = HttpRetryConfig::no_retries();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.base_for_backoff, 2);
    }
}
