//! Application configuration.
//!
//! `AppConfig` is read once at process start from a `.env` file (if present) and
//! the process environment. It is then handed explicitly to the components that
//! need it; nothing reads the environment after startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Error raised when an environment variable is present but cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub mqtt: MqttConfig,
}

/// Broker connection settings for the ingestor.
#[derive(Debug, Clone, PartialEq)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub client_id: String,
    pub keep_alive: Duration,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "test.mosquitto.org".into(),
            port: 1883,
            topic: "esp32/humidity/project_se_lucas".into(),
            client_id: format!("moisture-bridge-{}", std::process::id()),
            keep_alive: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing variables fall back to their defaults. A variable that is set
    /// but malformed (e.g. `PORT=abc`) is an error rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MqttConfig::default();
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let mqtt = MqttConfig {
            host: string("MQTT_HOST", &defaults.host),
            port: parse_or(&lookup, "MQTT_PORT", defaults.port)?,
            topic: string("MQTT_TOPIC", &defaults.topic),
            client_id: string("MQTT_CLIENT_ID", &defaults.client_id),
            keep_alive: Duration::from_secs(parse_or(
                &lookup,
                "MQTT_KEEP_ALIVE_SECS",
                defaults.keep_alive.as_secs(),
            )?),
        };

        Ok(Self {
            env: string("APP_ENV", "development"),
            project_name: string("PROJECT_NAME", "moisture-bridge"),
            log_level: string("LOG_LEVEL", "api=info,ingestor=info,db=info"),
            log_file: string("LOG_FILE", "api.log"),
            log_to_stdout: parse_or(&lookup, "LOG_TO_STDOUT", false)?,
            database_path: string("DATABASE_PATH", "data/humidity.db"),
            host: string("HOST", "127.0.0.1"),
            port: parse_or(&lookup, "PORT", 5000)?,
            mqtt,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
