//! Application configuration.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::latency::SimulatedLatency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub app: AppConfig,
    /// Simulated latency of user-triggered actions.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Voter data export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Display name of the forum.
    #[serde(default = "default_name")]
    pub name: String,
    /// IANA timezone used to render timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Creator name recorded when the session user has no display name.
    #[serde(default = "default_creator")]
    pub default_creator: String,
    /// Category shown by the poll board ("all" or a category slug).
    #[serde(default = "default_filter")]
    pub board_filter: String,
}

/// Simulated latency, in milliseconds.
///
/// A value of zero disables the delay.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatencyConfig {
    /// Delay before a credential check resolves.
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,
    /// Delay before a registration resolves.
    #[serde(default = "default_register_ms")]
    pub register_ms: u64,
    /// Delay before a vote submission resolves.
    #[serde(default = "default_vote_ms")]
    pub vote_ms: u64,
}

/// Voter data export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Prefix of the exported CSV file name.
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

fn default_name() -> String {
    "Forum Voting Warga".to_string()
}

fn default_timezone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_creator() -> String {
    "Warga Cluster".to_string()
}

fn default_filter() -> String {
    "all".to_string()
}

const fn default_login_ms() -> u64 {
    1000
}

const fn default_register_ms() -> u64 {
    1500
}

const fn default_vote_ms() -> u64 {
    1000
}

fn default_filename_prefix() -> String {
    "data-pemilih".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            timezone: default_timezone(),
            default_creator: default_creator(),
            board_filter: default_filter(),
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login_ms: default_login_ms(),
            register_ms: default_register_ms(),
            vote_ms: default_vote_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: default_filename_prefix(),
        }
    }
}

impl LatencyConfig {
    /// Latency settings that never sleep.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login_ms: 0,
            register_ms: 0,
            vote_ms: 0,
        }
    }

    /// Delay applied to login.
    #[must_use]
    pub const fn login(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.login_ms)
    }

    /// Delay applied to registration.
    #[must_use]
    pub const fn register(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.register_ms)
    }

    /// Delay applied to vote submission.
    #[must_use]
    pub const fn vote(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.vote_ms)
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `FORUM_WARGA_ENV`)
    /// 4. Environment variables with `FORUM_WARGA__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("FORUM_WARGA_ENV").unwrap_or_else(|_| "development".to_string());
        tracing::debug!(env = %env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FORUM_WARGA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration for tests: defaults with every delay disabled.
    #[must_use]
    pub fn without_latency() -> Self {
        Self {
            latency: LatencyConfig::none(),
            ..Self::default()
        }
    }

    /// Parse the configured timezone.
    pub fn timezone(&self) -> AppResult<Tz> {
        self.app
            .timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Config(format!("Invalid timezone {}: {e}", self.app.timezone)))
    }
}
