//! Configuration management for the MCP server.
//!
//! Values come from `MCP_*` environment variables (optionally loaded from a
//! `.env` file) layered over built-in defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Travel API endpoint, credentials and request context.
    pub api: ApiConfig,

    /// Quote polling and payment link settings.
    pub booking: BookingConfig,

    /// Telemetry sink selection.
    pub telemetry: TelemetryConfig,

    /// Facilities reference data source.
    pub facilities: FacilitiesConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Travel API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL; endpoint paths are appended to it.
    pub base_url: String,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    pub market: String,
    pub currency: String,
    pub country_code: String,
    pub language: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("market", &self.market)
            .field("currency", &self.currency)
            .field("country_code", &self.country_code)
            .field("language", &self.language)
            .finish()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dev.jinkotravel.com".to_string(),
            api_key: None,
            timeout_secs: 30,
            market: "fr".to_string(),
            currency: "EUR".to_string(),
            country_code: "fr".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Quote workflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Attempt budget of the quote poller. Always at least 1.
    pub max_poll_attempts: u32,

    /// Wait between two polls, in milliseconds.
    pub poll_interval_ms: u64,

    /// Payment links are `<checkout_base_url>/<quote id>`.
    pub checkout_base_url: String,
}

impl BookingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn payment_link(&self, quote_id: &str) -> String {
        format!("{}/{}", self.checkout_base_url.trim_end_matches('/'), quote_id)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_poll_attempts: 30,
            poll_interval_ms: 2000,
            checkout_base_url: "https://app.jinko.so/checkout".to_string(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// When false, events are discarded.
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Facilities reference data configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilitiesConfig {
    /// JSON file replacing the embedded catalogue.
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "hotel-booking-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
            booking: BookingConfig::default(),
            telemetry: TelemetryConfig::default(),
            facilities: FacilitiesConfig::default(),
        }
    }
}

/// Parse an environment variable, keeping `current` when it is unset or
/// malformed.
fn parsed_var<T: FromStr>(key: &str, current: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid value {:?} for {}", raw, key);
                current
            }
        },
        Err(_) => current,
    }
}

fn string_var(key: &str, target: &mut String) {
    if let Ok(value) = std::env::var(key) {
        if !value.trim().is_empty() {
            *target = value;
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_QUOTE_POLL_INTERVAL_MS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        string_var("MCP_SERVER_NAME", &mut config.server.name);
        string_var("MCP_LOG_LEVEL", &mut config.logging.level);

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        string_var("MCP_API_BASE_URL", &mut config.api.base_url);
        if let Ok(api_key) = std::env::var("MCP_API_KEY") {
            if !api_key.is_empty() {
                config.api.api_key = Some(api_key);
                info!("Travel API key loaded from environment");
            }
        }
        config.api.timeout_secs = parsed_var("MCP_API_TIMEOUT_SECS", config.api.timeout_secs);
        string_var("MCP_MARKET", &mut config.api.market);
        string_var("MCP_CURRENCY", &mut config.api.currency);
        string_var("MCP_COUNTRY_CODE", &mut config.api.country_code);
        string_var("MCP_LANGUAGE", &mut config.api.language);

        string_var("MCP_CHECKOUT_BASE_URL", &mut config.booking.checkout_base_url);
        let attempts = parsed_var("MCP_QUOTE_MAX_POLL_ATTEMPTS", config.booking.max_poll_attempts);
        if attempts == 0 {
            warn!("MCP_QUOTE_MAX_POLL_ATTEMPTS must be at least 1, keeping default");
        } else {
            config.booking.max_poll_attempts = attempts;
        }
        config.booking.poll_interval_ms =
            parsed_var("MCP_QUOTE_POLL_INTERVAL_MS", config.booking.poll_interval_ms);

        config.telemetry.enabled = parsed_var("MCP_TELEMETRY_ENABLED", config.telemetry.enabled);
        if !config.telemetry.enabled {
            info!("Telemetry disabled");
        }

        if let Ok(path) = std::env::var("MCP_FACILITIES_PATH") {
            config.facilities.path = Some(PathBuf::from(path));
            info!("Facilities catalogue override: {:?}", config.facilities.path);
        }

        config
    }
}
