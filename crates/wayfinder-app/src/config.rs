//! Client configuration loading from file and environment variables.

use serde::Deserialize;
use thiserror::Error;
use wayfinder_map::{MapViewConfig, TileLayerSpec};
use wayfinder_types::{LatLng, ORIGIN_LOCATION_ID};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Routing service settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Map view settings.
    #[serde(default)]
    pub map: MapConfig,

    /// Speech engine settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how to reach the routing service.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Node id every voice-commanded route starts from.
    #[serde(default = "default_origin_id")]
    pub origin_id: u32,
}

/// Map view configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Tile URL template for the base layer.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

impl MapConfig {
    /// Builds the session's view configuration from these settings.
    pub fn view(&self) -> MapViewConfig {
        MapViewConfig {
            center: LatLng::new(self.center_lat, self.center_lon),
            zoom: self.zoom,
            tile_layer: TileLayerSpec {
                url_template: self.tile_url.clone(),
                attribution: self.attribution.clone(),
                max_zoom: self.max_zoom,
            },
            ..MapViewConfig::default()
        }
    }
}

/// Speech engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechConfig {
    /// Command that runs the external speech-to-text engine. Empty means
    /// terminal mode: transcripts are read line-by-line from stdin.
    #[serde(default)]
    pub engine_command: String,

    /// Arguments passed to the engine command.
    #[serde(default)]
    pub engine_args: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "wayfinder_app=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_origin_id() -> u32 {
    ORIGIN_LOCATION_ID
}

fn default_center_lat() -> f64 {
    13.0827
}

fn default_center_lon() -> f64 {
    80.2707
}

fn default_zoom() -> u8 {
    13
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_max_zoom() -> u8 {
    19
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            origin_id: default_origin_id(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `WAYFINDER_ROUTING_URL` overrides `routing.base_url`
/// - `WAYFINDER_ORIGIN_ID` overrides `routing.origin_id`
/// - `WAYFINDER_SPEECH_ENGINE` overrides `speech.engine_command`
/// - `WAYFINDER_LOG_LEVEL` overrides `logging.level`
/// - `WAYFINDER_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(url) = std::env::var("WAYFINDER_ROUTING_URL") {
        config.routing.base_url = url;
    }
    if let Ok(origin) = std::env::var("WAYFINDER_ORIGIN_ID") {
        if let Ok(parsed) = origin.parse() {
            config.routing.origin_id = parsed;
        }
    }
    if let Ok(engine) = std::env::var("WAYFINDER_SPEECH_ENGINE") {
        config.speech.engine_command = engine;
    }
    if let Ok(level) = std::env::var("WAYFINDER_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("WAYFINDER_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
