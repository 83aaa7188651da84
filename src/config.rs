use serde::{Deserialize, Serialize};

use crate::models::LatLng;
use crate::utils::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MARKER_NAVIGATION_DELAY_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    /// Naver Cloud Platform key id (`ncpKeyId`) used in the SDK script URL.
    pub naver_client_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            naver_client_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: u8,
    pub navigation_delay_ms: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: DEFAULT_CENTER.lat,
            default_center_lng: DEFAULT_CENTER.lng,
            default_zoom: DEFAULT_ZOOM,
            navigation_delay_ms: MARKER_NAVIGATION_DELAY_MS,
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.default_center_lat, self.default_center_lng)
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        let defaults = MapConfig::default();

        Self {
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.default_center_lat),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.default_center_lng),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.default_zoom),
                navigation_delay_ms: option_env!("MARKER_NAVIGATION_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.navigation_delay_ms),
            },
            naver_client_id: normalize_client_id(option_env!("NAVER_CLIENT_ID")),
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Naver client id, `None` when unset or blank
    pub fn naver_client_id(&self) -> Option<&str> {
        self.naver_client_id.as_deref()
    }
}

/// Trimmed client id, `None` when unset or blank
pub(crate) fn normalize_client_id(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
