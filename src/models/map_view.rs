// ============================================================================
// MAP VIEW MODELS - Contract between the host page and the map view
// ============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::context::Language;
use crate::models::LatLng;

/// Per-mount map configuration, never mutated once the view is mounted
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub language: Language,
    pub default_marker_title: String,
    pub default_marker_label: Option<String>,
}

/// A clickable place annotation bound to a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceMarkerSpec {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    #[serde(alias = "href")]
    pub navigation_target: String,
    #[serde(default, alias = "infoLabel")]
    pub label: Option<String>,
}

impl PlaceMarkerSpec {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Text drawn inside the marker bubble: the label, or the title when there is none
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.title,
        }
    }
}

/// View-level props as received from the host page (camelCase JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewProps {
    /// Falls back to the configured diocese center
    #[serde(default = "default_center")]
    pub center: LatLng,
    pub marker_title: String,
    #[serde(default)]
    pub marker_label: Option<String>,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub markers: Vec<PlaceMarkerSpec>,
}

fn default_center() -> LatLng {
    CONFIG.map_config.default_center()
}

fn default_zoom() -> u8 {
    CONFIG.map_config.default_zoom
}

impl MapViewProps {
    pub fn new(center: LatLng, marker_title: impl Into<String>) -> Self {
        Self {
            center,
            marker_title: marker_title.into(),
            marker_label: None,
            zoom: default_zoom(),
            language: Language::default(),
            markers: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn config(&self) -> MapViewConfig {
        MapViewConfig {
            center: self.center,
            zoom: self.zoom,
            language: self.language,
            default_marker_title: self.marker_title.clone(),
            default_marker_label: self
                .marker_label
                .clone()
                .filter(|label| !label.trim().is_empty()),
        }
    }

    /// Markers that can actually be placed: valid coordinates, first occurrence of each id
    pub fn place_markers(&self) -> Vec<PlaceMarkerSpec> {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(self.markers.len());

        for marker in &self.markers {
            if !marker.position().is_valid() {
                log::warn!("⚠️ Marker '{}' has invalid coordinates {}, skipped", marker.id, marker.position());
                continue;
            }
            if !seen.insert(marker.id.as_str()) {
                log::warn!("⚠️ Duplicate marker id '{}', keeping the first one", marker.id);
                continue;
            }
            accepted.push(marker.clone());
        }

        accepted
    }
}
