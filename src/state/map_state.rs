use crate::models::LatLng;

/// What the map area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStatus {
    /// No client id: static message, the SDK is never requested
    ConfigMissing,
    #[default]
    Loading,
    Ready,
    /// SDK script or map construction failed
    Unavailable,
}

/// Render snapshot of one map view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapViewState {
    pub status: MapStatus,
    /// Manual "my location" request in progress
    pub locating: bool,
    pub live_location: Option<LatLng>,
    pub show_locate_button: bool,
}

impl MapViewState {
    pub fn show_overlay(&self) -> bool {
        matches!(self.status, MapStatus::Loading | MapStatus::Unavailable)
    }
}
