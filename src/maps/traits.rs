// ============================================================================
// MAP PLATFORM TRAITS - Seams between the map view logic and the browser
// ============================================================================
// Everything the view model needs from the outside world goes through these
// traits: the script host (SDK injection), the map SDK itself, geolocation,
// the host router and timers. `maps::web` implements them on wasm32.
// ============================================================================

use std::any::Any;
use std::rc::Rc;

use thiserror::Error;

use crate::models::LatLng;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdkError {
    #[error("map SDK script failed to load: {0}")]
    ScriptLoad(String),
    #[error("map SDK request superseded by a load for '{0}'")]
    Superseded(String),
    #[error("no document available to inject the SDK script")]
    NoDocument,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("map SDK is not ready")]
    NotReady,
    #[error("invalid coordinates {0}")]
    InvalidCoordinates(LatLng),
    #[error("map SDK call failed: {0}")]
    Sdk(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

impl GeoError {
    /// Map a W3C `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            3 => GeoError::Timeout,
            _ => GeoError::PositionUnavailable,
        }
    }
}

/// Loads and tears down the SDK `<script>` in the host document
pub trait ScriptHost {
    /// Whether the SDK global (`window.naver.maps`) currently exists
    fn sdk_present(&self) -> bool;

    /// Remove every loader script injected earlier
    fn remove_loader_scripts(&self);

    /// Drop the stale SDK global so the next load starts clean
    fn clear_sdk_global(&self);

    /// Append a loader script; `done` runs exactly once with the load outcome
    fn inject_script(&self, src: &str, done: Box<dyn FnOnce(Result<(), SdkError>)>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub zoom_control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// SDK default pin
    Default,
    /// Rounded bubble with the given text
    PlaceLabel(String),
    /// Pulsing dot for the user's position
    LiveLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
}

/// Builds map instances bound to the view's container element
pub trait MapFactory {
    fn create_map(&self, options: &MapOptions) -> Result<Rc<dyn MapSurface>, MapError>;
}

pub trait MapSurface {
    fn add_marker(&self, options: MarkerOptions) -> Result<Rc<dyn MapMarker>, MapError>;

    /// Open a text callout anchored on `marker`
    fn open_info_window(&self, marker: &dyn MapMarker, text: &str) -> Result<(), MapError>;

    /// Animated move; implementations without animation may jump
    fn pan_to(&self, position: LatLng);

    fn set_center(&self, position: LatLng);
}

pub trait MapMarker: Any {
    fn set_position(&self, position: LatLng);

    fn on_click(&self, handler: Box<dyn Fn()>);

    /// Lets a surface recover its own marker type (info window anchors)
    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub i32);

pub type PositionResult = Result<LatLng, GeoError>;

pub trait Geolocation {
    fn is_supported(&self) -> bool;

    /// One-shot fix
    fn current_position(&self, options: PositionOptions, callback: Box<dyn FnOnce(PositionResult)>);

    /// Continuous subscription, `None` if it could not be started
    fn watch_position(&self, options: PositionOptions, callback: Rc<dyn Fn(PositionResult)>) -> Option<WatchId>;

    fn clear_watch(&self, id: WatchId);
}

/// Host client-side router
pub trait Router {
    fn push(&self, href: &str);
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Every platform service one map view needs
#[derive(Clone)]
pub struct MapPlatform {
    pub scripts: Rc<dyn ScriptHost>,
    pub maps: Rc<dyn MapFactory>,
    pub geolocation: Rc<dyn Geolocation>,
    pub router: Rc<dyn Router>,
    pub scheduler: Rc<dyn Scheduler>,
    /// Coarse pointer / touch input
    pub touch_device: bool,
}
