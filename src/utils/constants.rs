use crate::maps::PositionOptions;
use crate::models::LatLng;

/// Naver Maps JS SDK loader endpoint
pub const NAVER_SDK_BASE_URL: &str = "https://oapi.map.naver.com/openapi/v3/maps.js";

/// Attribute set on every loader script we inject, so stale ones can be found and removed
pub const SDK_SCRIPT_ATTRIBUTE: &str = "data-naver-maps-sdk";

/// Catholic Diocese of Suwon center (Imok-ro 39, Suwon)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.310444562914,
    lng: 126.98581065993,
};

pub const DEFAULT_ZOOM: u8 = 11;

/// Region / sanctuary listing maps sit one level closer
pub const LISTING_ZOOM: u8 = 12;

/// Title of the diocese office marker on listing maps (never localized)
pub const DIOCESE_CENTER_TITLE: &str = "천주교 수원교구청";

/// Catholic Church in Korea portal, linked from every place page
pub const CATHOLIC_SITE_URL: &str = "https://www.catholic.or.kr";

/// Time given to the pan animation before the route change
pub const MARKER_NAVIGATION_DELAY_MS: u32 = 360;

/// Quick, possibly cached fix used to show something fast
pub const FAST_FIX_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: false,
    timeout_ms: 1_200,
    maximum_age_ms: 60_000,
};

pub const PRECISE_FIX_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: true,
    timeout_ms: 7_000,
    maximum_age_ms: 0,
};

pub const WATCH_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: true,
    timeout_ms: 7_000,
    maximum_age_ms: 5_000,
};
