pub mod coordinates;
pub mod map_view;
pub mod place;

pub use coordinates::LatLng;
pub use map_view::{MapViewConfig, MapViewProps, PlaceMarkerSpec};
pub use place::{category_view_props, place_href, LocalizedPlace, Place, PlaceCategory, PlaceLinks, PLACES};
