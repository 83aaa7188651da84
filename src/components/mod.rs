pub mod map;

pub use map::{MapContainer, MapContainerProps};
