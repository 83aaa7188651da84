pub mod use_map;

pub use use_map::{use_map, UseMapHandle};
