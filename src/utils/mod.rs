// Shared utils

pub mod constants;
pub mod map_links;

#[cfg(target_arch = "wasm32")]
pub mod naver_ffi;

pub use constants::*;
pub use map_links::*;
