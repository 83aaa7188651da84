// Map module: platform seams, SDK loader and the browser implementation

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub mod fake;

pub mod sdk;
pub mod traits;

pub use sdk::{sdk_script_url, SdkLoadState, SdkLoader};
pub use traits::*;
