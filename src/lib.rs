// ============================================================================
// DIOCESE MAP - Naver map view for the diocese site (Rust/WASM)
// ============================================================================
// - Models: props contract with the host page, place catalogue
// - Maps: SDK loader + platform traits (browser impl in maps::web)
// - ViewModels: map lifecycle, marker navigation, live location
// - State: reactive view state
// - Hooks/Components: Yew glue (wasm32 only)
// ============================================================================

pub mod config;
pub mod context;
pub mod maps;
pub mod models;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod hooks;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;
    use yew::{AppHandle, Callback};

    use crate::components::{MapContainer, MapContainerProps};
    use crate::config::CONFIG;
    use crate::context::Language;
    use crate::maps::{web::WebScriptHost, SdkLoader};
    use crate::models::{category_view_props, MapViewProps, Place, PlaceCategory};

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Warn
        };
        wasm_logger::init(Config::new(level));

        log::info!(
            "🚀 Diocese map ready ({}, Naver client id {})",
            CONFIG.environment,
            if CONFIG.naver_client_id().is_some() { "set" } else { "missing" }
        );
    }

    /// Handle returned to JavaScript for one mounted map view
    #[wasm_bindgen]
    pub struct MapViewMount {
        handle: Option<AppHandle<MapContainer>>,
    }

    #[wasm_bindgen]
    impl MapViewMount {
        /// Tear down the view: stops location tracking and pending navigation
        pub fn unmount(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.destroy();
                log::debug!("🧹 Map view unmounted");
            }
        }
    }

    /// Mount a map view into `element_id`.
    ///
    /// `props_json` is the camelCase `MapViewProps` object. `on_navigate`
    /// receives the target path on marker clicks; without it the view pushes
    /// a history entry itself.
    #[wasm_bindgen]
    pub fn mount_map_view(
        element_id: &str,
        props_json: &str,
        on_navigate: Option<js_sys::Function>,
    ) -> Result<MapViewMount, JsValue> {
        let view = MapViewProps::from_json(props_json)
            .map_err(|e| JsValue::from_str(&format!("invalid map props: {}", e)))?;

        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
            .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", element_id)))?;

        let on_navigate = on_navigate.map(|function| {
            Callback::from(move |href: String| {
                if let Err(e) = function.call1(&JsValue::NULL, &JsValue::from_str(&href)) {
                    log::error!("❌ Navigation callback threw: {:?}", e);
                }
            })
        });

        log::info!("🗺️ Mounting map view into #{}", element_id);
        let handle = yew::Renderer::<MapContainer>::with_root_and_props(
            root,
            MapContainerProps {
                view,
                class: Default::default(),
                on_navigate,
            },
        )
        .render();

        Ok(MapViewMount { handle: Some(handle) })
    }

    /// Listing-page props for a category (`region` / `sanctuary`) as JSON
    #[wasm_bindgen]
    pub fn place_map_props(locale: &str, category: &str) -> Result<String, JsValue> {
        let category = PlaceCategory::from_path(category)
            .ok_or_else(|| JsValue::from_str(&format!("unknown place category '{}'", category)))?;
        let props = category_view_props(Language::from_locale(locale), category);
        serde_json::to_string(&props).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// External links for a place as JSON `{ google, apple, site, siteLabel }`
    #[wasm_bindgen]
    pub fn place_links(place_id: &str, locale: &str) -> Result<String, JsValue> {
        let place = Place::find(place_id)
            .ok_or_else(|| JsValue::from_str(&format!("unknown place '{}'", place_id)))?;
        let links = place
            .links(Language::from_locale(locale))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&links).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Localized detail-page text for a place as JSON
    #[wasm_bindgen]
    pub fn place_details(place_id: &str, locale: &str) -> Result<String, JsValue> {
        let place = Place::find(place_id)
            .ok_or_else(|| JsValue::from_str(&format!("unknown place '{}'", place_id)))?;
        serde_json::to_string(&place.localized(Language::from_locale(locale)))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Forget the loaded SDK so the next mount injects a fresh script
    #[wasm_bindgen]
    pub fn reset_map_sdk() {
        SdkLoader::global().reset(&WebScriptHost);
    }
}
