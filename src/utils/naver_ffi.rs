// ============================================================================
// NAVER MAPS FFI - Bindings for the `naver.maps` global
// ============================================================================
// Thin wrappers only. Only valid once the SDK script has loaded.
// ============================================================================

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["naver", "maps"])]
    pub type LatLng;

    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"])]
    pub fn new(lat: f64, lng: f64) -> LatLng;

    #[wasm_bindgen(js_namespace = ["naver", "maps"])]
    pub type Map;

    #[wasm_bindgen(constructor, catch, js_namespace = ["naver", "maps"])]
    pub fn new(element: &HtmlElement, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setCenter)]
    pub fn set_center(this: &Map, center: &LatLng);

    #[wasm_bindgen(js_namespace = ["naver", "maps"])]
    pub type Marker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["naver", "maps"])]
    pub fn new(options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = setPosition)]
    pub fn set_position(this: &Marker, position: &LatLng);

    #[wasm_bindgen(js_namespace = ["naver", "maps"])]
    pub type InfoWindow;

    #[wasm_bindgen(constructor, catch, js_namespace = ["naver", "maps"])]
    pub fn new(options: &JsValue) -> Result<InfoWindow, JsValue>;

    #[wasm_bindgen(method)]
    pub fn open(this: &InfoWindow, map: &Map, anchor: &Marker);

    #[wasm_bindgen(js_namespace = ["naver", "maps", "Event"], js_name = addListener)]
    pub fn add_listener(target: &JsValue, event_name: &str, handler: &Function) -> JsValue;
}

/// `window.naver.maps`, if the SDK is loaded
pub fn maps_namespace() -> Option<JsValue> {
    let window = web_sys::window()?;
    let naver = Reflect::get(&window, &JsValue::from_str("naver")).ok()?;
    if naver.is_undefined() || naver.is_null() {
        return None;
    }
    let maps = Reflect::get(&naver, &JsValue::from_str("maps")).ok()?;
    if maps.is_undefined() || maps.is_null() {
        return None;
    }
    Some(maps)
}

/// `naver.maps.Position.TOP_RIGHT`
pub fn position_top_right() -> Option<JsValue> {
    let maps = maps_namespace()?;
    let position = Reflect::get(&maps, &JsValue::from_str("Position")).ok()?;
    Reflect::get(&position, &JsValue::from_str("TOP_RIGHT"))
        .ok()
        .filter(|value| !value.is_undefined())
}

/// Animated `panTo` when the SDK build has it, `setCenter` otherwise
pub fn pan_to(map: &Map, target: &LatLng) {
    let pan = Reflect::get(map, &JsValue::from_str("panTo"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());

    match pan {
        Some(pan) => {
            if pan.call1(map, target).is_err() {
                map.set_center(target);
            }
        }
        None => map.set_center(target),
    }
}
