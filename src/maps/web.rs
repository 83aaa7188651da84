// ============================================================================
// WEB PLATFORM - Browser implementation of the map traits (wasm32 only)
// ============================================================================
// Script injection and geolocation go through web-sys, the map itself
// through the `naver.maps` bindings in utils::naver_ffi.
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, GeolocationPosition, GeolocationPositionError, HtmlElement, HtmlScriptElement};

use super::traits::*;
use crate::models::LatLng;
use crate::utils::constants::SDK_SCRIPT_ATTRIBUTE;
use crate::utils::naver_ffi as naver;

fn js_error(value: JsValue) -> MapError {
    MapError::Sdk(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), MapError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn naver_lat_lng(position: LatLng) -> naver::LatLng {
    naver::LatLng::new(position.lat, position.lng)
}

fn point(x: f64, y: f64) -> Result<Object, MapError> {
    let point = Object::new();
    set(&point, "x", &JsValue::from_f64(x))?;
    set(&point, "y", &JsValue::from_f64(y))?;
    Ok(point)
}

// ============================================================================
// SCRIPT HOST
// ============================================================================

pub struct WebScriptHost;

impl ScriptHost for WebScriptHost {
    fn sdk_present(&self) -> bool {
        naver::maps_namespace().is_some()
    }

    fn remove_loader_scripts(&self) {
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };
        let selector = format!("script[{}=\"true\"]", SDK_SCRIPT_ATTRIBUTE);
        let Ok(scripts) = document.query_selector_all(&selector) else {
            return;
        };

        for index in 0..scripts.length() {
            if let Some(node) = scripts.item(index) {
                if let Some(parent) = node.parent_node() {
                    let _ = parent.remove_child(&node);
                }
            }
        }
    }

    fn clear_sdk_global(&self) {
        if let Some(window) = window() {
            let _ = Reflect::delete_property(&window, &JsValue::from_str("naver"));
        }
    }

    fn inject_script(&self, src: &str, done: Box<dyn FnOnce(Result<(), SdkError>)>) {
        let Some(document) = window().and_then(|w| w.document()) else {
            done(Err(SdkError::NoDocument));
            return;
        };
        let Some(head) = document.head() else {
            done(Err(SdkError::NoDocument));
            return;
        };
        let script = match document
            .create_element("script")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlScriptElement>().ok())
        {
            Some(script) => script,
            None => {
                done(Err(SdkError::NoDocument));
                return;
            }
        };

        script.set_src(src);
        script.set_async(true);
        let _ = script.set_attribute(SDK_SCRIPT_ATTRIBUTE, "true");

        // onload and onerror share the one-shot completion
        let done = Rc::new(RefCell::new(Some(done)));

        let on_load = {
            let done = done.clone();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Ok(()));
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        let on_error = {
            let done = done.clone();
            let src = src.to_string();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Err(SdkError::ScriptLoad(src.clone())));
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        // One pair per SDK load; they must outlive this call
        on_load.forget();
        on_error.forget();

        if let Err(e) = head.append_child(&script) {
            let callback = done.borrow_mut().take();
            if let Some(callback) = callback {
                callback(Err(SdkError::ScriptLoad(format!("{:?}", e))));
            }
        }
    }
}

// ============================================================================
// MAP
// ============================================================================

pub struct NaverMapFactory {
    container: HtmlElement,
}

impl NaverMapFactory {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }
}

impl MapFactory for NaverMapFactory {
    fn create_map(&self, options: &MapOptions) -> Result<Rc<dyn MapSurface>, MapError> {
        if naver::maps_namespace().is_none() {
            return Err(MapError::NotReady);
        }

        let js_options = Object::new();
        set(&js_options, "center", &naver_lat_lng(options.center))?;
        set(&js_options, "zoom", &JsValue::from_f64(f64::from(options.zoom)))?;
        set(&js_options, "zoomControl", &JsValue::from_bool(options.zoom_control))?;

        if let Some(top_right) = naver::position_top_right() {
            let zoom_control_options = Object::new();
            set(&zoom_control_options, "position", &top_right)?;
            set(&js_options, "zoomControlOptions", &zoom_control_options)?;
        }

        let map = naver::Map::new(&self.container, &js_options).map_err(js_error)?;
        Ok(Rc::new(NaverMapSurface { map }))
    }
}

pub struct NaverMapSurface {
    map: naver::Map,
}

impl NaverMapSurface {
    fn icon(&self, icon: &MarkerIcon) -> Result<Option<Object>, MapError> {
        let (content, size, anchor) = match icon {
            MarkerIcon::Default => return Ok(None),
            MarkerIcon::PlaceLabel(label) => (place_label_element(label).map_err(js_error)?, None, point(0.0, 0.0)?),
            MarkerIcon::LiveLocation => {
                let size = Object::new();
                set(&size, "width", &JsValue::from_f64(24.0))?;
                set(&size, "height", &JsValue::from_f64(24.0))?;
                (location_dot_element().map_err(js_error)?, Some(size), point(12.0, 12.0)?)
            }
        };

        let js_icon = Object::new();
        set(&js_icon, "content", &content)?;
        if let Some(size) = size {
            set(&js_icon, "size", &size)?;
        }
        set(&js_icon, "anchor", &anchor)?;
        Ok(Some(js_icon))
    }
}

impl MapSurface for NaverMapSurface {
    fn add_marker(&self, options: MarkerOptions) -> Result<Rc<dyn MapMarker>, MapError> {
        let js_options = Object::new();
        set(&js_options, "position", &naver_lat_lng(options.position))?;
        set(&js_options, "map", &self.map)?;
        set(&js_options, "title", &JsValue::from_str(&options.title))?;
        if let Some(icon) = self.icon(&options.icon)? {
            set(&js_options, "icon", &icon)?;
        }

        let marker = naver::Marker::new(&js_options).map_err(js_error)?;
        Ok(Rc::new(NaverMarker { marker }))
    }

    fn open_info_window(&self, marker: &dyn MapMarker, text: &str) -> Result<(), MapError> {
        let Some(marker) = marker.as_any().downcast_ref::<NaverMarker>() else {
            return Err(MapError::Sdk("info window anchor is not a Naver marker".into()));
        };

        let content = info_window_element(text).map_err(js_error)?;
        let js_options = Object::new();
        set(&js_options, "content", &content)?;

        let info_window = naver::InfoWindow::new(&js_options).map_err(js_error)?;
        info_window.open(&self.map, &marker.marker);
        Ok(())
    }

    fn pan_to(&self, position: LatLng) {
        naver::pan_to(&self.map, &naver_lat_lng(position));
    }

    fn set_center(&self, position: LatLng) {
        self.map.set_center(&naver_lat_lng(position));
    }
}

pub struct NaverMarker {
    marker: naver::Marker,
}

impl MapMarker for NaverMarker {
    fn set_position(&self, position: LatLng) {
        self.marker.set_position(&naver_lat_lng(position));
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        naver::add_listener(&self.marker, "click", closure.as_ref().unchecked_ref());
        // The SDK owns the marker DOM; the listener lives as long as it does
        closure.forget();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn create_div() -> Result<HtmlElement, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

fn place_label_element(label: &str) -> Result<HtmlElement, JsValue> {
    let element = create_div()?;
    element.set_class_name("place-marker");
    element.set_attribute(
        "style",
        "position:relative;cursor:pointer;user-select:none;white-space:nowrap;\
         border-radius:8px;background:#3C9BD5;color:#fff;padding:6px 12px;\
         font-weight:600;font-size:12px;box-shadow:0 4px 6px rgba(0,0,0,.15);\
         font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;",
    )?;
    element.set_text_content(Some(label));
    Ok(element)
}

const LOCATION_DOT_HTML: &str = "<style>@keyframes location-pulse-marker{\
0%{box-shadow:0 0 0 0 rgba(59,130,246,.7)}\
70%{box-shadow:0 0 0 20px rgba(59,130,246,0)}\
100%{box-shadow:0 0 0 0 rgba(59,130,246,0)}}</style>\
<div style=\"position:absolute;left:50%;top:50%;width:16px;height:16px;\
transform:translate(-50%,-50%);border-radius:9999px;border:3px solid #fff;\
background:#3b82f6;animation:location-pulse-marker 2s cubic-bezier(.4,0,.6,1) infinite\"></div>";

fn location_dot_element() -> Result<HtmlElement, JsValue> {
    let element = create_div()?;
    element.set_class_name("location-marker");
    element.set_attribute("style", "position:relative;width:24px;height:24px;")?;
    element.set_inner_html(LOCATION_DOT_HTML);
    Ok(element)
}

fn info_window_element(text: &str) -> Result<HtmlElement, JsValue> {
    let element = create_div()?;
    element.set_attribute("style", "padding:8px 10px;font-size:12px;font-weight:600;white-space:nowrap;")?;
    element.set_text_content(Some(text));
    Ok(element)
}

// ============================================================================
// GEOLOCATION
// ============================================================================

type PositionClosure = Closure<dyn FnMut(JsValue)>;

/// Browser geolocation. Watch closures are kept until their watch is cleared.
#[derive(Default)]
pub struct WebGeolocation {
    watches: RefCell<HashMap<i32, (PositionClosure, PositionClosure)>>,
}

fn browser_geolocation() -> Option<web_sys::Geolocation> {
    let navigator = window()?.navigator();
    let present = Reflect::get(&navigator, &JsValue::from_str("geolocation"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false);
    if !present {
        return None;
    }
    navigator.geolocation().ok()
}

fn position_options(options: PositionOptions) -> web_sys::PositionOptions {
    let js_options = web_sys::PositionOptions::new();
    js_options.set_enable_high_accuracy(options.enable_high_accuracy);
    js_options.set_timeout(options.timeout_ms);
    js_options.set_maximum_age(options.maximum_age_ms);
    js_options
}

fn read_position(value: JsValue) -> PositionResult {
    let position: GeolocationPosition = value.unchecked_into();
    let coords = position.coords();
    Ok(LatLng::new(coords.latitude(), coords.longitude()))
}

fn read_error(value: JsValue) -> GeoError {
    // Older engines expose `PositionError`, so read `code` structurally
    let error: GeolocationPositionError = value.unchecked_into();
    GeoError::from_code(error.code())
}

impl Geolocation for WebGeolocation {
    fn is_supported(&self) -> bool {
        browser_geolocation().is_some()
    }

    fn current_position(&self, options: PositionOptions, callback: Box<dyn FnOnce(PositionResult)>) {
        let Some(geolocation) = browser_geolocation() else {
            callback(Err(GeoError::Unsupported));
            return;
        };

        let callback = Rc::new(RefCell::new(Some(callback)));
        let settle = move |result: PositionResult| {
            let callback = callback.borrow_mut().take();
            if let Some(callback) = callback {
                callback(result);
            }
        };

        let on_success = {
            let settle = settle.clone();
            Closure::wrap(Box::new(move |value: JsValue| settle(read_position(value))) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = {
            let settle = settle.clone();
            Closure::wrap(Box::new(move |value: JsValue| settle(Err(read_error(value)))) as Box<dyn FnMut(JsValue)>)
        };

        let requested = geolocation.get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &position_options(options),
        );
        // Exactly one of the two fires, once
        on_success.forget();
        on_error.forget();

        if requested.is_err() {
            settle(Err(GeoError::PositionUnavailable));
        }
    }

    fn watch_position(&self, options: PositionOptions, callback: Rc<dyn Fn(PositionResult)>) -> Option<WatchId> {
        let geolocation = browser_geolocation()?;

        let on_success = {
            let callback = callback.clone();
            Closure::wrap(Box::new(move |value: JsValue| callback(read_position(value))) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = {
            let callback = callback.clone();
            Closure::wrap(Box::new(move |value: JsValue| callback(Err(read_error(value)))) as Box<dyn FnMut(JsValue)>)
        };

        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options(options),
            )
            .ok()?;

        self.watches.borrow_mut().insert(id, (on_success, on_error));
        log::debug!("📍 Location watch {} started", id);
        Some(WatchId(id))
    }

    fn clear_watch(&self, id: WatchId) {
        if let Some(geolocation) = browser_geolocation() {
            geolocation.clear_watch(id.0);
        }
        self.watches.borrow_mut().remove(&id.0);
    }
}

// ============================================================================
// ROUTER / TIMERS / DEVICE
// ============================================================================

/// Client-side navigation without a host router: pushState + popstate
pub struct HistoryRouter;

impl Router for HistoryRouter {
    fn push(&self, href: &str) {
        let Some(window) = window() else {
            return;
        };

        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(href)));

        match pushed {
            Ok(()) => {
                if let Ok(event) = web_sys::PopStateEvent::new("popstate") {
                    let _ = window.dispatch_event(&event);
                }
            }
            Err(e) => {
                log::warn!("⚠️ pushState failed ({:?}), doing a full navigation", e);
                let _ = window.location().set_href(href);
            }
        }
    }
}

/// Navigation delegated to the host application's router
pub struct CallbackRouter {
    callback: yew::Callback<String>,
}

impl CallbackRouter {
    pub fn new(callback: yew::Callback<String>) -> Self {
        Self { callback }
    }
}

impl Router for CallbackRouter {
    fn push(&self, href: &str) {
        self.callback.emit(href.to_string());
    }
}

pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, move || task()).forget();
    }
}

fn media_matches(window: &web_sys::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Touch screen or coarse pointer
pub fn is_touch_device() -> bool {
    let Some(window) = window() else {
        return false;
    };

    window.navigator().max_touch_points() > 0
        || Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || media_matches(&window, "(pointer: coarse)")
        || media_matches(&window, "(any-pointer: coarse)")
}

/// Browser platform for a map bound to `container`
pub fn platform(container: HtmlElement, router: Rc<dyn Router>) -> MapPlatform {
    MapPlatform {
        scripts: Rc::new(WebScriptHost),
        maps: Rc::new(NaverMapFactory::new(container)),
        geolocation: Rc::new(WebGeolocation::default()),
        router,
        scheduler: Rc::new(TimeoutScheduler),
        touch_device: is_touch_device(),
    }
}
