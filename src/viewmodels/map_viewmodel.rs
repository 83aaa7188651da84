// ============================================================================
// MAP VIEWMODEL - One mounted map view
// ============================================================================
// Waits for the SDK, builds the map once per mount, places the markers,
// serializes marker-click navigation and tracks the user's position.
// All callbacks hold a Weak reference and check the mount generation, so
// anything arriving after unmount (or after a remount) is dropped.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::normalize_client_id;
use crate::context::LanguageContext;
use crate::maps::{
    sdk_script_url, MapError, MapMarker, MapOptions, MapPlatform, MapSurface, MarkerIcon, MarkerOptions,
    PositionResult, SdkLoadState, SdkLoader, WatchId,
};
use crate::models::{LatLng, MapViewConfig, MapViewProps, PlaceMarkerSpec};
use crate::state::{FixQuality, FixSource, LocationTracker, MapStatus, MapViewState, ReactiveState};
use crate::utils::constants::{
    FAST_FIX_OPTIONS, MARKER_NAVIGATION_DELAY_MS, PRECISE_FIX_OPTIONS, WATCH_OPTIONS,
};

#[derive(Default)]
struct MapSession {
    mounted: bool,
    initialized: bool,
    /// Bumped on mount and unmount
    generation: u64,
    map: Option<Rc<dyn MapSurface>>,
    location_marker: Option<Rc<dyn MapMarker>>,
    watch_id: Option<WatchId>,
    tracker: LocationTracker,
    auto_centered: bool,
    navigating: bool,
}

struct Inner {
    config: MapViewConfig,
    markers: Vec<PlaceMarkerSpec>,
    platform: MapPlatform,
    loader: SdkLoader,
    client_id: Option<String>,
    texts: LanguageContext,
    navigation_delay_ms: Cell<u32>,
    state: ReactiveState<MapViewState>,
    session: RefCell<MapSession>,
}

#[derive(Clone)]
pub struct MapViewModel {
    inner: Rc<Inner>,
}

impl MapViewModel {
    pub fn new(
        props: &MapViewProps,
        platform: MapPlatform,
        loader: SdkLoader,
        client_id: Option<&str>,
    ) -> Self {
        let config = props.config();
        let texts = LanguageContext::new(config.language);

        Self {
            inner: Rc::new(Inner {
                markers: props.place_markers(),
                config,
                platform,
                loader,
                client_id: normalize_client_id(client_id),
                texts,
                navigation_delay_ms: Cell::new(MARKER_NAVIGATION_DELAY_MS),
                state: ReactiveState::new(MapViewState::default()),
                session: RefCell::new(MapSession::default()),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn set_navigation_delay(&self, delay_ms: u32) {
        self.inner.navigation_delay_ms.set(delay_ms);
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.inner.config
    }

    pub fn state(&self) -> MapViewState {
        self.inner.state.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&MapViewState) + 'static,
    {
        self.inner.state.subscribe(callback);
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.session.borrow().initialized
    }

    pub fn live_location(&self) -> Option<LatLng> {
        self.inner.session.borrow().tracker.latest()
    }

    fn is_current(&self, generation: u64) -> bool {
        let session = self.inner.session.borrow();
        session.mounted && session.generation == generation
    }

    fn current_map(&self) -> Option<Rc<dyn MapSurface>> {
        self.inner.session.borrow().map.clone()
    }

    fn set_status(&self, status: MapStatus) {
        self.inner.state.update(|state| {
            if state.status == status {
                return false;
            }
            state.status = status;
            if status != MapStatus::Ready {
                state.show_locate_button = false;
            }
            true
        });
    }

    /// Attach the view: request the SDK and build the map once it is ready
    pub fn mount(&self) {
        let inner = &self.inner;

        let Some(client_id) = inner.client_id.clone() else {
            log::error!("❌ NAVER_CLIENT_ID is not configured, map disabled");
            self.set_status(MapStatus::ConfigMissing);
            return;
        };

        let generation = {
            let mut session = inner.session.borrow_mut();
            if session.mounted {
                log::warn!("⚠️ Map view already mounted, ignoring");
                return;
            }
            session.mounted = true;
            session.generation += 1;
            session.generation
        };

        let language = inner.config.language;
        let src = match sdk_script_url(&client_id, language) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::error!("❌ Invalid SDK URL: {}", e);
                self.set_status(MapStatus::Unavailable);
                return;
            }
        };

        self.set_status(MapStatus::Loading);

        let weak = Rc::downgrade(&self.inner);
        inner.loader.ensure(&inner.platform.scripts, &src, language, move |sdk_state| {
            let Some(view) = Self::from_weak(&weak) else {
                return;
            };
            if !view.is_current(generation) {
                log::debug!("🗺️ View unmounted before the SDK settled");
                return;
            }

            match sdk_state {
                SdkLoadState::Ready => view.initialize(),
                _ => view.set_status(MapStatus::Unavailable),
            }
        });
    }

    fn initialize(&self) {
        let inner = &self.inner;

        let (generation, stale_watch) = {
            let mut session = inner.session.borrow_mut();
            if !session.mounted || session.initialized {
                return;
            }
            session.location_marker = None;
            session.tracker.reset();
            session.auto_centered = false;
            (session.generation, session.watch_id.take())
        };

        if let Some(id) = stale_watch {
            inner.platform.geolocation.clear_watch(id);
        }

        if !inner.config.center.is_valid() {
            log::error!("❌ {}", MapError::InvalidCoordinates(inner.config.center));
            self.set_status(MapStatus::Unavailable);
            return;
        }

        let touch = inner.platform.touch_device;
        let options = MapOptions {
            center: inner.config.center,
            zoom: inner.config.zoom,
            zoom_control: !touch,
        };

        log::info!("🗺️ Creating map at {} (zoom {})", options.center, options.zoom);
        let map = match inner.platform.maps.create_map(&options) {
            Ok(map) => map,
            Err(e) => {
                log::error!("❌ Map construction failed: {}", e);
                self.set_status(MapStatus::Unavailable);
                return;
            }
        };

        if inner.markers.is_empty() {
            self.place_default_marker(map.as_ref());
        } else {
            self.place_markers(map.as_ref());
        }

        {
            let mut session = inner.session.borrow_mut();
            session.map = Some(map);
            session.initialized = true;
        }

        let locate_button = !touch && inner.platform.geolocation.is_supported();
        inner.state.update(|state| {
            state.status = MapStatus::Ready;
            state.show_locate_button = locate_button;
            true
        });

        self.start_tracking(generation);
    }

    fn place_default_marker(&self, map: &dyn MapSurface) {
        let config = &self.inner.config;
        let marker = map.add_marker(MarkerOptions {
            position: config.center,
            title: config.default_marker_title.clone(),
            icon: MarkerIcon::Default,
        });

        match marker {
            Ok(marker) => {
                if let Some(label) = &config.default_marker_label {
                    if let Err(e) = map.open_info_window(marker.as_ref(), label) {
                        log::warn!("⚠️ Could not open info window: {}", e);
                    }
                }
            }
            Err(e) => log::warn!("⚠️ Default marker not placed: {}", e),
        }
    }

    fn place_markers(&self, map: &dyn MapSurface) {
        for (index, spec) in self.inner.markers.iter().enumerate() {
            let marker = map.add_marker(MarkerOptions {
                position: spec.position(),
                title: spec.title.clone(),
                icon: MarkerIcon::PlaceLabel(spec.display_label().to_string()),
            });

            match marker {
                Ok(marker) => {
                    let weak = Rc::downgrade(&self.inner);
                    marker.on_click(Box::new(move || {
                        if let Some(view) = Self::from_weak(&weak) {
                            view.handle_marker_click(index);
                        }
                    }));
                }
                Err(e) => log::warn!("⚠️ Marker '{}' not placed: {}", spec.id, e),
            }
        }
        log::info!("📍 {} place markers on the map", self.inner.markers.len());
    }

    /// Same as clicking the marker with this id. False when the click was ignored.
    pub fn click_marker(&self, id: &str) -> bool {
        match self.inner.markers.iter().position(|spec| spec.id == id) {
            Some(index) => self.handle_marker_click(index),
            None => false,
        }
    }

    fn handle_marker_click(&self, index: usize) -> bool {
        let inner = &self.inner;
        let Some(spec) = inner.markers.get(index) else {
            return false;
        };

        let (map, generation) = {
            let mut session = inner.session.borrow_mut();
            if !session.mounted {
                return false;
            }
            if session.navigating {
                log::debug!("⏳ Navigation in flight, click on '{}' ignored", spec.id);
                return false;
            }
            let Some(map) = session.map.clone() else {
                return false;
            };
            session.navigating = true;
            (map, session.generation)
        };

        map.pan_to(spec.position());

        let weak = Rc::downgrade(&self.inner);
        let href = spec.navigation_target.clone();
        inner.platform.scheduler.schedule(
            inner.navigation_delay_ms.get(),
            Box::new(move || {
                let Some(view) = Self::from_weak(&weak) else {
                    return;
                };
                let still_mounted = {
                    let mut session = view.inner.session.borrow_mut();
                    session.navigating = false;
                    session.mounted && session.generation == generation
                };

                if still_mounted {
                    log::info!("🧭 Navigating to {}", href);
                    view.inner.platform.router.push(&href);
                } else {
                    log::debug!("🧭 View unmounted, navigation to {} dropped", href);
                }
            }),
        );
        true
    }

    fn fix_callback(&self, generation: u64, source: FixSource) -> Box<dyn FnOnce(PositionResult)> {
        let weak = Rc::downgrade(&self.inner);
        Box::new(move |result| {
            if let Some(view) = Self::from_weak(&weak) {
                view.on_position(generation, source, result);
            }
        })
    }

    fn start_tracking(&self, generation: u64) {
        let geolocation = self.inner.platform.geolocation.clone();
        if !geolocation.is_supported() {
            log::debug!("📍 Geolocation not supported, keeping the default center");
            return;
        }

        geolocation.current_position(FAST_FIX_OPTIONS, self.fix_callback(generation, FixSource::Fast));
        geolocation.current_position(PRECISE_FIX_OPTIONS, self.fix_callback(generation, FixSource::Precise));

        let weak = Rc::downgrade(&self.inner);
        let watch_id = geolocation.watch_position(
            WATCH_OPTIONS,
            Rc::new(move |result| {
                if let Some(view) = Self::from_weak(&weak) {
                    view.on_position(generation, FixSource::Watch, result);
                }
            }),
        );

        let orphan = {
            let mut session = self.inner.session.borrow_mut();
            if session.mounted && session.generation == generation {
                session.watch_id = watch_id;
                None
            } else {
                watch_id
            }
        };
        if let Some(id) = orphan {
            geolocation.clear_watch(id);
        }
    }

    fn on_position(&self, generation: u64, source: FixSource, result: PositionResult) -> bool {
        match result {
            Ok(position) => self.apply_fix(generation, source, position),
            Err(e) => {
                log::debug!("📍 Location fix ({:?}) failed: {}", source, e);
                false
            }
        }
    }

    fn apply_fix(&self, generation: u64, source: FixSource, position: LatLng) -> bool {
        let inner = &self.inner;

        let (map, existing, recenter) = {
            let mut session = inner.session.borrow_mut();
            if !session.mounted || session.generation != generation {
                return false;
            }
            let Some(map) = session.map.clone() else {
                return false;
            };
            let previous = session.tracker.quality();
            if !session.tracker.accept(source, position) {
                return false;
            }
            // A cached fast fix is followed once more by the first precise one
            let upgraded = previous == FixQuality::FastFix
                && session.tracker.quality() == FixQuality::PreciseFix;
            let recenter = inner.platform.touch_device && (!session.auto_centered || upgraded);
            if recenter {
                session.auto_centered = true;
            }
            (map, session.location_marker.clone(), recenter)
        };

        match existing {
            Some(marker) => marker.set_position(position),
            None => {
                let created = map.add_marker(MarkerOptions {
                    position,
                    title: inner.texts.get("current_location"),
                    icon: MarkerIcon::LiveLocation,
                });
                match created {
                    Ok(marker) => inner.session.borrow_mut().location_marker = Some(marker),
                    Err(e) => log::warn!("⚠️ Location marker not placed: {}", e),
                }
            }
        }

        if recenter {
            log::debug!("📍 Touch device, centering on the user");
            map.set_center(position);
        }

        inner.state.update(|state| {
            state.live_location = Some(position);
            true
        });
        true
    }

    /// "My location" action: reuse the last fix or ask for a precise one, then recenter
    pub fn center_on_my_location(&self) {
        let inner = &self.inner;
        let geolocation = inner.platform.geolocation.clone();

        let (map, latest, generation) = {
            let session = inner.session.borrow();
            let Some(map) = session.map.clone() else {
                return;
            };
            if !session.mounted {
                return;
            }
            (map, session.tracker.latest(), session.generation)
        };

        if !geolocation.is_supported() {
            return;
        }

        if let Some(position) = latest {
            map.set_center(position);
            return;
        }

        if inner.state.get().locating {
            return;
        }
        inner.state.update(|state| {
            state.locating = true;
            true
        });

        let weak = Rc::downgrade(&self.inner);
        geolocation.current_position(
            PRECISE_FIX_OPTIONS,
            Box::new(move |result| {
                let Some(view) = Self::from_weak(&weak) else {
                    return;
                };
                view.inner.state.update(|state| std::mem::replace(&mut state.locating, false));

                if let Ok(position) = result {
                    if view.apply_fix(generation, FixSource::Precise, position) {
                        if let Some(map) = view.current_map() {
                            map.set_center(position);
                        }
                    }
                } else {
                    log::debug!("📍 Manual location request failed");
                }
            }),
        );
    }

    /// Detach the view: drop the map and stop location tracking
    pub fn unmount(&self) {
        let watch_id = {
            let mut session = self.inner.session.borrow_mut();
            session.mounted = false;
            session.initialized = false;
            session.generation += 1;
            session.map = None;
            session.location_marker = None;
            session.tracker.reset();
            session.auto_centered = false;
            session.watch_id.take()
        };

        if let Some(id) = watch_id {
            self.inner.platform.geolocation.clear_watch(id);
            log::debug!("📍 Location watch {:?} cleared", id);
        }
        self.inner.state.clear_subscribers();
        log::info!("🗺️ Map view unmounted");
    }
}
