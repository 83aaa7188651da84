// In-memory platform used by the unit tests. Every callback is parked until
// the test resolves it, so async ordering is explicit.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::maps::traits::*;
use crate::models::LatLng;

type LoadDone = Box<dyn FnOnce(Result<(), SdkError>)>;

#[derive(Default)]
pub struct FakeScriptHost {
    injected: RefCell<Vec<String>>,
    pending: RefCell<Vec<LoadDone>>,
    present: Cell<bool>,
    removals: Cell<usize>,
    clears: Cell<usize>,
}

impl FakeScriptHost {
    pub fn injections(&self) -> usize {
        self.injected.borrow().len()
    }

    pub fn injected_sources(&self) -> Vec<String> {
        self.injected.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn removals(&self) -> usize {
        self.removals.get()
    }

    /// Complete the most recent injection
    pub fn finish_load(&self, result: Result<(), SdkError>) {
        let done = self.pending.borrow_mut().pop();
        self.complete(done, result);
    }

    /// Complete the oldest injection still pending
    pub fn finish_oldest(&self, result: Result<(), SdkError>) {
        let done = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() { None } else { Some(pending.remove(0)) }
        };
        self.complete(done, result);
    }

    fn complete(&self, done: Option<LoadDone>, result: Result<(), SdkError>) {
        let done = done.expect("no pending SDK load");
        if result.is_ok() {
            self.present.set(true);
        }
        done(result);
    }
}

impl ScriptHost for FakeScriptHost {
    fn sdk_present(&self) -> bool {
        self.present.get()
    }

    fn remove_loader_scripts(&self) {
        self.removals.set(self.removals.get() + 1);
    }

    fn clear_sdk_global(&self) {
        self.present.set(false);
        self.clears.set(self.clears.get() + 1);
    }

    fn inject_script(&self, src: &str, done: LoadDone) {
        self.injected.borrow_mut().push(src.to_string());
        self.pending.borrow_mut().push(done);
    }
}

pub struct FakeMarker {
    pub options: MarkerOptions,
    position: Cell<LatLng>,
    handler: RefCell<Option<Rc<dyn Fn()>>>,
}

impl FakeMarker {
    pub fn position(&self) -> LatLng {
        self.position.get()
    }

    pub fn click(&self) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl MapMarker for FakeMarker {
    fn set_position(&self, position: LatLng) {
        self.position.set(position);
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        *self.handler.borrow_mut() = Some(Rc::from(handler));
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub struct FakeMap {
    pub options: MapOptions,
    markers: RefCell<Vec<Rc<FakeMarker>>>,
    info_windows: RefCell<Vec<String>>,
    pans: RefCell<Vec<LatLng>>,
    centers: RefCell<Vec<LatLng>>,
}

impl FakeMap {
    pub fn markers(&self) -> Vec<Rc<FakeMarker>> {
        self.markers.borrow().clone()
    }

    pub fn markers_with(&self, icon: impl Fn(&MarkerIcon) -> bool) -> Vec<Rc<FakeMarker>> {
        self.markers
            .borrow()
            .iter()
            .filter(|marker| icon(&marker.options.icon))
            .cloned()
            .collect()
    }

    pub fn location_markers(&self) -> Vec<Rc<FakeMarker>> {
        self.markers_with(|icon| *icon == MarkerIcon::LiveLocation)
    }

    pub fn info_windows(&self) -> Vec<String> {
        self.info_windows.borrow().clone()
    }

    pub fn pans(&self) -> Vec<LatLng> {
        self.pans.borrow().clone()
    }

    pub fn centers(&self) -> Vec<LatLng> {
        self.centers.borrow().clone()
    }
}

impl MapSurface for FakeMap {
    fn add_marker(&self, options: MarkerOptions) -> Result<Rc<dyn MapMarker>, MapError> {
        let marker = Rc::new(FakeMarker {
            position: Cell::new(options.position),
            options,
            handler: RefCell::new(None),
        });
        self.markers.borrow_mut().push(marker.clone());
        Ok(marker)
    }

    fn open_info_window(&self, _marker: &dyn MapMarker, text: &str) -> Result<(), MapError> {
        self.info_windows.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn pan_to(&self, position: LatLng) {
        self.pans.borrow_mut().push(position);
    }

    fn set_center(&self, position: LatLng) {
        self.centers.borrow_mut().push(position);
    }
}

#[derive(Default)]
pub struct FakeMapFactory {
    maps: RefCell<Vec<Rc<FakeMap>>>,
    fail: Cell<bool>,
}

impl FakeMapFactory {
    pub fn maps(&self) -> Vec<Rc<FakeMap>> {
        self.maps.borrow().clone()
    }

    pub fn last_map(&self) -> Rc<FakeMap> {
        self.maps.borrow().last().cloned().expect("no map created")
    }

    pub fn fail_next(&self) {
        self.fail.set(true);
    }
}

impl MapFactory for FakeMapFactory {
    fn create_map(&self, options: &MapOptions) -> Result<Rc<dyn MapSurface>, MapError> {
        if self.fail.replace(false) {
            return Err(MapError::Sdk("constructor threw".into()));
        }
        let map = Rc::new(FakeMap {
            options: options.clone(),
            markers: RefCell::new(Vec::new()),
            info_windows: RefCell::new(Vec::new()),
            pans: RefCell::new(Vec::new()),
            centers: RefCell::new(Vec::new()),
        });
        self.maps.borrow_mut().push(map.clone());
        Ok(map)
    }
}

type OneShot = (PositionOptions, Box<dyn FnOnce(PositionResult)>);

pub struct FakeGeolocation {
    supported: Cell<bool>,
    one_shots: RefCell<Vec<OneShot>>,
    watches: RefCell<BTreeMap<i32, (PositionOptions, Rc<dyn Fn(PositionResult)>)>>,
    next_watch: Cell<i32>,
    cleared: RefCell<Vec<WatchId>>,
}

impl Default for FakeGeolocation {
    fn default() -> Self {
        Self {
            supported: Cell::new(true),
            one_shots: RefCell::new(Vec::new()),
            watches: RefCell::new(BTreeMap::new()),
            next_watch: Cell::new(1),
            cleared: RefCell::new(Vec::new()),
        }
    }
}

impl FakeGeolocation {
    pub fn set_supported(&self, supported: bool) {
        self.supported.set(supported);
    }

    pub fn pending_options(&self) -> Vec<PositionOptions> {
        self.one_shots.borrow().iter().map(|(options, _)| *options).collect()
    }

    /// Resolve the first pending one-shot whose accuracy flag matches
    pub fn resolve(&self, high_accuracy: bool, result: PositionResult) {
        let request = {
            let mut one_shots = self.one_shots.borrow_mut();
            let index = one_shots
                .iter()
                .position(|(options, _)| options.enable_high_accuracy == high_accuracy)
                .expect("no matching position request");
            one_shots.remove(index)
        };
        (request.1)(result);
    }

    /// Deliver a position to every active watch
    pub fn emit_watch(&self, result: PositionResult) {
        let callbacks: Vec<_> = self.watches.borrow().values().map(|(_, cb)| cb.clone()).collect();
        for callback in callbacks {
            callback(result.clone());
        }
    }

    pub fn active_watches(&self) -> Vec<PositionOptions> {
        self.watches.borrow().values().map(|(options, _)| *options).collect()
    }

    pub fn cleared(&self) -> Vec<WatchId> {
        self.cleared.borrow().clone()
    }
}

impl Geolocation for FakeGeolocation {
    fn is_supported(&self) -> bool {
        self.supported.get()
    }

    fn current_position(&self, options: PositionOptions, callback: Box<dyn FnOnce(PositionResult)>) {
        self.one_shots.borrow_mut().push((options, callback));
    }

    fn watch_position(&self, options: PositionOptions, callback: Rc<dyn Fn(PositionResult)>) -> Option<WatchId> {
        let id = self.next_watch.get();
        self.next_watch.set(id + 1);
        self.watches.borrow_mut().insert(id, (options, callback));
        Some(WatchId(id))
    }

    fn clear_watch(&self, id: WatchId) {
        self.watches.borrow_mut().remove(&id.0);
        self.cleared.borrow_mut().push(id);
    }
}

#[derive(Default)]
pub struct FakeRouter {
    pushes: RefCell<Vec<String>>,
}

impl FakeRouter {
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }
}

impl Router for FakeRouter {
    fn push(&self, href: &str) {
        self.pushes.borrow_mut().push(href.to_string());
    }
}

#[derive(Default)]
pub struct FakeScheduler {
    tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl FakeScheduler {
    pub fn delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Fire every timer scheduled so far
    pub fn run_pending(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}

/// Typed handles on the fakes behind a [`MapPlatform`]
pub struct FakePlatform {
    pub scripts: Rc<FakeScriptHost>,
    pub maps: Rc<FakeMapFactory>,
    pub geolocation: Rc<FakeGeolocation>,
    pub router: Rc<FakeRouter>,
    pub scheduler: Rc<FakeScheduler>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            scripts: Rc::new(FakeScriptHost::default()),
            maps: Rc::new(FakeMapFactory::default()),
            geolocation: Rc::new(FakeGeolocation::default()),
            router: Rc::new(FakeRouter::default()),
            scheduler: Rc::new(FakeScheduler::default()),
        }
    }

    pub fn platform(&self, touch_device: bool) -> MapPlatform {
        MapPlatform {
            scripts: self.scripts.clone(),
            maps: self.maps.clone(),
            geolocation: self.geolocation.clone(),
            router: self.router.clone(),
            scheduler: self.scheduler.clone(),
            touch_device,
        }
    }
}
