// ============================================================================
// USE MAP HOOK - Naver map lifecycle for one container
// ============================================================================
// Yew hook: owns the MapViewModel, mirrors its state into a UseStateHandle
// and tears everything down when the props change or the component unmounts.
// ============================================================================

use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::maps::traits::Router;
use crate::maps::web::{self, CallbackRouter, HistoryRouter};
use crate::maps::SdkLoader;
use crate::models::MapViewProps;
use crate::state::MapViewState;
use crate::viewmodels::MapViewModel;

/// What the map component needs from the hook
#[derive(Clone)]
pub struct UseMapHandle {
    pub state: UseStateHandle<MapViewState>,
    pub center_on_my_location: Callback<()>,
}

#[hook]
pub fn use_map(
    container: NodeRef,
    props: MapViewProps,
    on_navigate: Option<Callback<String>>,
) -> UseMapHandle {
    let state = use_state(MapViewState::default);
    let viewmodel = use_mut_ref(|| None::<MapViewModel>);

    {
        let state = state.clone();
        let viewmodel = viewmodel.clone();

        use_effect_with((props, on_navigate), move |(props, on_navigate)| {
            let mounted = match container.cast::<HtmlElement>() {
                Some(element) => {
                    let router: Rc<dyn Router> = match on_navigate.clone() {
                        Some(callback) => Rc::new(CallbackRouter::new(callback)),
                        None => Rc::new(HistoryRouter),
                    };

                    let vm = MapViewModel::new(
                        props,
                        web::platform(element, router),
                        SdkLoader::global(),
                        CONFIG.naver_client_id(),
                    );
                    vm.set_navigation_delay(CONFIG.map_config.navigation_delay_ms);

                    {
                        let state = state.clone();
                        vm.subscribe(move |snapshot| state.set(snapshot.clone()));
                    }
                    vm.mount();
                    state.set(vm.state());

                    log::debug!("🗺️ Map view mounted ({} markers)", props.markers.len());
                    Some(vm)
                }
                None => {
                    log::error!("❌ Map container element is not attached");
                    None
                }
            };

            *viewmodel.borrow_mut() = mounted;

            move || {
                if let Some(vm) = viewmodel.borrow_mut().take() {
                    vm.unmount();
                }
            }
        });
    }

    let center_on_my_location = {
        let viewmodel = viewmodel.clone();
        Callback::from(move |_| {
            let vm = viewmodel.borrow().clone();
            if let Some(vm) = vm {
                vm.center_on_my_location();
            }
        })
    };

    UseMapHandle {
        state,
        center_on_my_location,
    }
}
