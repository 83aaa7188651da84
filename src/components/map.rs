use yew::prelude::*;

use crate::context::LanguageContext;
use crate::hooks::use_map;
use crate::models::MapViewProps;
use crate::state::MapStatus;

#[derive(Properties, PartialEq)]
pub struct MapContainerProps {
    pub view: MapViewProps,
    #[prop_or_default]
    pub class: Classes,
    /// Host router; `history.pushState` is used when absent
    #[prop_or_default]
    pub on_navigate: Option<Callback<String>>,
}

#[function_component(MapContainer)]
pub fn map_container(props: &MapContainerProps) -> Html {
    let container = use_node_ref();
    let texts = use_memo(props.view.language, |language| LanguageContext::new(*language));
    let map = use_map(container.clone(), props.view.clone(), props.on_navigate.clone());
    let state = (*map.state).clone();

    let wrapper_class = classes!("naver-map", props.class.clone());

    if state.status == MapStatus::ConfigMissing {
        return html! {
            <div class={wrapper_class}>
                <div class="naver-map__message" role="alert">
                    { texts.get("missing_client_id") }
                </div>
            </div>
        };
    }

    let locate_button = if state.show_locate_button {
        let onclick = {
            let center = map.center_on_my_location.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                center.emit(());
            })
        };
        let label = if state.locating {
            texts.get("locating")
        } else {
            texts.get("my_location")
        };

        html! {
            <button
                type="button"
                class={classes!("naver-map__locate", state.locating.then_some("is-locating"))}
                aria-label={texts.get("move_to_current_location")}
                title={texts.get("move_to_current_location")}
                disabled={state.locating}
                {onclick}
            >
                <span class="naver-map__locate-icon" aria-hidden="true">{"◎"}</span>
                <span>{ label }</span>
            </button>
        }
    } else {
        html! {}
    };

    let overlay = if state.show_overlay() {
        let message = match state.status {
            MapStatus::Unavailable => texts.get("map_unavailable"),
            _ => texts.get("map_loading"),
        };
        html! {
            <div class="naver-map__overlay" aria-live="polite">
                <span>{ message }</span>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class={wrapper_class}>
            <div ref={container} class="naver-map__canvas" style="width:100%;height:100%;" />
            { locate_button }
            { overlay }
        </div>
    }
}
