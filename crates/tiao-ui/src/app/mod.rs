use gloo::console;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use tiao_telemetry::{COMPILED_BUILD_SHA, LogFormat, LoggingConfig, init_logging};
use tracing::info;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MessageEvent};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::overlay::Overlay;
use crate::core::commands::{Key, UiCommand};
use crate::core::engine::UiEngine;
use crate::core::store::AppStore;

mod host;
mod runtime;
mod transport;

use host::{focus_in_textarea, load_config};
use runtime::Runtime;

#[function_component(EconomyApp)]
pub(crate) fn economy_app() -> Html {
    let runtime = use_memo(|_| Runtime::new(), ());
    let engine = use_selector(|store: &AppStore| store.engine.clone());

    {
        let runtime = (*runtime).clone();
        use_effect_with_deps(
            move |_| {
                let on_message = {
                    let runtime = runtime.clone();
                    EventListener::new(&window(), "message", move |event| {
                        let Some(event) = event.dyn_ref::<MessageEvent>() else {
                            return;
                        };
                        match js_sys::JSON::stringify(&event.data()) {
                            Ok(raw) => runtime.host_json(&String::from(raw)),
                            Err(_) => console::error!("host message could not be serialised"),
                        }
                    })
                };
                let on_keydown = EventListener::new(&document(), "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if let Some(key) = Key::from_name(&event.key()) {
                        runtime.command(UiCommand::KeyPress {
                            key,
                            in_textarea: focus_in_textarea(),
                        });
                    }
                });
                move || {
                    drop(on_message);
                    drop(on_keydown);
                }
            },
            (),
        );
    }

    let on_command = {
        let runtime = (*runtime).clone();
        Callback::from(move |command: UiCommand| runtime.command(command))
    };

    html! {
        <Overlay engine={(*engine).clone()} {on_command} />
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = load_config();
    let logging = LoggingConfig {
        level: config.log_level(),
        format: LogFormat::from_setting(config.log_format.as_deref()),
        build_sha: COMPILED_BUILD_SHA,
    };
    if let Err(err) = init_logging(&logging) {
        console::error!(format!("logging unavailable: {err}"));
    }
    info!(
        resource = %config.resource_name,
        build_sha = COMPILED_BUILD_SHA,
        "economy panel starting"
    );
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        store.engine = UiEngine::new(config);
    });
    if let Some(root) = document().get_element_by_id("root") {
        yew::Renderer::<EconomyApp>::with_root(root).render();
    } else {
        yew::Renderer::<EconomyApp>::new().render();
    }
}
