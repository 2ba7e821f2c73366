//! Dialog component for a modal form instance.

use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use super::controller::ModalFormController;
use super::state::DialogContent;

/// Renders one controller's dialog: overlay, header, and the content slot.
///
/// Mounted once per controller; visibility follows the controller's open
/// state.
#[component]
pub fn ModalFormDialog(controller: ModalFormController) -> impl IntoView {
    // Escape closes the dialog. Bound once for the page lifetime, like the
    // controller's own delegated listeners.
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && controller.is_open() {
                    controller.close();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release landed on the overlay itself, so
    // selecting text inside the dialog and releasing outside does not close.
    let handle_overlay_mouse_down = {
        let is_direct_overlay_event = is_direct_overlay_event;
        move |ev: ev::MouseEvent| {
            overlay_mouse_down.set(is_direct_overlay_event(&ev));
        }
    };

    let handle_overlay_click = {
        let is_direct_overlay_event = is_direct_overlay_event;
        move |ev: ev::MouseEvent| {
            let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
            overlay_mouse_down.set(false);
            if should_close {
                // Defer to next tick: the overlay is removed during its own
                // click dispatch otherwise.
                spawn_local(async move {
                    TimeoutFuture::new(0).await;
                    controller.close();
                });
            }
        }
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let title = controller.config().title;

    view! {
        <Show when=move || controller.is_open()>
            <div
                class="modal-overlay"
                on:mousedown=handle_overlay_mouse_down
                on:click=handle_overlay_click
            >
                <div class="modal" on:click=stop_propagation>
                    <div class="modal-header">
                        <h2 class="modal-title">{title}</h2>
                        <button class="btn-close" on:click=move |_| controller.close()>
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">
                        {move || match controller.content() {
                            DialogContent::Empty => view! { <></> }.into_any(),
                            DialogContent::Loading => {
                                view! {
                                    <Flex>
                                        <Spinner />
                                        <span>"Loading…"</span>
                                    </Flex>
                                }
                                    .into_any()
                            }
                            DialogContent::Markup(markup) => {
                                view! { <div inner_html=markup></div> }.into_any()
                            }
                            DialogContent::Notice { heading, body } => {
                                view! {
                                    <h5>{heading}</h5>
                                    <p>{body}</p>
                                }
                                    .into_any()
                            }
                            DialogContent::Failed(text) => {
                                view! { <p class="error-message">{text}</p> }.into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}
