//! Generic modal form controller.
//!
//! One controller drives one dialog bound to one remote form resource:
//! open (fetch the fragment), submit (POST without page navigation), close
//! (clear the content slot). Instances differ only by configuration.

use contracts::forms::SubmitAck;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement};

use crate::shared::cookies;
use crate::shared::forms;

use super::http::{self, FetchError};
use super::state::{
    DialogContent, InitGuard, RequestSequence, SubmissionGuard, LOAD_FAILED, SUBMIT_FAILED,
};

/// Delay between showing the acknowledgment and hiding the dialog.
const CLOSE_DELAY_MS: u32 = 2_000;

/// Static configuration distinguishing one modal form instance from another.
pub struct ModalFormConfig {
    /// Instance name used in logs.
    pub name: &'static str,
    /// Class carried by trigger elements; matched by delegation so triggers
    /// inserted after initialization still work.
    pub trigger_class: &'static str,
    /// Trigger attribute holding the numeric resource id, when the resource
    /// URL is templated per id.
    pub resource_attr: Option<&'static str>,
    /// `id` of the form element inside the fetched fragment.
    pub form_id: &'static str,
    /// Dialog title.
    pub title: &'static str,
    /// Acknowledgment shown after a successful submission.
    pub success_heading: &'static str,
    pub success_body: &'static str,
    /// Builds the fragment URL from the trigger's resource id.
    pub resource_url: fn(Option<u64>) -> String,
    /// Header carrying the anti-forgery token on submissions.
    pub security_header: &'static str,
    /// Runs as the dialog opens, before the fragment fetch.
    pub on_open: Option<fn()>,
}

/// Controller for a single modal form instance.
///
/// Cheap to copy; all state lives in signals and stored values so event
/// handlers and async continuations can share it.
#[derive(Clone, Copy)]
pub struct ModalFormController {
    config: &'static ModalFormConfig,
    open: RwSignal<bool>,
    content: RwSignal<DialogContent>,
    guard: StoredValue<SubmissionGuard>,
    sequence: StoredValue<RequestSequence>,
    init: StoredValue<InitGuard>,
}

impl ModalFormController {
    pub fn new(config: &'static ModalFormConfig) -> Self {
        Self {
            config,
            open: RwSignal::new(false),
            content: RwSignal::new(DialogContent::Empty),
            guard: StoredValue::new(SubmissionGuard::new()),
            sequence: StoredValue::new(RequestSequence::new()),
            init: StoredValue::new(InitGuard::new()),
        }
    }

    pub fn config(&self) -> &'static ModalFormConfig {
        self.config
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn content(&self) -> DialogContent {
        self.content.get()
    }

    /// Bind the controller's delegated document listeners.
    ///
    /// Idempotent: only the first call binds anything; later calls are
    /// no-ops and return false.
    pub fn install(&self) -> bool {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document,
            None => {
                log::error!("{}: no document to bind listeners to", self.config.name);
                return false;
            }
        };
        if !self.init.with_value(|init| init.acquire()) {
            log::info!("{}: already initialized, skipping", self.config.name);
            return false;
        }

        // Trigger clicks, delegated from the document so server-rendered and
        // late-inserted triggers are both covered.
        let this = *self;
        let trigger_selector = format!(".{}", self.config.trigger_class);
        let click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(element) = target.dyn_ref::<Element>() else {
                return;
            };
            let Ok(Some(trigger)) = element.closest(&trigger_selector) else {
                return;
            };
            let resource_id = this
                .config
                .resource_attr
                .and_then(|attr| trigger.get_attribute(attr))
                .and_then(|value| value.parse::<u64>().ok());
            if this.config.resource_attr.is_some() && resource_id.is_none() {
                log::error!("{}: trigger carries no usable resource id", this.config.name);
                return;
            }
            this.open(resource_id);
        }) as Box<dyn FnMut(_)>);
        let _ = document.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
        // Listeners live for the page lifetime.
        click.forget();

        // Form submission, delegated the same way: the fragment's markup is
        // server-rendered and carries no client-side handlers of its own.
        let this = *self;
        let submit = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(form) = target.dyn_ref::<HtmlFormElement>() else {
                return;
            };
            if form.id() != this.config.form_id {
                return;
            }
            event.prevent_default();
            this.submit(form);
        }) as Box<dyn FnMut(_)>);
        let _ =
            document.add_event_listener_with_callback("submit", submit.as_ref().unchecked_ref());
        submit.forget();

        log::info!("{}: initialized", self.config.name);
        true
    }

    /// Open the dialog and load the form fragment into it.
    pub fn open(&self, resource_id: Option<u64>) {
        log::info!("{}: opening dialog", self.config.name);
        let ticket = self.sequence.with_value(|sequence| sequence.begin());
        self.open.set(true);
        self.content.set(DialogContent::Loading);
        if let Some(hook) = self.config.on_open {
            hook();
        }

        let url = (self.config.resource_url)(resource_id);
        let this = *self;
        spawn_local(async move {
            let result = http::get_fragment(&url).await;
            if !this.sequence.with_value(|sequence| sequence.is_current(ticket)) {
                // A newer open() or a close() won the race.
                log::debug!("{}: discarding stale fragment response", this.config.name);
                return;
            }
            match result {
                Ok(markup) => {
                    log::info!("{}: form fragment loaded", this.config.name);
                    this.content.set(DialogContent::Markup(markup));
                }
                Err(error) => this.fail(error, LOAD_FAILED),
            }
        });
    }

    /// Submit the form currently hosted in the dialog.
    ///
    /// Native submission is suppressed by the delegated listener before this
    /// is called. Duplicate attempts while a submission is outstanding are
    /// dropped.
    pub fn submit(&self, form: &HtmlFormElement) {
        if !self.guard.with_value(|guard| guard.try_acquire()) {
            log::debug!("{}: submission already in flight, ignoring", self.config.name);
            return;
        }

        let action = form.action();
        let body = match forms::urlencoded_body(form) {
            Ok(body) => body,
            Err(error) => {
                log::error!("{}: {}", self.config.name, error);
                self.content.set(DialogContent::Failed(SUBMIT_FAILED));
                self.guard.with_value(|guard| guard.release());
                return;
            }
        };
        let token = cookies::csrf_token();
        if token.is_none() {
            log::warn!(
                "{}: no {} cookie, submitting without {}",
                self.config.name,
                cookies::CSRF_COOKIE,
                self.config.security_header
            );
        }

        log::info!("{}: submitting to {}", self.config.name, action);
        let this = *self;
        spawn_local(async move {
            let header = token.map(|value| (this.config.security_header, value));
            let result = http::post_form(&action, body, header).await;
            // Settled: accept the next submission whatever the outcome was.
            this.guard.with_value(|guard| guard.release());
            match result {
                Ok(payload) => {
                    match serde_json::from_str::<SubmitAck>(&payload) {
                        Ok(ack) => log::info!("{}: {}", this.config.name, ack.message),
                        Err(_) => log::info!("{}: submission accepted", this.config.name),
                    }
                    this.content.set(DialogContent::Notice {
                        heading: this.config.success_heading,
                        body: this.config.success_body,
                    });
                    TimeoutFuture::new(CLOSE_DELAY_MS).await;
                    this.close();
                }
                Err(error) => this.fail(error, SUBMIT_FAILED),
            }
        });
    }

    /// Close the dialog and clear the content slot.
    ///
    /// The clear happens here, not in open(): open() must show a loading
    /// state distinct from stale content, so close is the single place that
    /// guarantees the next open starts blank.
    pub fn close(&self) {
        self.sequence.with_value(|sequence| sequence.invalidate());
        self.open.set(false);
        self.content.set(DialogContent::Empty);
        log::info!("{}: dialog closed", self.config.name);
    }

    fn fail(&self, error: FetchError, text: &'static str) {
        log::error!("{}: request failed: {:?}", self.config.name, error);
        self.content.set(DialogContent::Failed(text));
        if let Some(url) = http::redirect_target(&error) {
            log::warn!("{}: not authenticated, redirecting to {}", self.config.name, url);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        }
    }
}
