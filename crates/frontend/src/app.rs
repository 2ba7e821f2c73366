use leptos::prelude::*;

use crate::domain::{contact, report_comment};
use crate::shared::modal_form::{ModalFormController, ModalFormDialog};

/// Application root: one controller per modal form instance.
///
/// Triggers are ordinary page markup (`.contact-button`,
/// `.report-comment-button[data-comment-id]`) matched by the controllers'
/// delegated listeners, so server-rendered pages need no extra wiring.
#[component]
pub fn App() -> impl IntoView {
    let contact = ModalFormController::new(&contact::CONFIG);
    let report = ModalFormController::new(&report_comment::CONFIG);

    contact.install();
    report.install();

    view! {
        <ModalFormDialog controller=contact />
        <ModalFormDialog controller=report />
    }
}
