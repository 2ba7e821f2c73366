//! Per-comment abuse report modal.
//!
//! Report buttons are rendered next to each comment and carry the comment id
//! in `data-comment-id`; the fragment endpoint is templated by that id.

use wasm_bindgen::JsCast;

use crate::shared::modal_form::ModalFormConfig;

/// Fragment endpoint for a comment's report form.
pub fn form_url(comment_id: u64) -> String {
    format!("/report_comment_form/{}/", comment_id)
}

fn resource_url(comment_id: Option<u64>) -> String {
    // install() refuses triggers without a usable id, so this only ever
    // sees Some.
    form_url(comment_id.unwrap_or_default())
}

/// Comment action menus sit under the dialog overlay; collapse any that are
/// open as the dialog appears.
fn close_open_dropdowns() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(menus) = document.query_selector_all(".dropdown-menu.show") else {
        return;
    };
    for index in 0..menus.length() {
        if let Some(node) = menus.item(index) {
            if let Some(element) = node.dyn_ref::<web_sys::Element>() {
                let _ = element.class_list().remove_1("show");
            }
        }
    }
}

pub static CONFIG: ModalFormConfig = ModalFormConfig {
    name: "report-comment",
    trigger_class: "report-comment-button",
    resource_attr: Some("data-comment-id"),
    form_id: "reportForm",
    title: "Report Comment",
    success_heading: "Report received",
    success_body: "Thank you. Our moderators will review this comment.",
    resource_url,
    security_header: "X-CSRFToken",
    on_open: Some(close_open_dropdowns),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_url_is_templated_by_comment_id() {
        assert_eq!(form_url(7), "/report_comment_form/7/");
        assert_eq!((CONFIG.resource_url)(Some(42)), "/report_comment_form/42/");
    }
}
