//! Site-wide contact form modal.
//!
//! The trigger lives in the page header; the fragment endpoint is fixed.

use crate::shared::modal_form::ModalFormConfig;

/// Fragment endpoint for the contact form.
pub fn form_url() -> String {
    "/contact_form/".to_string()
}

fn resource_url(_resource_id: Option<u64>) -> String {
    form_url()
}

pub static CONFIG: ModalFormConfig = ModalFormConfig {
    name: "contact",
    trigger_class: "contact-button",
    resource_attr: None,
    form_id: "contactForm",
    title: "Contact Us",
    success_heading: "Thank You!",
    success_body: "Thank you for contacting us!",
    resource_url,
    security_header: "X-CSRFToken",
    on_open: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_url() {
        assert_eq!(form_url(), "/contact_form/");
        assert_eq!((CONFIG.resource_url)(None), "/contact_form/");
    }
}
