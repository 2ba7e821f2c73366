//! Configuration-driven modal form lifecycle.
//!
//! A [`ModalFormController`] owns the open/fetch/submit/close state machine
//! for one dialog bound to a remote form resource; [`ModalFormDialog`]
//! renders it. Instances are declared as static [`ModalFormConfig`] records
//! (see `crate::domain`).

pub mod controller;
pub mod dialog;
pub mod http;
pub mod state;

pub use controller::{ModalFormConfig, ModalFormController};
pub use dialog::ModalFormDialog;
pub use state::DialogContent;
