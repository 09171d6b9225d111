//! Browser-independent modal state and click routing for the Literary Lions forum pages.

pub mod config;
pub mod error;
pub mod modal;
pub mod page;

pub use config::{
    LogLevel, ModalConfig, OutsideClickPolicy, PageConfig, TriggerBinding, COMMENT_MODAL,
    POSTING_MODAL, REGISTRATION_MODAL,
};
pub use error::{ModalError, ModalResult};
pub use modal::{DisplaySurface, ModalController, ModalState, Transition};
pub use page::{ClickOutcome, ModalPage};
