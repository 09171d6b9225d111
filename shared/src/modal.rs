use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModalResult;

/// Visibility of a single modal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Hidden,
    Visible,
}

impl ModalState {
    /// Value written to the element's inline `display` style
    pub fn display_value(&self) -> &'static str {
        match self {
            ModalState::Hidden => "none",
            ModalState::Visible => "block",
        }
    }

    /// Read a state back from an inline `display` value.
    ///
    /// An empty value means no inline style was ever set, which the page
    /// stylesheet renders as hidden.
    pub fn from_display(value: &str) -> Self {
        match value.trim() {
            "" | "none" => ModalState::Hidden,
            _ => ModalState::Visible,
        }
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalState::Hidden => write!(f, "hidden"),
            ModalState::Visible => write!(f, "visible"),
        }
    }
}

/// Record of one applied open/close action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub modal_id: String,
    pub from: ModalState,
    pub to: ModalState,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

/// Anything that can show the state of a modal.
///
/// The browser implementation writes `style.display`; tests use an in-memory map.
/// A state is only committed once the surface has accepted it, so an absent
/// modal element must be reported as `ElementNotFound`.
pub trait DisplaySurface {
    fn set_display(&mut self, modal_id: &str, state: ModalState) -> ModalResult<()>;
}

/// Owns the visibility state of one modal, identified by its element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalController {
    modal_id: String,
    state: ModalState,
}

impl ModalController {
    pub fn new(modal_id: impl Into<String>) -> Self {
        Self {
            modal_id: modal_id.into(),
            state: ModalState::Hidden,
        }
    }

    pub fn modal_id(&self) -> &str {
        &self.modal_id
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ModalState::Visible
    }

    pub fn open(&mut self) -> Transition {
        self.set(ModalState::Visible)
    }

    pub fn close(&mut self) -> Transition {
        self.set(ModalState::Hidden)
    }

    fn set(&mut self, to: ModalState) -> Transition {
        let from = std::mem::replace(&mut self.state, to);
        Transition {
            modal_id: self.modal_id.clone(),
            from,
            to,
        }
    }
}
