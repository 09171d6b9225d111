use thiserror::Error;

/// Everything that can go wrong while wiring or rendering a modal.
///
/// None of these reach the user; the DOM layer logs them and carries on.
#[derive(Debug, Error)]
pub enum ModalError {
    #[error("Element not found: {id}")]
    ElementNotFound { id: String },

    #[error("Unknown modal: {0}")]
    UnknownModal(String),

    #[error("Modal registered twice: {0}")]
    DuplicateModal(String),

    #[error("Element identifier cannot be empty")]
    EmptyIdentifier,

    #[error("Invalid modal configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ModalError {
    pub fn element_not_found(id: impl Into<String>) -> Self {
        ModalError::ElementNotFound { id: id.into() }
    }

    /// True for the "element absent" case, which callers treat as a silent skip.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, ModalError::ElementNotFound { .. })
    }
}

pub type ModalResult<T> = Result<T, ModalError>;
