use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{ModalError, ModalResult};

pub const REGISTRATION_MODAL: &str = "registrationModal";
pub const POSTING_MODAL: &str = "postingModal";
pub const COMMENT_MODAL: &str = "commentModal";

/// How a modal's open trigger is attached to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerBinding {
    /// Listener on the element itself; skipped when the element is absent at bind time
    Direct { element_id: String },
    /// Document-level listener matching the click target's id, so buttons
    /// rendered after load still work
    Delegated { element_id: String },
}

impl TriggerBinding {
    pub fn element_id(&self) -> &str {
        match self {
            TriggerBinding::Direct { element_id } | TriggerBinding::Delegated { element_id } => {
                element_id
            }
        }
    }
}

/// Where outside-click dismissal handlers live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutsideClickPolicy {
    /// Every modal keeps its own handler
    #[default]
    Additive,
    /// A single handler slot; each registration replaces the previous one.
    /// Matches pages that assigned `window.onclick` once per modal.
    LastWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        write!(f, "{}", name)
    }
}

/// Wiring for one modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalConfig {
    pub modal_id: String,
    pub open_trigger: TriggerBinding,
    /// CSS selector of the close icon; `#<modal_id> .close` when omitted
    #[serde(default)]
    pub close_selector: Option<String>,
}

impl ModalConfig {
    pub fn direct(modal_id: &str, trigger_id: &str) -> Self {
        Self {
            modal_id: modal_id.to_string(),
            open_trigger: TriggerBinding::Direct {
                element_id: trigger_id.to_string(),
            },
            close_selector: None,
        }
    }

    pub fn delegated(modal_id: &str, trigger_id: &str) -> Self {
        Self {
            modal_id: modal_id.to_string(),
            open_trigger: TriggerBinding::Delegated {
                element_id: trigger_id.to_string(),
            },
            close_selector: None,
        }
    }

    pub fn close_selector(&self) -> String {
        self.close_selector
            .clone()
            .unwrap_or_else(|| format!("#{} .close", self.modal_id))
    }

    pub fn validate(&self) -> ModalResult<()> {
        if self.modal_id.trim().is_empty() || self.open_trigger.element_id().trim().is_empty() {
            return Err(ModalError::EmptyIdentifier);
        }
        if let Some(selector) = &self.close_selector {
            if selector.trim().is_empty() {
                return Err(ModalError::EmptyIdentifier);
            }
        }
        Ok(())
    }
}

/// Page-wide modal configuration, optionally embedded in the page as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub modals: Vec<ModalConfig>,
    pub outside_click: OutsideClickPolicy,
    pub log_level: LogLevel,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            modals: vec![
                ModalConfig::direct(REGISTRATION_MODAL, "registerButton"),
                ModalConfig::delegated(POSTING_MODAL, "postButton"),
                ModalConfig::delegated(COMMENT_MODAL, "commentButton"),
            ],
            outside_click: OutsideClickPolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config block. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ModalResult<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ModalResult<()> {
        let mut seen = HashSet::new();
        for modal in &self.modals {
            modal.validate()?;
            if !seen.insert(modal.modal_id.as_str()) {
                return Err(ModalError::DuplicateModal(modal.modal_id.clone()));
            }
        }
        Ok(())
    }
}
