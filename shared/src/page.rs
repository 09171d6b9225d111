//! Click routing for every modal on a page.
//!
//! `ModalPage` is the browser-free half of the modal wiring: the DOM layer
//! reports which elements exist when binding and which element was clicked.
//! Each click renders to a `DisplaySurface` first and only commits the
//! states the surface accepted, so the page never tracks a modal as
//! visible when nothing is on screen.

use crate::config::{ModalConfig, OutsideClickPolicy, PageConfig, TriggerBinding};
use crate::error::{ModalError, ModalResult};
use crate::modal::{DisplaySurface, ModalController, ModalState, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    /// Trigger element id, or the close selector for close bindings
    key: String,
    modal_id: String,
}

/// What one click did
#[derive(Debug, Default)]
pub struct ClickOutcome {
    /// Transitions rendered and committed
    pub transitions: Vec<Transition>,
    /// Modals the click targeted that could not be rendered; their state is unchanged
    pub skipped: Vec<ModalError>,
}

impl ClickOutcome {
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.skipped.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ModalPage {
    policy: OutsideClickPolicy,
    controllers: Vec<ModalController>,
    direct_open: Vec<Binding>,
    delegated_open: Vec<Binding>,
    close_triggers: Vec<Binding>,
    outside_click: Vec<String>,
}

impl ModalPage {
    pub fn new(policy: OutsideClickPolicy) -> Self {
        Self {
            policy,
            controllers: Vec::new(),
            direct_open: Vec::new(),
            delegated_open: Vec::new(),
            close_triggers: Vec::new(),
            outside_click: Vec::new(),
        }
    }

    /// Register every configured modal. Bindings still have to be made
    /// separately since they depend on what the document contains.
    pub fn from_config(config: &PageConfig) -> ModalResult<Self> {
        config.validate()?;
        let mut page = Self::new(config.outside_click);
        for modal in &config.modals {
            page.register(modal)?;
        }
        Ok(page)
    }

    pub fn policy(&self) -> OutsideClickPolicy {
        self.policy
    }

    pub fn register(&mut self, modal: &ModalConfig) -> ModalResult<()> {
        modal.validate()?;
        if self.controller(&modal.modal_id).is_some() {
            return Err(ModalError::DuplicateModal(modal.modal_id.clone()));
        }
        self.controllers.push(ModalController::new(modal.modal_id.as_str()));
        Ok(())
    }

    /// Bind a trigger that lives on the page at bind time.
    ///
    /// An absent trigger is reported as `ElementNotFound` and nothing is bound.
    pub fn bind_open_trigger(
        &mut self,
        trigger_id: &str,
        modal_id: &str,
        trigger_present: bool,
    ) -> ModalResult<()> {
        self.check_binding(trigger_id, modal_id)?;
        if !trigger_present {
            return Err(ModalError::element_not_found(trigger_id));
        }
        push_unique(&mut self.direct_open, trigger_id, modal_id);
        Ok(())
    }

    /// Bind a trigger matched by id on every document click, whether or not it exists yet
    pub fn bind_delegated_open(&mut self, trigger_id: &str, modal_id: &str) -> ModalResult<()> {
        self.check_binding(trigger_id, modal_id)?;
        push_unique(&mut self.delegated_open, trigger_id, modal_id);
        Ok(())
    }

    pub fn bind_close_trigger(
        &mut self,
        close_selector: &str,
        modal_id: &str,
        close_present: bool,
    ) -> ModalResult<()> {
        self.check_binding(close_selector, modal_id)?;
        if !close_present {
            return Err(ModalError::element_not_found(close_selector));
        }
        push_unique(&mut self.close_triggers, close_selector, modal_id);
        Ok(())
    }

    pub fn bind_outside_click_dismiss(&mut self, modal_id: &str) -> ModalResult<()> {
        if self.controller(modal_id).is_none() {
            return Err(ModalError::UnknownModal(modal_id.to_string()));
        }
        match self.policy {
            OutsideClickPolicy::Additive => {
                if !self.outside_click.iter().any(|id| id == modal_id) {
                    self.outside_click.push(modal_id.to_string());
                }
            }
            OutsideClickPolicy::LastWins => {
                self.outside_click.clear();
                self.outside_click.push(modal_id.to_string());
            }
        }
        Ok(())
    }

    /// Bind the open trigger the way the config asks for
    pub fn bind_configured_trigger(
        &mut self,
        modal: &ModalConfig,
        trigger_present: bool,
    ) -> ModalResult<()> {
        match &modal.open_trigger {
            TriggerBinding::Direct { element_id } => {
                self.bind_open_trigger(element_id, &modal.modal_id, trigger_present)
            }
            TriggerBinding::Delegated { element_id } => {
                self.bind_delegated_open(element_id, &modal.modal_id)
            }
        }
    }

    /// A directly bound open trigger was clicked
    pub fn direct_open_clicked<S>(&mut self, trigger_id: &str, surface: &mut S) -> ClickOutcome
    where
        S: DisplaySurface + ?Sized,
    {
        let targets = matching(&self.direct_open, trigger_id);
        self.apply(&targets, ModalState::Visible, surface)
    }

    /// A bound close icon was clicked
    pub fn close_clicked<S>(&mut self, close_selector: &str, surface: &mut S) -> ClickOutcome
    where
        S: DisplaySurface + ?Sized,
    {
        let targets = matching(&self.close_triggers, close_selector);
        self.apply(&targets, ModalState::Hidden, surface)
    }

    /// A click reached the document; opens any modal whose delegated trigger is the target
    pub fn document_clicked<S>(&mut self, target_id: Option<&str>, surface: &mut S) -> ClickOutcome
    where
        S: DisplaySurface + ?Sized,
    {
        let Some(target_id) = target_id.filter(|id| !id.is_empty()) else {
            return ClickOutcome::default();
        };
        let targets = matching(&self.delegated_open, target_id);
        self.apply(&targets, ModalState::Visible, surface)
    }

    /// A click reached the window; hides a modal only when its backdrop is the target.
    ///
    /// Clicks on content nested inside the modal have a different target and never match.
    pub fn window_clicked<S>(&mut self, target_id: Option<&str>, surface: &mut S) -> ClickOutcome
    where
        S: DisplaySurface + ?Sized,
    {
        let Some(target_id) = target_id.filter(|id| !id.is_empty()) else {
            return ClickOutcome::default();
        };
        let targets: Vec<String> = self
            .outside_click
            .iter()
            .filter(|modal_id| modal_id.as_str() == target_id)
            .cloned()
            .collect();
        self.apply(&targets, ModalState::Hidden, surface)
    }

    /// Adopt a state already shown on the page, e.g. a modal rendered open by the server
    pub fn restore(&mut self, modal_id: &str, state: ModalState) -> ModalResult<()> {
        let controller = self
            .controllers
            .iter_mut()
            .find(|c| c.modal_id() == modal_id)
            .ok_or_else(|| ModalError::UnknownModal(modal_id.to_string()))?;
        match state {
            ModalState::Visible => controller.open(),
            ModalState::Hidden => controller.close(),
        };
        Ok(())
    }

    pub fn state_of(&self, modal_id: &str) -> Option<ModalState> {
        self.controller(modal_id).map(ModalController::state)
    }

    pub fn visible_modals(&self) -> Vec<&str> {
        self.controllers
            .iter()
            .filter(|c| c.is_visible())
            .map(ModalController::modal_id)
            .collect()
    }

    /// Modals whose backdrop clicks are currently routed to a dismiss handler
    pub fn outside_click_modals(&self) -> &[String] {
        &self.outside_click
    }

    fn controller(&self, modal_id: &str) -> Option<&ModalController> {
        self.controllers.iter().find(|c| c.modal_id() == modal_id)
    }

    fn check_binding(&self, key: &str, modal_id: &str) -> ModalResult<()> {
        if key.trim().is_empty() {
            return Err(ModalError::EmptyIdentifier);
        }
        if self.controller(modal_id).is_none() {
            return Err(ModalError::UnknownModal(modal_id.to_string()));
        }
        Ok(())
    }

    fn apply<S>(&mut self, modal_ids: &[String], to: ModalState, surface: &mut S) -> ClickOutcome
    where
        S: DisplaySurface + ?Sized,
    {
        let mut outcome = ClickOutcome::default();
        for modal_id in modal_ids {
            let Some(controller) = self.controllers.iter_mut().find(|c| c.modal_id() == modal_id) else {
                continue;
            };
            if let Err(e) = surface.set_display(modal_id, to) {
                outcome.skipped.push(e);
                continue;
            }
            let transition = match to {
                ModalState::Visible => controller.open(),
                ModalState::Hidden => controller.close(),
            };
            outcome.transitions.push(transition);
        }
        outcome
    }
}

fn push_unique(bindings: &mut Vec<Binding>, key: &str, modal_id: &str) {
    let binding = Binding {
        key: key.to_string(),
        modal_id: modal_id.to_string(),
    };
    if !bindings.contains(&binding) {
        bindings.push(binding);
    }
}

fn matching(bindings: &[Binding], key: &str) -> Vec<String> {
    bindings
        .iter()
        .filter(|b| b.key == key)
        .map(|b| b.modal_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COMMENT_MODAL, POSTING_MODAL, REGISTRATION_MODAL};
    use std::collections::{HashMap, HashSet};

    /// In-memory stand-in for a rendered document
    struct FakeDocument {
        elements: HashSet<String>,
        display: HashMap<String, String>,
    }

    impl FakeDocument {
        fn with(ids: &[&str]) -> Self {
            Self {
                elements: ids.iter().map(|id| id.to_string()).collect(),
                display: HashMap::new(),
            }
        }

        fn has(&self, id: &str) -> bool {
            self.elements.contains(id)
        }

        fn display(&self, id: &str) -> &str {
            self.display.get(id).map(String::as_str).unwrap_or("")
        }
    }

    impl DisplaySurface for FakeDocument {
        fn set_display(&mut self, modal_id: &str, state: ModalState) -> ModalResult<()> {
            if !self.has(modal_id) {
                return Err(ModalError::element_not_found(modal_id));
            }
            self.display.insert(modal_id.to_string(), state.display_value().to_string());
            Ok(())
        }
    }

    fn forum_document() -> FakeDocument {
        FakeDocument::with(&[
            REGISTRATION_MODAL,
            "registerButton",
            "#registrationModal .close",
            POSTING_MODAL,
            "#postingModal .close",
            COMMENT_MODAL,
            "#commentModal .close",
        ])
    }

    /// Bind every configured modal against the fake document, skipping absent elements
    fn bind_all(config: &PageConfig, doc: &FakeDocument) -> ModalPage {
        let mut page = ModalPage::from_config(config).unwrap();
        for modal in &config.modals {
            let present = doc.has(modal.open_trigger.element_id());
            let _ = page.bind_configured_trigger(modal, present);
            let selector = modal.close_selector();
            let _ = page.bind_close_trigger(&selector, &modal.modal_id, doc.has(&selector));
            page.bind_outside_click_dismiss(&modal.modal_id).unwrap();
        }
        page
    }

    #[test]
    fn test_all_modals_start_hidden() {
        let page = bind_all(&PageConfig::default(), &forum_document());
        for id in [REGISTRATION_MODAL, POSTING_MODAL, COMMENT_MODAL] {
            assert_eq!(page.state_of(id), Some(ModalState::Hidden));
        }
        assert!(page.visible_modals().is_empty());
        assert_eq!(page.state_of("missingModal"), None);
    }

    #[test]
    fn test_register_and_backdrop_scenario() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);

        let opened = page.direct_open_clicked("registerButton", &mut doc);
        assert_eq!(opened.transitions.len(), 1);
        assert_eq!(doc.display(REGISTRATION_MODAL), "block");
        assert_eq!(page.visible_modals(), vec![REGISTRATION_MODAL]);

        let closed = page.window_clicked(Some(REGISTRATION_MODAL), &mut doc);
        assert_eq!(closed.transitions.len(), 1);
        assert_eq!(doc.display(REGISTRATION_MODAL), "none");
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Hidden));
    }

    #[test]
    fn test_open_trigger_only_affects_its_modal() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);

        let outcome = page.document_clicked(Some("commentButton"), &mut doc);
        assert_eq!(outcome.transitions.len(), 1);
        assert_eq!(outcome.transitions[0].modal_id, COMMENT_MODAL);

        assert_eq!(page.state_of(COMMENT_MODAL), Some(ModalState::Visible));
        assert_eq!(page.state_of(POSTING_MODAL), Some(ModalState::Hidden));
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Hidden));
        assert_eq!(doc.display(POSTING_MODAL), "");
    }

    #[test]
    fn test_close_icon_hides_modal() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);

        page.document_clicked(Some("postButton"), &mut doc);
        page.close_clicked("#postingModal .close", &mut doc);

        assert_eq!(page.state_of(POSTING_MODAL), Some(ModalState::Hidden));
        assert_eq!(doc.display(POSTING_MODAL), "none");
    }

    #[test]
    fn test_nested_content_click_keeps_modal_open() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);
        page.direct_open_clicked("registerButton", &mut doc);

        assert!(page.window_clicked(Some("registrationForm"), &mut doc).is_empty());
        assert!(page.window_clicked(None, &mut doc).is_empty());
        assert!(page.window_clicked(Some(""), &mut doc).is_empty());
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Visible));
        assert_eq!(doc.display(REGISTRATION_MODAL), "block");
    }

    #[test]
    fn test_delegated_trigger_missing_at_bind_time_still_opens() {
        // postButton is not part of the document when binding happens
        let mut doc = forum_document();
        assert!(!doc.has("postButton"));
        let mut page = bind_all(&PageConfig::default(), &doc);

        let outcome = page.document_clicked(Some("postButton"), &mut doc);
        assert_eq!(outcome.transitions.len(), 1);
        assert!(outcome.transitions[0].is_change());
        assert_eq!(page.state_of(POSTING_MODAL), Some(ModalState::Visible));
    }

    #[test]
    fn test_missing_direct_trigger_is_skipped() {
        let mut doc = FakeDocument::with(&[REGISTRATION_MODAL]);
        let mut page = ModalPage::from_config(&PageConfig::default()).unwrap();

        let err = page
            .bind_open_trigger("registerButton", REGISTRATION_MODAL, doc.has("registerButton"))
            .unwrap_err();
        assert!(err.is_missing_element());

        assert!(page.direct_open_clicked("registerButton", &mut doc).is_empty());
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Hidden));
    }

    #[test]
    fn test_missing_close_icon_is_skipped() {
        let mut doc = forum_document();
        let mut page = ModalPage::from_config(&PageConfig::default()).unwrap();
        let err = page
            .bind_close_trigger("#commentModal .close", COMMENT_MODAL, false)
            .unwrap_err();
        assert!(err.is_missing_element());
        assert!(page.close_clicked("#commentModal .close", &mut doc).is_empty());
    }

    #[test]
    fn test_absent_modal_stays_hidden() {
        let mut doc = FakeDocument::with(&["registerButton"]);
        let mut page = bind_all(&PageConfig::default(), &doc);

        let outcome = page.direct_open_clicked("registerButton", &mut doc);
        assert!(outcome.transitions.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert!(outcome.skipped[0].is_missing_element());

        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Hidden));
        assert!(page.visible_modals().is_empty());
        assert_eq!(doc.display(REGISTRATION_MODAL), "");
    }

    #[test]
    fn test_absent_delegated_modal_stays_hidden() {
        let mut doc = FakeDocument::with(&[REGISTRATION_MODAL]);
        let mut page = bind_all(&PageConfig::default(), &doc);

        let outcome = page.document_clicked(Some("commentButton"), &mut doc);
        assert!(outcome.transitions.is_empty());
        assert_eq!(page.state_of(COMMENT_MODAL), Some(ModalState::Hidden));
    }

    #[test]
    fn test_last_wins_drops_earlier_outside_click_handlers() {
        let config = PageConfig {
            outside_click: OutsideClickPolicy::LastWins,
            ..PageConfig::default()
        };
        let mut doc = forum_document();
        let mut page = ModalPage::from_config(&config).unwrap();
        assert_eq!(page.policy(), OutsideClickPolicy::LastWins);
        page.bind_open_trigger("registerButton", REGISTRATION_MODAL, true).unwrap();
        page.bind_outside_click_dismiss(REGISTRATION_MODAL).unwrap();
        page.bind_outside_click_dismiss(POSTING_MODAL).unwrap();
        assert_eq!(page.outside_click_modals(), &[POSTING_MODAL.to_string()]);

        page.direct_open_clicked("registerButton", &mut doc);
        assert!(page.window_clicked(Some(REGISTRATION_MODAL), &mut doc).is_empty());
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Visible));
        assert_eq!(doc.display(REGISTRATION_MODAL), "block");
    }

    #[test]
    fn test_additive_keeps_every_outside_click_handler() {
        let mut doc = forum_document();
        let mut page = ModalPage::from_config(&PageConfig::default()).unwrap();
        page.bind_open_trigger("registerButton", REGISTRATION_MODAL, true).unwrap();
        page.bind_delegated_open("postButton", POSTING_MODAL).unwrap();
        page.bind_outside_click_dismiss(REGISTRATION_MODAL).unwrap();
        page.bind_outside_click_dismiss(POSTING_MODAL).unwrap();
        page.bind_outside_click_dismiss(POSTING_MODAL).unwrap();
        assert_eq!(page.outside_click_modals().len(), 2);

        page.direct_open_clicked("registerButton", &mut doc);
        page.document_clicked(Some("postButton"), &mut doc);

        let closed = page.window_clicked(Some(REGISTRATION_MODAL), &mut doc);
        assert_eq!(closed.transitions.len(), 1);
        assert_eq!(page.state_of(REGISTRATION_MODAL), Some(ModalState::Hidden));
        assert_eq!(page.state_of(POSTING_MODAL), Some(ModalState::Visible));

        page.window_clicked(Some(POSTING_MODAL), &mut doc);
        assert!(page.visible_modals().is_empty());
    }

    #[test]
    fn test_backdrop_click_on_hidden_modal_is_an_unchanged_transition() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);
        let outcome = page.window_clicked(Some(COMMENT_MODAL), &mut doc);
        assert_eq!(outcome.transitions.len(), 1);
        assert!(!outcome.transitions[0].is_change());
        assert_eq!(doc.display(COMMENT_MODAL), "none");
    }

    #[test]
    fn test_restore_adopts_rendered_state() {
        let mut doc = forum_document();
        let mut page = bind_all(&PageConfig::default(), &doc);

        page.restore(POSTING_MODAL, ModalState::Visible).unwrap();
        assert_eq!(page.visible_modals(), vec![POSTING_MODAL]);
        assert!(matches!(
            page.restore("loginModal", ModalState::Visible),
            Err(ModalError::UnknownModal(_))
        ));

        page.close_clicked("#postingModal .close", &mut doc);
        assert_eq!(page.state_of(POSTING_MODAL), Some(ModalState::Hidden));
    }

    #[test]
    fn test_binding_errors() {
        let mut page = ModalPage::from_config(&PageConfig::default()).unwrap();

        assert!(matches!(
            page.bind_delegated_open("loginButton", "loginModal"),
            Err(ModalError::UnknownModal(_))
        ));
        assert!(matches!(
            page.bind_outside_click_dismiss("loginModal"),
            Err(ModalError::UnknownModal(_))
        ));
        assert!(matches!(
            page.bind_delegated_open(" ", POSTING_MODAL),
            Err(ModalError::EmptyIdentifier)
        ));
        assert!(matches!(
            page.register(&ModalConfig::direct(POSTING_MODAL, "postButton")),
            Err(ModalError::DuplicateModal(_))
        ));
    }

    #[test]
    fn test_rebinding_is_idempotent() {
        let mut doc = forum_document();
        let mut page = ModalPage::from_config(&PageConfig::default()).unwrap();
        page.bind_delegated_open("postButton", POSTING_MODAL).unwrap();
        page.bind_delegated_open("postButton", POSTING_MODAL).unwrap();

        let outcome = page.document_clicked(Some("postButton"), &mut doc);
        assert_eq!(outcome.transitions.len(), 1);
    }
}
