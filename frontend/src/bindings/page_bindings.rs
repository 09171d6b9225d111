use gloo::events::EventListener;
use shared::{
    ClickOutcome, ModalConfig, ModalError, ModalPage, ModalResult, ModalState, PageConfig, TriggerBinding,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Event, Window};

use crate::services::dom::{event_target_id, query_selector, DomSurface};
use crate::services::logging::Logger;

const COMPONENT: &str = "modal-bindings";

/// Modal state plus the surface it is rendered to, shared by every listener closure
struct Runtime {
    page: RefCell<ModalPage>,
    surface: RefCell<DomSurface>,
}

impl Runtime {
    /// Route a click. The page renders each targeted modal before committing
    /// its state, so modals missing from the document keep their state.
    fn dispatch(&self, route: impl FnOnce(&mut ModalPage, &mut DomSurface) -> ClickOutcome) {
        let outcome = route(&mut *self.page.borrow_mut(), &mut *self.surface.borrow_mut());

        for transition in outcome.transitions.iter().filter(|t| t.is_change()) {
            Logger::debug_with_component(
                COMPONENT,
                &format!("{}: {} -> {}", transition.modal_id, transition.from, transition.to),
            );
        }
        for error in &outcome.skipped {
            log_bind_error(error);
        }
    }
}

/// Listeners attached for one page.
///
/// Dropping this unregisters every listener; call [`PageBindings::forget`]
/// to keep them for the lifetime of the page.
pub struct PageBindings {
    runtime: Rc<Runtime>,
    listeners: Vec<EventListener>,
}

impl PageBindings {
    pub fn state_of(&self, modal_id: &str) -> Option<ModalState> {
        self.runtime.page.borrow().state_of(modal_id)
    }

    pub fn visible_modals(&self) -> Vec<String> {
        self.runtime
            .page
            .borrow()
            .visible_modals()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

/// Wire every configured modal into the document.
///
/// Missing trigger or close elements are skipped; everything else that
/// fails to bind is returned as an error.
pub fn bind_page(document: &Document, window: &Window, config: &PageConfig) -> ModalResult<PageBindings> {
    let mut page = ModalPage::from_config(config)?;
    let surface = DomSurface::new(document.clone());

    // A modal the server rendered open keeps its inline display
    for modal in &config.modals {
        if let Ok(ModalState::Visible) = surface.read_state(&modal.modal_id) {
            page.restore(&modal.modal_id, ModalState::Visible)?;
        }
    }

    let policy = page.policy();
    let runtime = Rc::new(Runtime {
        page: RefCell::new(page),
        surface: RefCell::new(surface),
    });

    let mut listeners = Vec::new();
    for modal in &config.modals {
        if let Some(listener) = bind_open_trigger(document, &runtime, modal)? {
            listeners.push(listener);
        }
        if let Some(listener) = bind_close_trigger(document, &runtime, modal)? {
            listeners.push(listener);
        }
        runtime.page.borrow_mut().bind_outside_click_dismiss(&modal.modal_id)?;
    }

    // Delegated open triggers: matched by target id on every document click
    let delegated = {
        let runtime = runtime.clone();
        EventListener::new(document, "click", move |event: &Event| {
            let target_id = event_target_id(event);
            runtime.dispatch(|page, surface| page.document_clicked(target_id.as_deref(), surface));
        })
    };
    listeners.push(delegated);

    // Outside-click dismissal: one window listener routes to every registered modal
    let outside = {
        let runtime = runtime.clone();
        EventListener::new(window, "click", move |event: &Event| {
            let target_id = event_target_id(event);
            runtime.dispatch(|page, surface| page.window_clicked(target_id.as_deref(), surface));
        })
    };
    listeners.push(outside);

    Logger::info_with_component(
        COMPONENT,
        &format!(
            "Bound {} modals with {:?} outside-click dismissal",
            config.modals.len(),
            policy
        ),
    );

    Ok(PageBindings { runtime, listeners })
}

fn bind_open_trigger(
    document: &Document,
    runtime: &Rc<Runtime>,
    modal: &ModalConfig,
) -> ModalResult<Option<EventListener>> {
    let element_id = match &modal.open_trigger {
        TriggerBinding::Direct { element_id } => element_id.clone(),
        TriggerBinding::Delegated { .. } => {
            runtime.page.borrow_mut().bind_configured_trigger(modal, false)?;
            return Ok(None);
        }
    };

    let element = document.get_element_by_id(&element_id);
    let bound = runtime
        .page
        .borrow_mut()
        .bind_open_trigger(&element_id, &modal.modal_id, element.is_some());
    skip_missing(bound)?;
    let Some(element) = element else {
        return Ok(None);
    };

    let runtime = runtime.clone();
    Ok(Some(EventListener::new(&element, "click", move |_| {
        runtime.dispatch(|page, surface| page.direct_open_clicked(&element_id, surface));
    })))
}

fn bind_close_trigger(
    document: &Document,
    runtime: &Rc<Runtime>,
    modal: &ModalConfig,
) -> ModalResult<Option<EventListener>> {
    let selector = modal.close_selector();
    let element = match query_selector(document, &selector) {
        Ok(element) => Some(element),
        Err(e) if e.is_missing_element() => None,
        Err(e) => return Err(e),
    };

    let bound = runtime
        .page
        .borrow_mut()
        .bind_close_trigger(&selector, &modal.modal_id, element.is_some());
    skip_missing(bound)?;
    let Some(element) = element else {
        return Ok(None);
    };

    let runtime = runtime.clone();
    Ok(Some(EventListener::new(&element, "click", move |_| {
        runtime.dispatch(|page, surface| page.close_clicked(&selector, surface));
    })))
}

/// Absent elements are an expected state on partially rendered pages
fn skip_missing(result: ModalResult<()>) -> ModalResult<()> {
    match result {
        Err(e) if e.is_missing_element() => {
            log_bind_error(&e);
            Ok(())
        }
        other => other,
    }
}

fn log_bind_error(error: &ModalError) {
    if error.is_missing_element() {
        Logger::debug_with_component(COMPONENT, &format!("Skipping: {}", error));
    } else {
        Logger::warn_with_component(COMPONENT, &error.to_string());
    }
}
