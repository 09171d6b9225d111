//! Browser bindings for the forum's registration, posting and comment modals.

pub mod bindings;
pub mod services;

use gloo::events::EventListener;
use web_sys::{Document, Window};

use bindings::{bind_page, PageBindings};
use services::logging::Logger;
use services::page_config;

/// Load the page config and bind every modal.
///
/// Returns `None` when binding failed; the failure is logged.
pub fn start(window: &Window, document: &Document) -> Option<PageBindings> {
    let config = page_config::load(document);
    Logger::init(config.log_level);

    match bind_page(document, window, &config) {
        Ok(bindings) => {
            Logger::debug_with_component(
                "main",
                &format!(
                    "{} click listeners attached, log level {}",
                    bindings.listener_count(),
                    config.log_level
                ),
            );
            Some(bindings)
        }
        Err(e) => {
            Logger::error_with_component("main", &format!("Failed to bind modals: {}", e));
            None
        }
    }
}

/// Run `init` once the document has been parsed.
///
/// Scripts loaded while the document is still parsing wait for
/// `DOMContentLoaded`; otherwise `init` runs immediately.
pub fn when_ready<F>(document: &Document, init: F)
where
    F: FnOnce() + 'static,
{
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| init()).forget();
    } else {
        init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dom::html_element_by_id;
    use shared::{ModalState, REGISTRATION_MODAL};
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_when_ready_runs_immediately_on_parsed_document() {
        let document = gloo::utils::document();
        assert_ne!(document.ready_state(), "loading");

        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        when_ready(&document, move || flag.set(true));
        assert!(ran.get());
    }

    #[wasm_bindgen_test]
    fn test_start_binds_loaded_document() {
        let window = gloo::utils::window();
        let document = gloo::utils::document();
        document.body().unwrap().set_inner_html(
            r#"<button id="registerButton">Register</button>
               <div id="registrationModal" class="modal"><span class="close">&times;</span></div>"#,
        );

        let bindings = start(&window, &document).unwrap();
        html_element_by_id(&document, "registerButton").unwrap().click();

        assert_eq!(bindings.state_of(REGISTRATION_MODAL), Some(ModalState::Visible));
        let display = html_element_by_id(&document, REGISTRATION_MODAL)
            .unwrap()
            .style()
            .get_property_value("display")
            .unwrap();
        assert_eq!(display, "block");
    }
}
