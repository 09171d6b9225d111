use shared::{DisplaySurface, ModalError, ModalResult, ModalState};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement};

/// Renders modal state into the live document through inline `display` styles
#[derive(Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Current inline `display` of a modal, read back as a state
    pub fn read_state(&self, modal_id: &str) -> ModalResult<ModalState> {
        let element = html_element_by_id(&self.document, modal_id)?;
        let display = element.style().get_property_value("display").map_err(js_error)?;
        Ok(ModalState::from_display(&display))
    }
}

impl DisplaySurface for DomSurface {
    fn set_display(&mut self, modal_id: &str, state: ModalState) -> ModalResult<()> {
        let element = html_element_by_id(&self.document, modal_id)?;
        element
            .style()
            .set_property("display", state.display_value())
            .map_err(js_error)
    }
}

pub fn html_element_by_id(document: &Document, id: &str) -> ModalResult<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| ModalError::element_not_found(id))
}

pub fn query_selector(document: &Document, selector: &str) -> ModalResult<Element> {
    document
        .query_selector(selector)
        .map_err(js_error)?
        .ok_or_else(|| ModalError::element_not_found(selector))
}

/// Id of the element a click landed on, if it has one
pub fn event_target_id(event: &Event) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .filter(|id| !id.is_empty())
}

/// Text of an inline `<script type="application/json">` block, if the page has one
pub fn json_block(document: &Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty())
}

pub fn js_error(value: JsValue) -> ModalError {
    ModalError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
