use shared::PageConfig;
use web_sys::Document;

use crate::services::dom::json_block;
use crate::services::logging::Logger;

pub const CONFIG_ELEMENT_ID: &str = "modal-config";

/// Load the page's modal configuration.
///
/// Pages without a `#modal-config` block get the forum defaults; an invalid
/// block is reported and also falls back to the defaults.
pub fn load(document: &Document) -> PageConfig {
    let Some(json) = json_block(document, CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };

    match PageConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            Logger::warn_with_component(
                "page-config",
                &format!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e),
            );
            PageConfig::default()
        }
    }
}
