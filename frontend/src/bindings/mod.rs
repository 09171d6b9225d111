mod page_bindings;

pub use page_bindings::{bind_page, PageBindings};
