pub mod dom;
pub mod logging;
pub mod page_config;
