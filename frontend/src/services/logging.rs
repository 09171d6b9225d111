use shared::LogLevel;
use std::cell::Cell;

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = Cell::new(LogLevel::default());
}

pub struct Logger;

impl Logger {
    /// Set the minimum level written to the console
    pub fn init(level: LogLevel) {
        MIN_LEVEL.with(|min| min.set(level));
    }

    pub fn level() -> LogLevel {
        MIN_LEVEL.with(Cell::get)
    }

    pub fn enabled(level: LogLevel) -> bool {
        level != LogLevel::Off && level >= Self::level()
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, message, component);
    }

    fn log(level: LogLevel, message: &str, component: &str) {
        if !Self::enabled(level) {
            return;
        }

        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
            LogLevel::Off => {}
        }
    }
}
