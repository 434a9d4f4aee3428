//! Observability for the check coordinator
//!
//! Structured JSON logging only:
//!
//! 1. One log line = one event
//! 2. Deterministic field ordering
//! 3. Synchronous, no buffering, no background threads
//! 4. Observability never changes execution outcomes
//!
//! Readers of the stream correlate on `config_id`, which every lock and
//! catalog event carries.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
