//! Telemetry and structured logging components for PokeLens.
//!
//! Handles log redaction, console/JSON output, file rotation, and identification event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, IdentificationEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
