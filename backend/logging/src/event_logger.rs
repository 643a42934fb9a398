//! Identification Event Logger
//!
//! Structured events (request received, attempt, completion, failure) emitted
//! on the `identification_events` tracing target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentificationEvent {
    RequestReceived {
        route: String,
        detail: String,
    },
    Attempt {
        provider: String,
        attempt: u32,
        parsed: usize,
    },
    Completed {
        identified: usize,
        attempts: u32,
    },
    Failed {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: IdentificationEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact free-text fields and build the entry that will be logged.
    pub fn entry(request_id: &str, mut event: IdentificationEvent) -> EventLogEntry {
        match &mut event {
            IdentificationEvent::RequestReceived { detail, .. } => {
                *detail = redact_sensitive_data(detail);
            }
            IdentificationEvent::Failed { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            IdentificationEvent::Attempt { .. } | IdentificationEvent::Completed { .. } => {}
        }

        EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn log_event(request_id: &str, event: IdentificationEvent) {
        let entry = Self::entry(request_id, event);
        let payload = serde_json::to_string(&entry).unwrap_or_default();

        if matches!(entry.event, IdentificationEvent::Failed { .. }) {
            warn!(target: "identification_events", event = %payload, "Identification event");
        } else {
            info!(target: "identification_events", event = %payload, "Identification event");
        }
    }
}
