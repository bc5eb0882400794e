//! Scheduler and sink errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by [`Scheduler`](crate::Scheduler) operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The requested deadline is not strictly in the future.
    #[error("Deadline {deadline} for '{id}' is not in the future (now {now})")]
    InvalidDeadline {
        id: String,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// No pending entry with this id.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// The notification sink rejected a fired event. Only ever logged.
    #[error("Sink delivery failed for '{id}': {source}")]
    SinkDeliveryFailed {
        id: String,
        #[source]
        source: SinkError,
    },
}

/// Errors raised by a [`NotificationSink`](crate::NotificationSink).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink disconnected: {0}")]
    Disconnected(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sink rejected notification with status {0}")]
    Rejected(u16),

    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_deadline_display() {
        let now = Utc::now();
        let err = SchedulerError::InvalidDeadline {
            id: "wake".to_string(),
            deadline: now,
            now,
        };
        let display = err.to_string();
        assert!(display.contains("wake"));
        assert!(display.contains("not in the future"));
    }

    #[test]
    fn test_not_found_display() {
        let err = SchedulerError::NotFound("wake".to_string());
        assert_eq!(err.to_string(), "Entry not found: wake");
    }

    #[test]
    fn test_sink_delivery_failed_has_source() {
        let err = SchedulerError::SinkDeliveryFailed {
            id: "wake".to_string(),
            source: SinkError::Rejected(503),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_sink_error_variants_display() {
        let errors = vec![
            SinkError::Disconnected("console".to_string()),
            SinkError::Rejected(500),
            SinkError::Custom("boom".to_string()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
