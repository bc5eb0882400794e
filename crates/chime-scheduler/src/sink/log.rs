use async_trait::async_trait;
use tracing::info;

use super::NotificationSink;
use crate::entry::FiredEvent;
use crate::error::SinkError;

/// Writes fired events to the tracing log.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogSink {
    fn id(&self) -> &str {
        "log"
    }

    async fn notify(&self, event: &FiredEvent) -> Result<(), SinkError> {
        info!(
            alarm_id = %event.id,
            scheduled = %event.scheduled_deadline,
            fired_at = %event.fired_at,
            "Alarm triggered: {}",
            event.payload
        );
        Ok(())
    }
}
