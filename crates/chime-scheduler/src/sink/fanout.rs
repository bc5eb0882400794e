use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::NotificationSink;
use crate::entry::FiredEvent;
use crate::error::SinkError;

/// Delivers each event to every inner sink in order.
///
/// One failing sink does not stop delivery to the rest; the failures are
/// folded into a single error.
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotificationSink for FanoutSink {
    fn id(&self) -> &str {
        "fanout"
    }

    async fn notify(&self, event: &FiredEvent) -> Result<(), SinkError> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.notify(event).await {
                warn!(sink = sink.id(), alarm_id = %event.id, "Sink failed: {}", e);
                failures.push(format!("{}: {}", sink.id(), e));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SinkError::Custom(failures.join("; ")))
        }
    }
}
