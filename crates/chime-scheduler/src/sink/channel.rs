use async_trait::async_trait;
use tokio::sync::mpsc;

use super::NotificationSink;
use crate::entry::FiredEvent;
use crate::error::SinkError;

/// Forwards fired events into an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    id: String,
    tx: mpsc::UnboundedSender<FiredEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new(id: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<FiredEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id: id.into(), tx }, rx)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    fn id(&self) -> &str {
        &self.id
    }

    async fn notify(&self, event: &FiredEvent) -> Result<(), SinkError> {
        self.tx
            .send(event.clone())
            .map_err(|_| SinkError::Disconnected(self.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event() -> FiredEvent {
        FiredEvent {
            id: "wake".to_string(),
            payload: "Get up".to_string(),
            fired_at: Utc::now(),
            scheduled_deadline: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_event() {
        let (sink, mut rx) = ChannelSink::new("console");
        sink.notify(&event()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, "wake");
        assert_eq!(received.payload, "Get up");
    }

    #[tokio::test]
    async fn test_channel_sink_disconnected() {
        let (sink, rx) = ChannelSink::new("console");
        drop(rx);

        let err = sink.notify(&event()).await.unwrap_err();
        assert!(matches!(err, SinkError::Disconnected(id) if id == "console"));
    }
}
