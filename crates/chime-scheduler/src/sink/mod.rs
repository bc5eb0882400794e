//! Notification sinks.
//!
//! A sink receives every [`FiredEvent`] produced by the scheduler. Delivery
//! is attempted once; a failure is logged by the scheduler and never retried.

mod channel;
mod fanout;
mod log;
mod webhook;

pub use channel::ChannelSink;
pub use fanout::FanoutSink;
pub use log::LogSink;
pub use webhook::WebhookSink;

use async_trait::async_trait;

use crate::entry::FiredEvent;
use crate::error::SinkError;

/// Consumer of fired events.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Identifier used in log lines.
    fn id(&self) -> &str;

    /// Deliver one event.
    async fn notify(&self, event: &FiredEvent) -> Result<(), SinkError>;
}
