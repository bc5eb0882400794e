//! Sink and extension registration for the chime host.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use chime_config::{AlarmConfig, SinkConfig, SinkKind};
use chime_core::Kernel;
use chime_scheduler::{
    ChannelSink, FanoutSink, FiredEvent, LogSink, NotificationSink, Scheduler, WebhookSink,
};
use chime_tools_alarm::AlarmToolsExtension;

/// The sink to attach plus, for console output, the stream of fired events.
pub(crate) struct SinkSetup {
    pub sink: Arc<dyn NotificationSink>,
    pub events: Option<UnboundedReceiver<FiredEvent>>,
}

/// Build the notification sink described by `[sink]`. Every kind also logs.
pub(crate) fn build_sink(config: &SinkConfig) -> anyhow::Result<SinkSetup> {
    let log: Arc<dyn NotificationSink> = Arc::new(LogSink::new());

    let setup = match config.kind {
        SinkKind::Log => SinkSetup {
            sink: log,
            events: None,
        },
        SinkKind::Console => {
            let (console, events) = ChannelSink::new("console");
            SinkSetup {
                sink: Arc::new(FanoutSink::new(vec![log, Arc::new(console)])),
                events: Some(events),
            }
        }
        SinkKind::Webhook => {
            let url = config
                .webhook_url
                .as_deref()
                .context("sink.webhook_url is required when sink.kind is webhook")?;
            let webhook = WebhookSink::new(url, Duration::from_secs(config.timeout_seconds))?;
            SinkSetup {
                sink: Arc::new(FanoutSink::new(vec![log, Arc::new(webhook)])),
                events: None,
            }
        }
    };

    info!(kind = ?config.kind, "Notification sink configured");
    Ok(setup)
}

/// Load the alarm tools extension into the kernel.
pub(crate) async fn load_alarm_extension(
    kernel: &Kernel,
    scheduler: Scheduler,
    alarm: &AlarmConfig,
) -> anyhow::Result<()> {
    let config = serde_json::to_value(alarm)?;
    kernel
        .load_extension(Box::new(AlarmToolsExtension::new(scheduler)), config)
        .await
        .context("Failed to load tools-alarm")?;
    Ok(())
}
