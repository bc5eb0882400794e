use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::NotificationSink;
use crate::entry::FiredEvent;
use crate::error::SinkError;

/// POSTs each fired event as a JSON notification envelope.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    fn id(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, event: &FiredEvent) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&event.to_envelope())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SinkError::Rejected(status.as_u16()));
        }

        debug!(alarm_id = %event.id, url = %self.url, "Webhook notification delivered");
        Ok(())
    }
}
