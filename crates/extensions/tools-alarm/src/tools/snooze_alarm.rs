//! Snooze alarm tool.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

use super::tool_error;
use crate::format::format_local;

#[derive(Debug, Deserialize)]
struct SnoozeAlarmParams {
    alarm_id: String,
    #[serde(default)]
    minutes: Option<u64>,
}

/// Snooze alarm tool implementation.
pub struct SnoozeAlarmTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
    default_minutes: u64,
}

impl SnoozeAlarmTool {
    pub fn new(scheduler: Scheduler, default_minutes: u64) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "alarm_id": {
                    "type": "string",
                    "description": "ID of the alarm to snooze"
                },
                "minutes": {
                    "type": "integer",
                    "minimum": 1,
                    "description": format!("Minutes to snooze for (default: {})", default_minutes)
                }
            },
            "required": ["alarm_id"]
        });

        Self {
            definition: ToolDefinition::new(
                "snooze_alarm",
                "Snooze Alarm",
                "Replace a pending alarm with one that fires some minutes from now",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Low),
            scheduler,
            default_minutes,
        }
    }
}

#[async_trait]
impl Tool for SnoozeAlarmTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: SnoozeAlarmParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        let minutes = params.minutes.unwrap_or(self.default_minutes);
        if minutes == 0 {
            return Err(ToolError::InvalidParameters(
                "minutes must be at least 1".to_string(),
            ));
        }
        let extra = minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ToolError::InvalidParameters(format!("minutes too large: {}", minutes)))?;

        let snoozed = self
            .scheduler
            .snooze(&params.alarm_id, extra)
            .map_err(tool_error)?;

        let content = format!(
            "Alarm '{}' snoozed for {} minutes\nNew alarm ID: {}\nTrigger time: {}",
            params.alarm_id,
            minutes,
            snoozed.id,
            format_local(snoozed.deadline),
        );
        Ok(ToolResult::success_json(content, serde_json::to_value(&snoozed)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{ctx, scheduler};
    use chrono::{TimeDelta, Utc};

    #[tokio::test]
    async fn test_snooze_with_default_minutes() {
        let scheduler = scheduler();
        scheduler
            .create("wake", Utc::now() + TimeDelta::minutes(1), "Get up")
            .unwrap();

        let tool = SnoozeAlarmTool::new(scheduler.clone(), 5);
        let result = tool
            .execute(serde_json::json!({ "alarm_id": "wake" }), ctx())
            .await
            .unwrap();

        assert!(result.content.contains("snoozed for 5 minutes"));
        assert!(result.content.contains("New alarm ID: wake_snooze"));
        assert!(scheduler.get("wake").is_none());

        let snoozed = scheduler.get("wake_snooze").unwrap();
        assert_eq!(snoozed.payload, "Snoozed: Get up");
        assert!(snoozed.remaining > Duration::from_secs(4 * 60));
        assert!(snoozed.remaining <= Duration::from_secs(5 * 60));
        scheduler.shutdown();
    }

    #[tokio::test]
    async fn test_snooze_custom_minutes() {
        let scheduler = scheduler();
        scheduler
            .create("nap", Utc::now() + TimeDelta::minutes(1), "zz")
            .unwrap();

        let tool = SnoozeAlarmTool::new(scheduler.clone(), 5);
        let result = tool
            .execute(serde_json::json!({ "alarm_id": "nap", "minutes": 30 }), ctx())
            .await
            .unwrap();
        assert_eq!(result.structured_output.unwrap()["id"], "nap_snooze");
        assert!(scheduler.get("nap_snooze").unwrap().remaining > Duration::from_secs(29 * 60));
        scheduler.shutdown();
    }

    #[tokio::test]
    async fn test_snooze_zero_minutes_rejected() {
        let scheduler = scheduler();
        scheduler
            .create("keep", Utc::now() + TimeDelta::minutes(1), "x")
            .unwrap();

        let tool = SnoozeAlarmTool::new(scheduler.clone(), 5);
        let err = tool
            .execute(serde_json::json!({ "alarm_id": "keep", "minutes": 0 }), ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert!(scheduler.get("keep").is_some());

        let err = tool
            .execute(serde_json::json!({ "alarm_id": "keep", "minutes": -3 }), ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        scheduler.shutdown();
    }

    #[tokio::test]
    async fn test_snooze_missing_alarm() {
        let tool = SnoozeAlarmTool::new(scheduler(), 5);
        let err = tool
            .execute(serde_json::json!({ "alarm_id": "ghost" }), ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ResourceNotFound(_)));
    }
}
