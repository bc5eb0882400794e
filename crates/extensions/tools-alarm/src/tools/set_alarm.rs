//! Set alarm tool.

use async_trait::async_trait;
use chrono::{Local, Utc};
use serde::Deserialize;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

use super::tool_error;
use crate::format::{format_local, format_remaining};
use crate::time_parse::parse_alarm_time;

/// Parameters for set_alarm tool.
#[derive(Debug, Deserialize)]
struct SetAlarmParams {
    /// Caller-chosen alarm id. An existing alarm with this id is replaced.
    alarm_id: String,
    /// `HH:MM:SS` or `YYYY-MM-DD HH:MM:SS`, local time.
    time_str: String,
    #[serde(default)]
    message: Option<String>,
}

/// Set alarm tool implementation.
pub struct SetAlarmTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
    default_message: String,
}

impl SetAlarmTool {
    pub fn new(scheduler: Scheduler, default_message: impl Into<String>) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "alarm_id": {
                    "type": "string",
                    "description": "Unique alarm ID. Setting an existing ID replaces that alarm"
                },
                "time_str": {
                    "type": "string",
                    "description": "Alarm time in local time: 'HH:MM:SS' (today, or tomorrow if already passed) or 'YYYY-MM-DD HH:MM:SS'"
                },
                "message": {
                    "type": "string",
                    "description": "Message delivered when the alarm fires"
                }
            },
            "required": ["alarm_id", "time_str"]
        });

        Self {
            definition: ToolDefinition::new(
                "set_alarm",
                "Set Alarm",
                "Schedule a one-shot alarm that sends a notification at the given time",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Low),
            scheduler,
            default_message: default_message.into(),
        }
    }
}

#[async_trait]
impl Tool for SetAlarmTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: SetAlarmParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        if params.alarm_id.trim().is_empty() {
            return Err(ToolError::InvalidParameters(
                "alarm_id cannot be empty".to_string(),
            ));
        }

        let at = parse_alarm_time(&params.time_str, &Local::now())?;
        let message = params.message.unwrap_or_else(|| self.default_message.clone());

        let snapshot = self
            .scheduler
            .create(params.alarm_id, at.with_timezone(&Utc), message)
            .map_err(tool_error)?;

        let content = format!(
            "Alarm set\nID: {}\nTrigger time: {}\nMessage: {}\nRemaining: {} ({} seconds)",
            snapshot.id,
            format_local(snapshot.deadline),
            snapshot.payload,
            format_remaining(snapshot.remaining),
            snapshot.remaining.as_secs(),
        );
        Ok(ToolResult::success_json(content, serde_json::to_value(&snapshot)?))
    }
}
