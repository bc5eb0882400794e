//! Get alarm tool.

use async_trait::async_trait;
use serde::Deserialize;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

use crate::format::{format_local, format_remaining};

#[derive(Debug, Deserialize)]
struct GetAlarmParams {
    alarm_id: String,
}

/// Get alarm tool implementation.
pub struct GetAlarmTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
}

impl GetAlarmTool {
    pub fn new(scheduler: Scheduler) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "alarm_id": {
                    "type": "string",
                    "description": "ID of the alarm to show"
                }
            },
            "required": ["alarm_id"]
        });

        Self {
            definition: ToolDefinition::new(
                "get_alarm",
                "Get Alarm",
                "Show the details of a pending alarm",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Low),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for GetAlarmTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: GetAlarmParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        let alarm = self
            .scheduler
            .get(&params.alarm_id)
            .ok_or_else(|| ToolError::ResourceNotFound(format!("alarm '{}'", params.alarm_id)))?;

        let content = format!(
            "Alarm: {}\nTrigger time: {}\nMessage: {}\nCreated: {}\nStatus: {}\nRemaining: {}",
            alarm.id,
            format_local(alarm.deadline),
            alarm.payload,
            format_local(alarm.created_at),
            if alarm.active { "active" } else { "inactive" },
            format_remaining(alarm.remaining),
        );
        Ok(ToolResult::success_json(content, serde_json::to_value(&alarm)?))
    }
}
