//! Delete alarm tool.

use async_trait::async_trait;
use serde::Deserialize;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

use super::tool_error;

#[derive(Debug, Deserialize)]
struct DeleteAlarmParams {
    alarm_id: String,
}

/// Delete alarm tool implementation.
pub struct DeleteAlarmTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
}

impl DeleteAlarmTool {
    pub fn new(scheduler: Scheduler) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "alarm_id": {
                    "type": "string",
                    "description": "ID of the alarm to cancel"
                }
            },
            "required": ["alarm_id"]
        });

        Self {
            definition: ToolDefinition::new(
                "delete_alarm",
                "Delete Alarm",
                "Cancel a pending alarm so it never fires",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Medium),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for DeleteAlarmTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: DeleteAlarmParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        self.scheduler
            .delete(&params.alarm_id)
            .map_err(tool_error)?;

        Ok(ToolResult::success(format!(
            "Alarm '{}' deleted",
            params.alarm_id
        )))
    }
}
