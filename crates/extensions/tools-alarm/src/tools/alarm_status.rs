//! Alarm status tool.

use async_trait::async_trait;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

/// Reports `{total_alarms, active_alarms, alarms, server_time}`.
pub struct AlarmStatusTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
}

impl AlarmStatusTool {
    pub fn new(scheduler: Scheduler) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {}
        });

        Self {
            definition: ToolDefinition::new(
                "alarm_status",
                "Alarm Status",
                "Get the alarm system status: counts, pending alarms and server time",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Low),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for AlarmStatusTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let status = serde_json::to_value(self.scheduler.status())?;
        let content = serde_json::to_string_pretty(&status)?;
        Ok(ToolResult::success_json(content, status))
    }
}
