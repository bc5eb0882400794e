//! List alarms tool.

use async_trait::async_trait;

use chime_protocols::error::ToolError;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use chime_protocols::types::RiskLevel;
use chime_scheduler::Scheduler;

use crate::format::{format_local, format_remaining};

/// List alarms tool implementation.
pub struct ListAlarmsTool {
    definition: ToolDefinition,
    scheduler: Scheduler,
}

impl ListAlarmsTool {
    pub fn new(scheduler: Scheduler) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {}
        });

        Self {
            definition: ToolDefinition::new(
                "list_alarms",
                "List Alarms",
                "List all pending alarms with their remaining time",
            )
            .with_parameters_schema(schema)
            .with_risk_level(RiskLevel::Low),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for ListAlarmsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let alarms = self.scheduler.list();
        if alarms.is_empty() {
            return Ok(ToolResult::success_json(
                "No alarms set",
                serde_json::Value::Array(Vec::new()),
            ));
        }

        let mut content = format!("Pending alarms ({}):", alarms.len());
        for (i, alarm) in alarms.iter().enumerate() {
            content.push_str(&format!(
                "\n{}. {} at {} - {} (remaining {})",
                i + 1,
                alarm.id,
                format_local(alarm.deadline),
                alarm.payload,
                format_remaining(alarm.remaining),
            ));
        }

        Ok(ToolResult::success_json(content, serde_json::to_value(&alarms)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{ctx, scheduler};
    use chime_scheduler::{Clock, ManualClock};
    use chrono::TimeDelta;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_empty() {
        let tool = ListAlarmsTool::new(scheduler());
        let result = tool.execute(serde_json::json!({}), ctx()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.content, "No alarms set");
        assert_eq!(result.structured_output.unwrap(), serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_alarms() {
        let clock = Arc::new(ManualClock::default());
        let scheduler = Scheduler::with_clock(clock.clone());
        let now = clock.now();
        scheduler
            .create("first", now + TimeDelta::seconds(3725), "one")
            .unwrap();
        scheduler
            .create("second", now + TimeDelta::minutes(10), "two")
            .unwrap();

        let tool = ListAlarmsTool::new(scheduler.clone());
        let result = tool.execute(serde_json::json!({}), ctx()).await.unwrap();

        assert!(result.content.starts_with("Pending alarms (2):"));
        assert!(result.content.contains("1. first"));
        assert!(result.content.contains("2. second"));
        assert!(result.content.contains("remaining 1h 2m 5s"));
        assert!(result.content.contains("remaining 10m)"));

        clock.advance(TimeDelta::minutes(9));
        let result = tool.execute(serde_json::json!({}), ctx()).await.unwrap();
        assert!(result.content.contains("remaining 53m 5s"));
        assert!(result.content.contains("remaining 1m)"));

        let output = result.structured_output.unwrap();
        assert_eq!(output.as_array().unwrap().len(), 2);
        assert_eq!(output[0]["id"], "first");
        scheduler.shutdown();
    }
}
