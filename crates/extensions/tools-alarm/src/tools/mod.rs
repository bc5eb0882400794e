//! Alarm management tools.

mod alarm_status;
mod delete_alarm;
mod get_alarm;
mod list_alarms;
mod set_alarm;
mod snooze_alarm;

pub use alarm_status::AlarmStatusTool;
pub use delete_alarm::DeleteAlarmTool;
pub use get_alarm::GetAlarmTool;
pub use list_alarms::ListAlarmsTool;
pub use set_alarm::SetAlarmTool;
pub use snooze_alarm::SnoozeAlarmTool;

use chime_protocols::error::ToolError;
use chime_scheduler::SchedulerError;

/// Map a scheduler failure onto the tool error a caller should see.
pub(crate) fn tool_error(err: SchedulerError) -> ToolError {
    match err {
        SchedulerError::InvalidDeadline { .. } => ToolError::InvalidParameters(err.to_string()),
        SchedulerError::NotFound(id) => ToolError::ResourceNotFound(format!("alarm '{}'", id)),
        SchedulerError::SinkDeliveryFailed { .. } => ToolError::ExecutionFailed(err.to_string()),
    }
}
