//! Alarm tools extension definition.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use chime_protocols::error::ExtensionError;
use chime_protocols::extension::{
    Extension, ExtensionContext, ExtensionManifest, Provides, ToolRegistryAccess,
};
use chime_protocols::types::Version;
use chime_scheduler::Scheduler;

use crate::tools::{
    AlarmStatusTool, DeleteAlarmTool, GetAlarmTool, ListAlarmsTool, SetAlarmTool, SnoozeAlarmTool,
};

const DEFAULT_MESSAGE: &str = "Alarm time is up!";
const DEFAULT_SNOOZE_MINUTES: u64 = 5;

/// Alarm tools extension. All tools share the scheduler it was built with.
pub struct AlarmToolsExtension {
    manifest: ExtensionManifest,
    scheduler: Scheduler,
    /// Registry the tools were registered into; set by `initialize`.
    registry: Option<Arc<dyn ToolRegistryAccess>>,
}

impl AlarmToolsExtension {
    pub fn new(scheduler: Scheduler) -> Self {
        let mut manifest = ExtensionManifest::new("tools-alarm", "Alarm Tools", Version::new(0, 1, 0))
            .with_description("One-shot alarms: set, list, get, delete, snooze and status");
        manifest.provides = Provides {
            tools: vec![
                "set_alarm".to_string(),
                "list_alarms".to_string(),
                "get_alarm".to_string(),
                "delete_alarm".to_string(),
                "snooze_alarm".to_string(),
                "alarm_status".to_string(),
            ],
        };

        Self {
            manifest,
            scheduler,
            registry: None,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl Default for AlarmToolsExtension {
    fn default() -> Self {
        Self::new(Scheduler::new())
    }
}

#[async_trait]
impl Extension for AlarmToolsExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        let default_message: String = ctx
            .get_config("default_message")
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        let snooze_minutes: u64 = ctx
            .get_config("snooze_minutes")
            .unwrap_or(DEFAULT_SNOOZE_MINUTES);
        if snooze_minutes == 0 {
            return Err(ExtensionError::InitializationFailed(
                "snooze_minutes must be at least 1".to_string(),
            ));
        }

        let scheduler = &self.scheduler;
        ctx.tool_registry
            .register_tool(Arc::new(SetAlarmTool::new(scheduler.clone(), default_message)))?;
        ctx.tool_registry
            .register_tool(Arc::new(ListAlarmsTool::new(scheduler.clone())))?;
        ctx.tool_registry
            .register_tool(Arc::new(GetAlarmTool::new(scheduler.clone())))?;
        ctx.tool_registry
            .register_tool(Arc::new(DeleteAlarmTool::new(scheduler.clone())))?;
        ctx.tool_registry
            .register_tool(Arc::new(SnoozeAlarmTool::new(scheduler.clone(), snooze_minutes)))?;
        ctx.tool_registry
            .register_tool(Arc::new(AlarmStatusTool::new(scheduler.clone())))?;

        self.registry = Some(ctx.tool_registry.clone());
        info!(snooze_minutes, "Alarm tools registered");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ExtensionError> {
        self.scheduler.detach_sink();
        let cancelled = self.scheduler.shutdown();

        if let Some(registry) = &self.registry {
            for tool_id in &self.manifest.provides.tools {
                if let Err(e) = registry.unregister_tool(tool_id) {
                    warn!(tool = %tool_id, "Failed to unregister tool: {}", e);
                }
            }
        }
        info!(cancelled, "Alarm tools shut down");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::registry::ToolRegistry;
    use chime_protocols::tool::ToolContext;
    use chrono::{TimeDelta, Utc};
    use std::path::PathBuf;

    fn context(registry: Arc<ToolRegistry>, config: serde_json::Value) -> ExtensionContext {
        ExtensionContext::new(config, registry, PathBuf::from("/tmp"))
    }

    #[test]
    fn test_extension_manifest() {
        let ext = AlarmToolsExtension::default();
        assert_eq!(ext.manifest().id, "tools-alarm");
        assert_eq!(ext.manifest().name, "Alarm Tools");
        assert!(ext.manifest().description.contains("snooze"));
    }

    #[test]
    fn test_extension_provides_tools() {
        let ext = AlarmToolsExtension::default();
        let tools = &ext.manifest().provides.tools;
        assert_eq!(tools.len(), 6);
        for id in ["set_alarm", "list_alarms", "get_alarm", "delete_alarm", "snooze_alarm", "alarm_status"] {
            assert!(tools.contains(&id.to_string()), "missing {id}");
        }
    }

    #[test]
    fn test_as_any() {
        let ext = AlarmToolsExtension::default();
        assert!(ext.as_any().downcast_ref::<AlarmToolsExtension>().is_some());
    }

    #[tokio::test]
    async fn test_initialize_registers_tools() {
        let registry = Arc::new(ToolRegistry::new());
        let mut ext = AlarmToolsExtension::default();
        ext.initialize(context(registry.clone(), serde_json::json!({})))
            .await
            .unwrap();

        let ids: Vec<String> = registry.list().into_iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 6);
        assert!(ids.contains(&"snooze_alarm".to_string()));
    }

    #[tokio::test]
    async fn test_initialize_reads_config() {
        let registry = Arc::new(ToolRegistry::new());
        let mut ext = AlarmToolsExtension::default();
        let config = serde_json::json!({ "default_message": "Beep", "snooze_minutes": 2 });
        ext.initialize(context(registry.clone(), config)).await.unwrap();

        let at = (chrono::Local::now() + TimeDelta::hours(3))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        registry
            .execute(
                "set_alarm",
                serde_json::json!({ "alarm_id": "cfg", "time_str": at }),
                ToolContext::new("test"),
            )
            .await
            .unwrap();
        assert_eq!(ext.scheduler().get("cfg").unwrap().payload, "Beep");

        let result = registry
            .execute(
                "snooze_alarm",
                serde_json::json!({ "alarm_id": "cfg" }),
                ToolContext::new("test"),
            )
            .await
            .unwrap();
        assert!(result.content.contains("snoozed for 2 minutes"));
        ext.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_rejects_zero_snooze() {
        let registry = Arc::new(ToolRegistry::new());
        let mut ext = AlarmToolsExtension::default();
        let err = ext
            .initialize(context(registry, serde_json::json!({ "snooze_minutes": 0 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtensionError::InitializationFailed(_)));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_alarms() {
        let scheduler = Scheduler::new();
        let (sink, _rx) = chime_scheduler::ChannelSink::new("test");
        scheduler.attach_sink(Arc::new(sink));
        scheduler
            .create("late", Utc::now() + TimeDelta::hours(1), "x")
            .unwrap();

        let ext = AlarmToolsExtension::new(scheduler.clone());
        ext.shutdown().await.unwrap();

        assert!(scheduler.is_empty());
        assert!(!scheduler.has_sink());
    }

    #[tokio::test]
    async fn test_shutdown_unregisters_tools() {
        let registry = Arc::new(ToolRegistry::new());
        let mut ext = AlarmToolsExtension::default();
        ext.initialize(context(registry.clone(), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(registry.list().len(), 6);

        ext.shutdown().await.unwrap();
        assert!(registry.list().is_empty());
        let result = registry
            .execute("list_alarms", serde_json::json!({}), ToolContext::new("test"))
            .await;
        assert!(matches!(
            result,
            Err(chime_protocols::error::ToolError::NotFound(_))
        ));
    }
}
