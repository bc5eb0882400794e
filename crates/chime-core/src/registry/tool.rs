//! Tool registry for managing available tools.

use std::sync::Arc;

use tracing::debug;

use chime_protocols::error::{ExtensionError, ToolError};
use chime_protocols::extension::ToolRegistryAccess;
use chime_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn Tool {
    fn registry_id(&self) -> &str {
        &self.definition().id
    }
}

/// Registry for managing tools.
///
/// Built on `BaseRegistry` for consistent behavior.
pub struct ToolRegistry {
    inner: BaseRegistry<dyn Tool>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    /// Register a tool.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        self.inner.register(tool)
    }

    /// Unregister a tool.
    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(id)
    }

    /// Get a tool by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.inner.get(id)
    }

    /// List all tool definitions, sorted by ID.
    pub fn list(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.inner.iter().map(|t| t.definition().clone()).collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }

    /// Validate parameters and execute a tool by ID.
    pub async fn execute(
        &self,
        tool_id: &str,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(tool_id)
            .ok_or_else(|| ToolError::NotFound(tool_id.to_string()))?;
        tool.validate(&params)?;
        debug!(
            tool = tool_id,
            session = %ctx.session_id,
            correlation_id = %ctx.correlation_id,
            "Executing tool"
        );
        tool.execute(params, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistryAccess for ToolRegistry {
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        self.register(tool)
    }

    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError> {
        self.unregister(tool_id)
    }
}
