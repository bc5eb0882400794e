//! Tool execution context.

/// Context for tool execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Session ID for the current session.
    pub session_id: String,

    /// Correlation ID for tracing.
    pub correlation_id: String,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_context_new() {
        let ctx = ToolContext::new("session-1");
        assert_eq!(ctx.session_id, "session-1");
        assert!(!ctx.correlation_id.is_empty());
    }

    #[test]
    fn test_tool_context_correlation_id_unique() {
        let ctx1 = ToolContext::new("session-1");
        let ctx2 = ToolContext::new("session-1");
        assert_ne!(ctx1.correlation_id, ctx2.correlation_id);
    }
}
