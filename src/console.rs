//! Line-delimited JSON console session.
//!
//! Each input line is a request `{"tool": "...", "params": {...}}` and gets
//! exactly one reply line. Fired alarms are interleaved as
//! `{"method": "notifications/alarm_triggered", "params": {...}}` lines.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use chime_core::ToolRegistry;
use chime_protocols::error::ToolError;
use chime_protocols::tool::ToolContext;
use chime_scheduler::FiredEvent;

const SESSION_ID: &str = "console";

#[derive(Debug, Deserialize)]
struct ConsoleRequest {
    /// Echoed back in the reply when present.
    #[serde(default)]
    id: Option<Value>,
    tool: String,
    #[serde(default = "empty_params")]
    params: Value,
}

fn empty_params() -> Value {
    json!({})
}

fn error_kind(err: &ToolError) -> &'static str {
    match err {
        ToolError::NotFound(_) => "tool_not_found",
        ToolError::ExecutionFailed(_) => "execution_failed",
        ToolError::InvalidParameters(_) => "invalid_parameters",
        ToolError::ValidationFailed(_) => "validation_failed",
        ToolError::ResourceNotFound(_) => "resource_not_found",
        ToolError::Serialization(_) => "serialization",
    }
}

/// Execute one request line and build its reply.
pub(crate) async fn handle_line(registry: &ToolRegistry, line: &str) -> Value {
    let request: ConsoleRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            return json!({
                "error": { "kind": "invalid_request", "message": e.to_string() }
            });
        }
    };

    debug!(tool = %request.tool, "Console request");
    let ctx = ToolContext::new(SESSION_ID);
    let mut reply = match registry.execute(&request.tool, request.params, ctx).await {
        Ok(result) => json!({ "result": result }),
        Err(e) => json!({
            "error": { "kind": error_kind(&e), "message": e.to_string() }
        }),
    };

    if let Some(id) = request.id {
        reply["id"] = id;
    }
    reply
}

async fn next_event(events: &mut Option<UnboundedReceiver<FiredEvent>>) -> Option<FiredEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, value: &Value) -> anyhow::Result<()> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

/// Serve requests from `input` until EOF or `shutdown` resolves.
pub(crate) async fn run_session<R, W, S>(
    registry: Arc<ToolRegistry>,
    input: R,
    mut output: W,
    mut events: Option<UnboundedReceiver<FiredEvent>>,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);
    info!("Console session started");

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            Some(event) = next_event(&mut events) => {
                write_line(&mut output, &event.to_envelope()).await?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Console input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = handle_line(&registry, &line).await;
                write_line(&mut output, &reply).await?;
            }
        }
    }

    info!("Console session ended");
    Ok(())
}
