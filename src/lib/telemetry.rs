//! Telemetry initialization and tool invocation span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
///
/// Logs always go to stderr so the stdio transport keeps stdout for MCP frames.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span recording the start and finish of a single tool call.
pub struct InvocationSpan {
    span: Span,
    started_at: Instant,
    invocation_id: Uuid,
    tool: String,
}

impl InvocationSpan {
    /// Start an invocation span.
    pub fn start(tool: &str, transport: &'static str) -> Self {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            target: "hello_mcp::tools",
            "tool_invocation",
            %invocation_id,
            tool,
            transport
        );
        Self {
            span,
            started_at: Instant::now(),
            invocation_id,
            tool: tool.to_string(),
        }
    }

    /// Close the span as a success.
    pub fn succeed(self, result_len: usize) {
        let elapsed_us = self.started_at.elapsed().as_micros();
        let _entered = self.span.enter();
        info!(
            target: "hello_mcp::tools",
            invocation_id = %self.invocation_id,
            tool = %self.tool,
            status = "ok",
            result_len,
            elapsed_us,
            "Completed tool invocation"
        );
    }

    /// Close the span as a rejected call.
    pub fn reject(self, code: &'static str, reason: &str) {
        let elapsed_us = self.started_at.elapsed().as_micros();
        let _entered = self.span.enter();
        warn!(
            target: "hello_mcp::tools",
            invocation_id = %self.invocation_id,
            tool = %self.tool,
            status = "rejected",
            code,
            reason,
            elapsed_us,
            "Rejected tool invocation"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub server_name: &'a str,
    pub profile: &'a str,
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_origin: &'a str,
    pub tools: &'a [String],
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "hello_mcp::runtime",
        server_name = telemetry.server_name,
        profile = telemetry.profile,
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_origin = telemetry.config_origin,
        tools = ?telemetry.tools,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
