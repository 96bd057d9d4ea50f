use std::{future::Future, sync::Arc};

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer,
};
use serde_json::Value;

use crate::{
    lib::{errors::InvocationError, telemetry::InvocationSpan},
    tools::{ServerIdentity, ToolRegistry},
};

/// Run one registry invocation inside an `InvocationSpan`.
pub fn invoke_traced(
    registry: &ToolRegistry,
    name: &str,
    payload: &Value,
    transport: &'static str,
) -> Result<String, InvocationError> {
    let span = InvocationSpan::start(name, transport);
    match registry.invoke(name, payload) {
        Ok(result) => {
            span.succeed(result.len());
            Ok(result)
        }
        Err(err) => {
            span.reject(err.code(), &err.to_string());
            Err(err)
        }
    }
}

/// MCP handler backed by the shared tool registry.
#[derive(Clone)]
pub struct DemoServer {
    identity: Arc<ServerIdentity>,
    instructions: Arc<String>,
    registry: Arc<ToolRegistry>,
}

impl DemoServer {
    pub fn new(identity: ServerIdentity, instructions: String, registry: Arc<ToolRegistry>) -> Self {
        Self {
            identity: Arc::new(identity),
            instructions: Arc::new(instructions),
            registry,
        }
    }

    fn mcp_tools(&self) -> Vec<Tool> {
        self.registry
            .iter()
            .map(|tool| {
                Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    Arc::new(tool.schema().to_json_schema()),
                )
            })
            .collect()
    }

    fn call(&self, request: CallToolRequestParam) -> Result<CallToolResult, ErrorData> {
        let payload = Value::Object(request.arguments.unwrap_or_default());

        invoke_traced(&self.registry, &request.name, &payload, "stdio")
            .map(|text| CallToolResult::success(vec![Content::text(text)]))
            .map_err(|err| err.to_error_data())
    }
}

impl ServerHandler for DemoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.to_string(),
                ..Implementation::default()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.mcp_tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        std::future::ready(self.call(request))
    }
}
