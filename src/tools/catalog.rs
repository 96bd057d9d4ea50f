//! Server profiles and the tool set each one registers.
use chrono::{Local, Timelike};
use clap::ValueEnum;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::{
    lib::errors::RegistryError,
    tools::{
        describe::describe_server,
        echo::{echo, EchoInput},
        greeting::{
            compose_workspace_greeting, greet, GreetInput, WorkspaceGreetingInput,
            GREETING_EMOJIS,
        },
        registry::{RegisteredTool, ToolRegistry},
        schema::NoInput,
        template::{render_template, TemplateInput},
    },
};

/// Which demo server this process acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerProfile {
    /// Greeting server meant for stdio clients.
    Hello,
    /// Greeting server meant for HTTP clients.
    HelloHttp,
    /// Template processing server.
    Template,
    /// Workspace greeting tool.
    Workspace,
}

impl ServerProfile {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ServerProfile::Hello => "hello",
            ServerProfile::HelloHttp => "hello-http",
            ServerProfile::Template => "template",
            ServerProfile::Workspace => "workspace",
        }
    }

    pub const fn default_server_name(&self) -> &'static str {
        match self {
            ServerProfile::Hello => "hello-server",
            ServerProfile::HelloHttp => "hello-server-http",
            ServerProfile::Template => "hello-mcp-server",
            ServerProfile::Workspace => "workspace-analyzer",
        }
    }

    /// Tool names in registration order.
    pub const fn tool_names(&self) -> &'static [&'static str] {
        match self {
            ServerProfile::Hello => &["say_hello", "get_greeting_info", "echo_message"],
            ServerProfile::HelloHttp => &["say_hello", "get_server_info", "echo_message"],
            ServerProfile::Template => &["hello", "process_template"],
            ServerProfile::Workspace => &["workspace_greeting"],
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::from_str(value, true).ok()
    }
}

/// Facts about the running server that tools may render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: &'static str,
    pub profile: ServerProfile,
    pub transport: &'static str,
    pub host: String,
    pub port: u16,
    pub base_path: String,
}

impl ServerIdentity {
    pub fn endpoint_url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.base_path)
    }
}

/// Build the immutable registry for `identity.profile`.
pub fn build_registry(identity: &ServerIdentity) -> Result<ToolRegistry, RegistryError> {
    let mut builder = ToolRegistry::builder();
    let tool_list = identity.profile.tool_names().join(", ");

    match identity.profile {
        ServerProfile::Hello => {
            let info = describe_server(
                "Hello MCP Server Information",
                &[
                    ("Server Name", identity.name.clone()),
                    ("Version", identity.version.to_string()),
                    ("Available Tools", tool_list),
                    (
                        "Description",
                        "A simple MCP server that provides greeting functionality".to_string(),
                    ),
                ],
            );
            builder
                .register(say_hello("Welcome to the MCP server!"))?
                .register(RegisteredTool::typed(
                    "get_greeting_info",
                    "Get information about available greetings and the server.",
                    move |_: NoInput| info.clone(),
                ))?
                .register(echo_message(
                    "Server received your message and is echoing it back!",
                ))?;
        }
        ServerProfile::HelloHttp => {
            let info = describe_server(
                "HTTP MCP Server Information",
                &[
                    ("Server Name", identity.name.clone()),
                    ("Transport", identity.transport.to_uppercase()),
                    ("Host", identity.host.clone()),
                    ("Port", identity.port.to_string()),
                    ("URL", identity.endpoint_url()),
                    ("Available Tools", tool_list),
                ],
            );
            builder
                .register(say_hello("Welcome to the HTTP MCP server!"))?
                .register(RegisteredTool::typed(
                    "get_server_info",
                    "Get information about the HTTP server.",
                    move |_: NoInput| info.clone(),
                ))?
                .register(echo_message("HTTP server received your message!"))?;
        }
        ServerProfile::Template => {
            builder
                .register(RegisteredTool::typed(
                    "hello",
                    "Say hello to someone. Takes a name and returns a greeting message.",
                    |input: GreetInput| greet(&input, None),
                ))?
                .register(RegisteredTool::typed(
                    "process_template",
                    "Process template with AIT, SPK, and repository parameters and return them in a formatted response.",
                    |input: TemplateInput| render_template(&input),
                ))?;
        }
        ServerProfile::Workspace => {
            builder.register(RegisteredTool::typed(
                "workspace_greeting",
                "Send a personalized greeting, optionally by time of day and with an emoji.",
                |input: WorkspaceGreetingInput| {
                    let hour = Local::now().hour();
                    let emoji = GREETING_EMOJIS.choose(&mut rand::thread_rng()).copied();
                    compose_workspace_greeting(&input, hour, emoji)
                },
            ))?;
        }
    }

    Ok(builder.build())
}

fn say_hello(welcome: &'static str) -> RegisteredTool {
    RegisteredTool::typed(
        "say_hello",
        "Say hello to someone.",
        move |input: GreetInput| greet(&input, Some(welcome)),
    )
}

fn echo_message(trailer: &'static str) -> RegisteredTool {
    RegisteredTool::typed(
        "echo_message",
        "Echo back a message with formatting.",
        move |input: EchoInput| echo(&input, Some(trailer)),
    )
}
