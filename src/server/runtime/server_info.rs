use crate::{cli::LaunchProfile, server::config::ServerConfig, tools::ServerIdentity};

/// Resolve the identity the tools and transports report for this process.
pub fn build_identity(profile: &LaunchProfile, config: &ServerConfig) -> ServerIdentity {
    ServerIdentity {
        name: config.server_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        profile: config.tools.profile,
        transport: profile.transport.as_str(),
        host: config.server.host.clone(),
        port: config.server.port,
        base_path: config.server.base_path.clone(),
    }
}

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(identity: &ServerIdentity, config: &ServerConfig) -> String {
    format!(
        "{name} v{version} ({profile} profile) loaded from {origin}; serving tools: {tools}. Call a tool with a JSON object matching its input schema.",
        name = identity.name,
        version = identity.version,
        profile = identity.profile.as_str(),
        origin = config.origin,
        tools = identity.profile.tool_names().join(", "),
    )
}
