use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "hello_mcp::config",
            path = %path.display(),
            "Loading configuration using HELLO_MCP_CONFIG environment variable"
        );
    } else {
        debug!(
            target: "hello_mcp::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "HELLO_MCP_CONFIG not set; using hello-mcp.toml when present"
        );
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "hello_mcp::config",
        origin = %config.origin,
        server_name = config.server_name(),
        host = %config.server.host,
        port = config.server.port,
        base_path = %config.server.base_path,
        profile = config.tools.profile.as_str(),
        "Configuration loaded"
    );
}
