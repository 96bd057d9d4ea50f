//! Load and validate server configuration.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::{
    lib::errors::{ConfigError, ConfigOrigin},
    tools::ServerProfile,
};

pub mod server;
pub mod telemetry;
pub mod tools;

pub use server::{
    parse_server_section, validate_server_section, RawServerSection, ServerSection,
    DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PORT,
};
pub use tools::{parse_tools_section, RawToolsSection, ToolsSection, DEFAULT_PROFILE};

pub(crate) const CONFIG_ENV_KEY: &str = "HELLO_MCP_CONFIG";
pub(crate) const DEFAULT_CONFIG_PATH: &str = "hello-mcp.toml";

/// Top-level configuration container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub tools: ToolsSection,
    pub origin: ConfigOrigin,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            tools: ToolsSection::default(),
            origin: ConfigOrigin::Defaults,
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub profile: Option<ServerProfile>,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    tools: Option<RawToolsSection>,
}

/// Pick the config file: explicit path → `HELLO_MCP_CONFIG` → `hello-mcp.toml`
/// in the working directory when present. `None` means built-in defaults.
pub fn locate_config_file(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    match env::var(CONFIG_ENV_KEY) {
        Ok(value) if !value.trim().is_empty() => {
            let path = PathBuf::from(value);
            telemetry::log_env_source(&path, true);
            Some(path)
        }
        _ => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            telemetry::log_env_source(&path, false);
            path.is_file().then_some(path)
        }
    }
}

impl ServerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config = Self::default();
                telemetry::log_loaded(&config);
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "hello_mcp::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "hello_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "hello_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, ConfigOrigin::File(path.clone())).map_err(|err| {
            error!(
                target: "hello_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawServerConfig, origin: ConfigOrigin) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &origin)?;
        let tools = parse_tools_section(raw.tools, &origin)?;

        Ok(Self {
            server,
            tools,
            origin,
        })
    }

    /// Apply command-line overrides and re-validate the affected section.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(profile) = overrides.profile {
            self.tools.profile = profile;
        }
        validate_server_section(&self.server, &self.origin)?;
        Ok(self)
    }

    /// Configured name, or the profile's default.
    pub fn server_name(&self) -> &str {
        self.server
            .name
            .as_deref()
            .unwrap_or_else(|| self.tools.profile.default_server_name())
    }
}
