use serde::Deserialize;

use crate::lib::errors::{ConfigError, ConfigOrigin};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BASE_PATH: &str = "/mcp";

/// Server identity and socket settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSection {
    /// Overrides the profile's default server name.
    pub name: Option<String>,
    pub host: String,
    pub port: u16,
    /// Prefix for the HTTP routes.
    pub base_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_path: Option<String>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    origin: &ConfigOrigin,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();
    let section = ServerSection {
        name: server_raw.name,
        host: server_raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server_raw.port.unwrap_or(DEFAULT_PORT),
        base_path: server_raw
            .base_path
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
    };
    validate_server_section(&section, origin)?;
    Ok(section)
}

pub fn validate_server_section(
    section: &ServerSection,
    origin: &ConfigOrigin,
) -> Result<(), ConfigError> {
    if let Some(name) = &section.name {
        if name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                origin: origin.clone(),
                field: "server.name",
            });
        }
    }
    if section.host.trim().is_empty() {
        return Err(ConfigError::MissingField {
            origin: origin.clone(),
            field: "server.host",
        });
    }
    validate_port(section.port, origin)?;
    validate_base_path(&section.base_path, origin)
}

fn validate_port(port: u16, origin: &ConfigOrigin) -> Result<(), ConfigError> {
    if (1024..=65535).contains(&port) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        origin: origin.clone(),
        field: "server.port",
        message: "Use a port in the range 1024-65535".into(),
    })
}

fn validate_base_path(base_path: &str, origin: &ConfigOrigin) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidField {
        origin: origin.clone(),
        field: "server.base_path",
        message: message.into(),
    };

    if !base_path.starts_with('/') {
        return Err(invalid("The base path must start with `/`"));
    }
    if base_path.len() > 1 && base_path.ends_with('/') {
        return Err(invalid("The base path must not end with `/`"));
    }
    if base_path.chars().any(char::is_whitespace) {
        return Err(invalid("The base path must not contain whitespace"));
    }
    Ok(())
}
