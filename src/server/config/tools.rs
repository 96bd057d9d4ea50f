use serde::Deserialize;

use crate::{
    lib::errors::{ConfigError, ConfigOrigin},
    tools::ServerProfile,
};

pub const DEFAULT_PROFILE: ServerProfile = ServerProfile::Hello;

/// Tool set selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsSection {
    pub profile: ServerProfile,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawToolsSection {
    pub profile: Option<String>,
}

pub fn parse_tools_section(
    raw: Option<RawToolsSection>,
    origin: &ConfigOrigin,
) -> Result<ToolsSection, ConfigError> {
    let Some(name) = raw.unwrap_or_default().profile else {
        return Ok(ToolsSection::default());
    };
    let profile = ServerProfile::parse(name.trim()).ok_or_else(|| ConfigError::InvalidField {
        origin: origin.clone(),
        field: "tools.profile",
        message: format!(
            "Unknown profile `{name}`; expected one of hello, hello-http, template, workspace"
        ),
    })?;
    Ok(ToolsSection { profile })
}
