//! LaunchProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::server::config::{locate_config_file, ConfigOverrides};

/// Transport the server listens on.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Http,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Http => "http",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    /// `None` when no config file applies and built-in defaults are used.
    pub config_path: Option<PathBuf>,
    pub transport: TransportMode,
    pub overrides: ConfigOverrides,
    pub launch_args: Vec<String>,
}

/// Resolve the config path (CLI override → env var → default file) and make it absolute.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let Some(path) = locate_config_file(override_path) else {
        return Ok(None);
    };

    if path.is_absolute() {
        return Ok(Some(path));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(Some(cwd.join(path)))
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    transport: TransportMode,
    config: Option<&PathBuf>,
    overrides: &ConfigOverrides,
) -> Vec<String> {
    let mut args = vec![format!("--transport={}", transport.as_str())];
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(profile) = overrides.profile {
        args.push(format!("--profile={}", profile.as_str()));
    }
    if let Some(host) = &overrides.host {
        args.push(format!("--host={host}"));
    }
    if let Some(port) = overrides.port {
        args.push(format!("--port={port}"));
    }
    args
}
