//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};
use crate::{server::config::ConfigOverrides, tools::ServerProfile};

/// Default endpoint probed by `smoke`.
pub const DEFAULT_SMOKE_BASE_URL: &str = "http://localhost:8000/mcp";

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Probe a running HTTP server and print pass/fail lines.
    #[command(about = "Probe a running HTTP server and print pass/fail lines")]
    Smoke(SmokeArgs),
}

/// Arguments for `smoke`.
#[derive(Debug, Clone, Args)]
#[command(
    long_about = "Probe a running HTTP server.\n\nChecks /health and /tools, then calls the tools of the selected profile.",
    after_help = "Hint: start the server with `hello-mcp --transport http --profile template` first."
)]
pub struct SmokeArgs {
    /// Base URL including the route prefix.
    #[arg(long, default_value = DEFAULT_SMOKE_BASE_URL)]
    pub base_url: String,
    /// Profile whose tools are exercised (tool calls are skipped when omitted).
    #[arg(long, value_enum)]
    pub profile: Option<ServerProfile>,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Hello MCP demo servers (stdio / HTTP)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select stdio (default) or http.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,
    /// Tool set to serve (overrides `[tools].profile`).
    #[arg(long, value_enum)]
    pub profile: Option<ServerProfile>,
    /// Path to hello-mcp.toml (overrides HELLO_MCP_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Bind host for the HTTP transport.
    #[arg(long)]
    pub host: Option<String>,
    /// Bind port for the HTTP transport.
    #[arg(long)]
    pub port: Option<u16>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let overrides = ConfigOverrides {
            host: self.host,
            port: self.port,
            profile: self.profile,
        };
        let launch_args = build_launch_args(self.transport, config_path.as_ref(), &overrides);

        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            overrides,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(command) => {
                validate_command(&command)?;
                Ok(ParsedCommand::Cli(command))
            }
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}

fn validate_command(command: &CliCommand) -> Result<()> {
    match command {
        CliCommand::Smoke(args) => {
            if !(args.base_url.starts_with("http://") || args.base_url.starts_with("https://")) {
                return Err(anyhow!(
                    "invalid base URL `{}`: must start with http:// or https://",
                    args.base_url
                ));
            }
            if args.timeout_secs == 0 {
                return Err(anyhow!("--timeout-secs must be at least 1"));
            }
        }
    }

    Ok(())
}
