//! CLI entrypoint module structure.
use anyhow::Result;

pub mod args;
pub mod profile;
pub mod smoke;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand, SmokeArgs, DEFAULT_SMOKE_BASE_URL};
pub use profile::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};
pub use smoke::{run_smoke, SmokeCheck, SmokeReport};

/// User-facing result of a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOutcome {
    pub message: String,
    pub success: bool,
}

/// Execute CLI command mode and return a user-facing result payload.
pub async fn execute_cli_command(command: CliCommand) -> Result<CliOutcome> {
    match command {
        CliCommand::Smoke(args) => {
            let report = run_smoke(&args).await?;
            Ok(CliOutcome {
                message: report.render(),
                success: report.all_passed(),
            })
        }
    }
}
