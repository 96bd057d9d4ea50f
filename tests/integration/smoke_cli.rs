use std::{process::Stdio, time::Duration};

use anyhow::Result;
use tokio::{process::Command, time::timeout};

use hello_mcp::{
    cli::{execute_cli_command, CliCommand, SmokeArgs},
    tools::ServerProfile,
};

use crate::common::{TestHttpServer, BINARY_PATH};

#[tokio::test]
async fn smoke_passes_against_every_profile() -> Result<()> {
    for profile in [
        ServerProfile::Hello,
        ServerProfile::HelloHttp,
        ServerProfile::Template,
        ServerProfile::Workspace,
    ] {
        let server = TestHttpServer::start(profile).await?;
        let outcome = execute_cli_command(CliCommand::Smoke(SmokeArgs {
            base_url: server.base_url.clone(),
            profile: Some(profile),
            timeout_secs: 5,
        }))
        .await?;

        assert!(
            outcome.success,
            "{} smoke run failed:\n{}",
            profile.as_str(),
            outcome.message
        );
        assert!(outcome.message.contains("✅ health check passed"));
        assert!(!outcome.message.contains("❌"));
        server.stop().await;
    }
    Ok(())
}

#[tokio::test]
async fn smoke_reports_tools_missing_from_the_server() -> Result<()> {
    let server = TestHttpServer::start(ServerProfile::Workspace).await?;
    let outcome = execute_cli_command(CliCommand::Smoke(SmokeArgs {
        base_url: server.base_url.clone(),
        profile: Some(ServerProfile::Template),
        timeout_secs: 5,
    }))
    .await?;

    assert!(!outcome.success);
    assert!(
        outcome.message.contains("❌ process_template failed: 404"),
        "{}",
        outcome.message
    );
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn smoke_binary_exits_non_zero_when_server_is_down() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let output = timeout(
        Duration::from_secs(20),
        Command::new(BINARY_PATH)
            .args([
                "smoke",
                "--base-url",
                &format!("http://127.0.0.1:{port}/mcp"),
                "--timeout-secs",
                "2",
            ])
            .stdin(Stdio::null())
            .output(),
    )
    .await??;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not reach"), "stderr: {stderr}");
    Ok(())
}
