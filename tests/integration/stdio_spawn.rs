use std::{process::Stdio, time::Duration};

use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    serve_client,
};
use serde_json::json;
use tokio::{process::Command, time::timeout};

use crate::common::{fixture, spawn_server_process, BINARY_PATH};

#[tokio::test]
async fn inspector_style_spawn_lists_and_calls_tools() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process("template").await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let info = client.peer_info().cloned().expect("initialize result");
    assert_eq!(
        info.server_info.name, "template-demo",
        "server name comes from the config file"
    );

    let list = client.list_tools(None).await?;
    let names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(names, ["hello", "process_template"]);

    let response = client
        .call_tool(CallToolRequestParam {
            name: "hello".into(),
            arguments: json!({}).as_object().cloned(),
        })
        .await?;
    let rendered = serde_json::to_string(&response)?;
    assert!(rendered.contains("Hello, World!"), "{rendered}");

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[tokio::test]
async fn invalid_config_exits_with_failure_and_reason() -> Result<()> {
    let output = timeout(
        Duration::from_secs(10),
        Command::new(BINARY_PATH)
            .args([
                "--config",
                &fixture("tests/fixtures/config_invalid_port.toml"),
            ])
            .stdin(Stdio::null())
            .output(),
    )
    .await??;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server.port"), "stderr: {stderr}");
    assert!(
        output.stdout.is_empty(),
        "stdout must stay clean for MCP framing"
    );
    Ok(())
}
