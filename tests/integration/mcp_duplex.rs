use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    serve_client,
    service::ServiceError,
    ServiceExt,
};
use serde_json::{json, Value};

use hello_mcp::{
    server::runtime::DemoServer,
    tools::{build_registry, ServerProfile},
};

use crate::common::identity;

fn build_server(profile: ServerProfile) -> Result<DemoServer> {
    let identity = identity(profile, "stdio", 8000);
    let registry = Arc::new(build_registry(&identity)?);
    Ok(DemoServer::new(
        identity,
        "test instructions".to_string(),
        registry,
    ))
}

fn arguments(value: Value) -> Option<serde_json::Map<String, Value>> {
    value.as_object().cloned()
}

#[tokio::test]
async fn initialize_reports_identity_and_tools() -> Result<()> {
    let server = build_server(ServerProfile::Hello)?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let info = client.peer_info().cloned().expect("server info after initialize");
    assert_eq!(info.server_info.name, "hello-server");
    assert_eq!(info.instructions.as_deref(), Some("test instructions"));

    let list = client.list_tools(None).await?;
    let names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(names, ["say_hello", "get_greeting_info", "echo_message"]);

    let say_hello = &list.tools[0];
    assert_eq!(say_hello.input_schema["type"], "object");
    assert_eq!(say_hello.input_schema["properties"]["name"]["default"], "World");

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn call_tool_returns_text_and_structured_errors() -> Result<()> {
    let server = build_server(ServerProfile::Hello)?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let greeting = client
        .call_tool(CallToolRequestParam {
            name: "say_hello".into(),
            arguments: arguments(json!({ "name": "Rishi" })),
        })
        .await?;
    let rendered = serde_json::to_string(&greeting)?;
    assert!(rendered.contains("Hello, Rishi!"), "{rendered}");
    assert!(!rendered.contains("World"), "{rendered}");

    let error = client
        .call_tool(CallToolRequestParam {
            name: "echo_message".into(),
            arguments: arguments(json!({})),
        })
        .await
        .expect_err("message is required");
    let data = match error {
        ServiceError::McpError(inner) => inner.data.unwrap_or(Value::Null),
        other => anyhow::bail!("unexpected error: {other:?}"),
    };
    assert_eq!(data["code"], "missing_field");
    assert_eq!(data["details"]["field"], "message");
    assert_eq!(data["retryable"], false);

    let error = client
        .call_tool(CallToolRequestParam {
            name: "process_template".into(),
            arguments: None,
        })
        .await
        .expect_err("not registered for the hello profile");
    match error {
        ServiceError::McpError(inner) => {
            assert_eq!(inner.data.expect("data")["code"], "tool_not_found")
        }
        other => anyhow::bail!("unexpected error: {other:?}"),
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn template_password_is_redacted_over_mcp() -> Result<()> {
    let server = build_server(ServerProfile::Template)?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let response = client
        .call_tool(CallToolRequestParam {
            name: "process_template".into(),
            arguments: arguments(json!({
                "ait": "ait-123",
                "spk": "spk-asd",
                "repo": "reponame-polo",
                "application_name": "myapp",
                "project_name": "myproject",
                "cluster_url": "https://cluster.com",
                "service_id": "user123",
                "service_password": "secret123",
            })),
        })
        .await?;
    let rendered = serde_json::to_string(&response)?;
    assert!(!rendered.contains("secret123"), "{rendered}");
    assert!(rendered.contains("ait-123"), "{rendered}");
    assert!(rendered.contains("***"), "{rendered}");

    let error = client
        .call_tool(CallToolRequestParam {
            name: "process_template".into(),
            arguments: arguments(json!({ "ait": 5 })),
        })
        .await
        .expect_err("ait must be a string");
    match error {
        ServiceError::McpError(inner) => {
            let data = inner.data.expect("data");
            assert_eq!(data["code"], "type_mismatch");
            assert_eq!(data["details"]["field"], "ait");
        }
        other => anyhow::bail!("unexpected error: {other:?}"),
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}
