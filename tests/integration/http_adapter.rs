use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use hello_mcp::{
    server::http::{ErrorResponse, HealthResponse, ToolCallResponse},
    tools::{ServerProfile, ToolDescriptor, ToolListing},
};

use crate::common::TestHttpServer;

#[tokio::test]
async fn health_and_listing_describe_the_profile() -> Result<()> {
    let server = TestHttpServer::start(ServerProfile::HelloHttp).await?;
    let client = reqwest::Client::new();

    let health: HealthResponse = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health.status, "ok");
    assert_eq!(health.server, "hello-server-http");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.tools, 3);

    let listing: ToolListing = client
        .get(format!("{}/tools", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        listing.names(),
        ["say_hello", "get_server_info", "echo_message"]
    );

    let descriptor: ToolDescriptor = client
        .get(format!("{}/tools/echo_message", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(descriptor.input_schema["required"], json!(["message"]));

    let missing = client
        .get(format!("{}/tools/nope", server.base_url))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn tool_calls_succeed_with_and_without_body() -> Result<()> {
    let server = TestHttpServer::start(ServerProfile::HelloHttp).await?;
    let client = reqwest::Client::new();

    let named: ToolCallResponse = client
        .post(format!("{}/tools/say_hello", server.base_url))
        .json(&json!({ "name": "Rishi" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(named.ok);
    assert_eq!(named.tool, "say_hello");
    assert!(named.result.contains("Hello, Rishi!"));
    assert!(named.result.contains("Welcome to the HTTP MCP server!"));

    let empty = client
        .post(format!("{}/tools/say_hello", server.base_url))
        .send()
        .await?;
    assert_eq!(empty.status(), StatusCode::OK);
    let empty: ToolCallResponse = empty.json().await?;
    assert!(empty.result.contains("World"));

    let info: ToolCallResponse = client
        .post(format!("{}/tools/get_server_info", server.base_url))
        .json(&json!({}))
        .send()
        .await?
        .json()
        .await?;
    assert!(info.result.contains(&server.base_url), "{}", info.result);

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn failures_map_to_status_codes() -> Result<()> {
    let server = TestHttpServer::start(ServerProfile::Template).await?;
    let client = reqwest::Client::new();

    let cases: [(&str, reqwest::RequestBuilder, StatusCode, &str); 4] = [
        (
            "unknown tool",
            client
                .post(format!("{}/tools/say_hello", server.base_url))
                .json(&json!({})),
            StatusCode::NOT_FOUND,
            "tool_not_found",
        ),
        (
            "malformed json",
            client
                .post(format!("{}/tools/hello", server.base_url))
                .header("content-type", "application/json")
                .body("{not json"),
            StatusCode::BAD_REQUEST,
            "invalid_payload",
        ),
        (
            "array payload",
            client
                .post(format!("{}/tools/hello", server.base_url))
                .json(&json!(["Rishi"])),
            StatusCode::BAD_REQUEST,
            "invalid_payload",
        ),
        (
            "missing field",
            client
                .post(format!("{}/tools/process_template", server.base_url))
                .json(&json!({ "ait": "ait-123" })),
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_field",
        ),
    ];

    for (label, request, status, code) in cases {
        let response = request.send().await?;
        assert_eq!(response.status(), status, "{label}");
        let body: ErrorResponse = response.json().await?;
        assert!(!body.ok, "{label}");
        assert_eq!(body.error.code, code, "{label}");
    }

    let mismatch = client
        .post(format!("{}/tools/hello", server.base_url))
        .json(&json!({ "name": null }))
        .send()
        .await?;
    assert_eq!(mismatch.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = mismatch.json().await?;
    assert_eq!(body["error"]["code"], "type_mismatch");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn template_password_never_leaves_the_server() -> Result<()> {
    let server = TestHttpServer::start(ServerProfile::Template).await?;
    let client = reqwest::Client::new();

    let response: ToolCallResponse = client
        .post(format!("{}/tools/process_template", server.base_url))
        .json(&json!({
            "ait": "ait-123",
            "spk": "spk-asd",
            "repo": "reponame-polo",
            "application_name": "myapp",
            "project_name": "myproject",
            "cluster_url": "https://cluster.com",
            "service_id": "user123",
            "service_password": "secret123",
            "unexpected": "ignored",
        }))
        .send()
        .await?
        .json()
        .await?;
    assert!(response.ok);
    assert!(!response.result.contains("secret123"));
    assert_eq!(response.result.matches("***").count(), 2);

    server.stop().await;
    Ok(())
}
