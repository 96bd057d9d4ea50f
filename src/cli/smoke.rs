//! `smoke` command: exercise a running HTTP server the way a client would.
use std::time::Duration;

use serde_json::{json, Value};

use super::SmokeArgs;
use crate::{
    lib::errors::SmokeError,
    server::http::{ErrorResponse, HealthResponse, ToolCallResponse},
    tools::{ServerProfile, ToolListing},
};

const SAMPLE_PASSWORD: &str = "servicePassword-pass123";

/// One probe and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeCheck {
    pub label: String,
    pub passed: bool,
    pub detail: String,
}

/// Collected results of a smoke run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmokeReport {
    pub checks: Vec<SmokeCheck>,
}

impl SmokeReport {
    fn record(&mut self, label: impl Into<String>, passed: bool, detail: impl Into<String>) {
        self.checks.push(SmokeCheck {
            label: label.into(),
            passed,
            detail: detail.into(),
        });
    }

    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable pass/fail lines.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.checks.len() + 1);
        for check in &self.checks {
            let mark = if check.passed { "✅" } else { "❌" };
            let verdict = if check.passed { "passed" } else { "failed" };
            lines.push(format!("{mark} {} {verdict}: {}", check.label, check.detail));
        }
        lines.push(format!(
            "🏁 {} checks, {} failed",
            self.checks.len(),
            self.failed()
        ));
        lines.join("\n")
    }
}

/// Tool calls issued for a profile: (label, tool, payload).
fn profile_calls(profile: ServerProfile) -> Vec<(&'static str, &'static str, Value)> {
    match profile {
        ServerProfile::Hello | ServerProfile::HelloHttp => {
            let info_tool = if profile == ServerProfile::Hello {
                "get_greeting_info"
            } else {
                "get_server_info"
            };
            vec![
                ("say_hello", "say_hello", json!({ "name": "Rishi" })),
                ("say_hello default", "say_hello", json!({})),
                ("echo_message", "echo_message", json!({ "message": "ping" })),
                (info_tool, info_tool, json!({})),
            ]
        }
        ServerProfile::Template => vec![
            ("hello", "hello", json!({ "name": "Rishi" })),
            ("hello default", "hello", json!({})),
            (
                "process_template",
                "process_template",
                json!({
                    "ait": "ait-123",
                    "spk": "spk-asd",
                    "repo": "reponame-polo",
                    "application_name": "applicationName-myapp",
                    "project_name": "projectName-myproject",
                    "cluster_url": "clusterURL-https://cluster.com",
                    "service_id": "serviceID-user123",
                    "service_password": SAMPLE_PASSWORD,
                }),
            ),
        ],
        ServerProfile::Workspace => vec![(
            "workspace_greeting",
            "workspace_greeting",
            json!({ "name": "Rishi" }),
        )],
    }
}

/// Run the smoke checks. Fails only when the server cannot be reached at all.
pub async fn run_smoke(args: &SmokeArgs) -> Result<SmokeReport, SmokeError> {
    let base = args.base_url.trim_end_matches('/');
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .map_err(|source| SmokeError::TransportConnection {
            url: base.to_string(),
            source,
        })?;
    let mut report = SmokeReport::default();

    let health_url = format!("{base}/health");
    let health = client
        .get(&health_url)
        .send()
        .await
        .map_err(|source| SmokeError::TransportConnection {
            url: health_url.clone(),
            source,
        })?;
    let status = health.status();
    match health.json::<HealthResponse>().await {
        Ok(body) if status.is_success() => report.record(
            "health check",
            true,
            format!("{status} ({} serving {} tools)", body.server, body.tools),
        ),
        Ok(_) => report.record("health check", false, status.to_string()),
        Err(err) => report.record("health check", false, format!("{status}: {err}")),
    }

    let tools_url = format!("{base}/tools");
    match client.get(&tools_url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<ToolListing>().await {
                Ok(listing) => report.record(
                    "tools list",
                    true,
                    format!("available tools: {}", listing.names().join(", ")),
                ),
                Err(err) => report.record("tools list", false, err.to_string()),
            }
        }
        Ok(response) => {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            report.record("tools list", false, format!("{status}: {text}"));
        }
        Err(err) => report.record("tools list", false, err.to_string()),
    }

    if let Some(profile) = args.profile {
        for (label, tool, payload) in profile_calls(profile) {
            let (passed, detail) = call_tool(&client, base, tool, &payload).await;
            report.record(label, passed, detail);
        }
    }

    tracing::info!(
        target: "hello_mcp::smoke",
        base_url = base,
        checks = report.checks.len(),
        failed = report.failed(),
        "Smoke run finished"
    );
    Ok(report)
}

async fn call_tool(
    client: &reqwest::Client,
    base: &str,
    tool: &str,
    payload: &Value,
) -> (bool, String) {
    let url = format!("{base}/tools/{tool}");
    let response = match client.post(&url).json(payload).send().await {
        Ok(response) => response,
        Err(err) => return (false, err.to_string()),
    };
    let status = response.status();

    if status.is_success() {
        return match response.json::<ToolCallResponse>().await {
            Ok(body) if body.result.contains(SAMPLE_PASSWORD) => {
                (false, "response leaked the service password".to_string())
            }
            Ok(body) => (true, format!("response: {}", body.result)),
            Err(err) => (false, format!("unreadable response: {err}")),
        };
    }

    match response.json::<ErrorResponse>().await {
        Ok(body) => (
            false,
            format!("{status}: {} ({})", body.error.message, body.error.code),
        ),
        Err(_) => (false, status.to_string()),
    }
}
