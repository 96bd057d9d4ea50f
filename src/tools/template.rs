//! `render_template`: echo deployment parameters back with the password redacted.
use schemars::JsonSchema;
use serde::Deserialize;

use crate::tools::{
    schema::ToolInput,
    secret::{SecretString, REDACTION_MARKER},
};

/// Input for `render_template`.
///
/// `service_password` is a [`SecretString`], so the whole struct is safe to log.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TemplateInput {
    /// Application inventory tag
    pub ait: String,
    /// Service package key
    pub spk: String,
    /// Repository name
    pub repo: String,
    /// Application name
    pub application_name: String,
    /// Project name
    pub project_name: String,
    /// Cluster URL
    pub cluster_url: String,
    /// Service account ID
    pub service_id: String,
    /// Service account password
    pub service_password: SecretString,
}

impl ToolInput for TemplateInput {}

/// Render the processing report. The password slot always shows the redaction
/// marker; the secret value itself is never read here.
pub fn render_template(input: &TemplateInput) -> String {
    let TemplateInput {
        ait,
        spk,
        repo,
        application_name,
        project_name,
        cluster_url,
        service_id,
        service_password: _,
    } = input;

    format!(
        "## MCP Template Processing Complete

**Input Parameters:**
- **AIT**: {ait}
- **SPK**: {spk}
- **Repository**: {repo}
- **Application Name**: {application_name}
- **Project Name**: {project_name}
- **Cluster URL**: {cluster_url}
- **Service ID**: {service_id}
- **Service Password**: {REDACTION_MARKER}

**Response:**
Here are the parameters you provided:
- AIT: {ait}
- SPK: {spk}
- Repository: {repo}
- Application Name: {application_name}
- Project Name: {project_name}
- Cluster URL: {cluster_url}
- Service ID: {service_id}
- Service Password: {REDACTION_MARKER}

The MCP template tool has successfully processed your request."
    )
}
