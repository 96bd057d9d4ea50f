use schemars::JsonSchema;
use serde::Deserialize;

use crate::tools::schema::ToolInput;

/// Input for `echo`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoInput {
    /// The message to echo back
    pub message: String,
}

impl ToolInput for EchoInput {}

pub fn echo(input: &EchoInput, trailer: Option<&str>) -> String {
    match trailer {
        Some(trailer) => format!("📢 Echo: {}\n\n{trailer}", input.message),
        None => format!("📢 Echo: {}", input.message),
    }
}
