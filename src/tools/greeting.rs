//! Greeting tools: the plain `greet` handler and the workspace greeting.
use schemars::JsonSchema;
use serde::Deserialize;

use crate::tools::schema::ToolInput;

pub const DEFAULT_GREETING_NAME: &str = "World";
pub const DEFAULT_WORKSPACE_NAME: &str = "Rishi";

/// Emoji pool for the workspace greeting.
pub const GREETING_EMOJIS: [&str; 5] = ["👋", "😊", "🌟", "🎉", "✨"];

const WORKSPACE_WELCOME: &str = "\n\n**Welcome to your VS Code workspace!**\n\n\
I'm here to help you with your coding tasks. Feel free to ask me anything about your code, files, or development workflow.\n\n\
How can I assist you today?";

fn default_greeting_name() -> String {
    DEFAULT_GREETING_NAME.to_string()
}

fn default_workspace_name() -> String {
    DEFAULT_WORKSPACE_NAME.to_string()
}

fn enabled() -> bool {
    true
}

/// Input for `greet`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GreetInput {
    /// The name of the person to greet (default: World)
    #[serde(default = "default_greeting_name")]
    pub name: String,
}

impl ToolInput for GreetInput {}

/// `Hello, {name}! 👋` followed by an optional welcome sentence.
pub fn greet(input: &GreetInput, welcome: Option<&str>) -> String {
    match welcome {
        Some(welcome) => format!("Hello, {}! 👋 {welcome}", input.name),
        None => format!("Hello, {}! 👋", input.name),
    }
}

/// Input for the workspace greeting. Flags travel as `timeOfDay` and `includeEmoji`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceGreetingInput {
    /// Name of the person to greet
    #[serde(default = "default_workspace_name")]
    pub name: String,
    /// Greet according to the local time of day
    #[serde(default = "enabled")]
    pub time_of_day: bool,
    /// Append a friendly emoji
    #[serde(default = "enabled")]
    pub include_emoji: bool,
}

impl ToolInput for WorkspaceGreetingInput {}

/// Salutation for a local hour in `0..24`.
pub fn time_of_day_greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Render the workspace greeting. `hour` and `emoji` come from the caller so the
/// formatting itself stays deterministic.
///
/// Only an empty name falls back to the default; whitespace is kept as given.
pub fn compose_workspace_greeting(
    input: &WorkspaceGreetingInput,
    hour: u32,
    emoji: Option<&str>,
) -> String {
    let name = match input.name.as_str() {
        "" => DEFAULT_WORKSPACE_NAME,
        name => name,
    };
    let salutation = if input.time_of_day {
        time_of_day_greeting(hour)
    } else {
        "Hello"
    };

    let mut greeting = format!("{salutation}, {name}!");
    if input.include_emoji {
        if let Some(emoji) = emoji {
            greeting.push(' ');
            greeting.push_str(emoji);
        }
    }
    format!("## {greeting}{WORKSPACE_WELCOME}")
}
