//! Static server information block returned by `describe_server`.

/// Render a titled bullet list such as:
///
/// ```text
/// Hello MCP Server Information:
/// - Server Name: hello-server
/// - Version: 1.0.0
/// ```
pub fn describe_server(title: &str, facts: &[(&str, String)]) -> String {
    let mut text = format!("{title}:");
    for (label, value) in facts {
        text.push_str("\n- ");
        text.push_str(label);
        text.push_str(": ");
        text.push_str(value);
    }
    text
}
