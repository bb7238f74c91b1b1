//! Renderer module
//!
//! Renders command reports to json, jsonl or md

use serde::Serialize;
use serde_json::Value;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Compact JSON on a single line
    Jsonl,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Renderer for command reports
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render any serializable report to a string
    pub fn render<T: Serialize + ?Sized>(&self, report: &T) -> String {
        let value = serde_json::to_value(report).unwrap_or(Value::Null);
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string())
            }
            OutputFormat::Jsonl => match &value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| serde_json::to_string(item).ok())
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
            },
            OutputFormat::Markdown => render_markdown(&value),
        }
    }
}

/// Render as Markdown: objects become bullet lists, arrays become sections
fn render_markdown(value: &Value) -> String {
    match value {
        Value::Object(_) => render_object_md(value),
        Value::Array(items) => items
            .iter()
            .map(render_markdown)
            .collect::<Vec<_>>()
            .join("\n"),
        other => inline(other),
    }
}

fn render_object_md(value: &Value) -> String {
    let mut output = String::new();
    if let Value::Object(map) = value {
        for (key, field) in map {
            match field {
                // Multi-line text reads better as a block
                Value::String(text) if text.contains('\n') => {
                    output.push_str(&format!("- **{}**:\n\n```\n{}\n```\n", key, text));
                }
                _ => output.push_str(&format!("- **{}**: {}\n", key, inline(field))),
            }
        }
    }
    output
}

fn inline(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
