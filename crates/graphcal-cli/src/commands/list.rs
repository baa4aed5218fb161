//! List the tools in the endpoint catalog.
//!
//! Supports a human-readable table and a JSON array carrying every tool's
//! schemas.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;
use graphcal::{Catalog, ToolInfo};

/// Truncates a description to at most 40 characters, ending in "..." when
/// shortened. Counts chars, not bytes.
fn truncate_description(description: &str) -> String {
    const MAX_DESCRIPTION_CHARS: usize = 40;
    const ELLIPSIS: &str = "...";
    const TRUNCATED_CHARS: usize = MAX_DESCRIPTION_CHARS - ELLIPSIS.len();

    let mut chars = description.chars();
    let head: String = chars.by_ref().take(MAX_DESCRIPTION_CHARS).collect();

    if chars.next().is_none() {
        return head;
    }

    let prefix: String = head.chars().take(TRUNCATED_CHARS).collect();
    format!("{prefix}{ELLIPSIS}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminals
    Table,
    /// Pretty-printed JSON array with schemas
    Json,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only list tools carrying this tag (e.g. `events`, `actions`).
    #[arg(short, long)]
    pub tag: Option<String>,
}

pub fn run(args: &ListArgs) -> Result<()> {
    let tools = select_tools(Catalog::standard(), args.tag.as_deref());
    let stdout = io::stdout();
    render(&tools, args.format, &mut stdout.lock())
}

fn select_tools(catalog: &Catalog, tag: Option<&str>) -> Vec<ToolInfo> {
    match tag {
        Some(tag) => catalog.with_tag(tag).map(ToolInfo::from_descriptor).collect(),
        None => catalog.iter().map(ToolInfo::from_descriptor).collect(),
    }
}

fn render(tools: &[ToolInfo], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(tools)?)?;
        }
        OutputFormat::Table if tools.is_empty() => {
            writeln!(out, "No tools found")?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<56} {:<7} {}",
                style("TOOL").bold(),
                style("METHOD").bold(),
                style("DESCRIPTION").bold()
            )?;
            writeln!(out, "{}", "-".repeat(104))?;

            for tool in tools {
                writeln!(
                    out,
                    "{:<56} {:<7} {}",
                    tool.name,
                    tool.method.as_str(),
                    truncate_description(&tool.description)
                )?;
            }

            writeln!(
                out,
                "\n{} {} tool(s) available",
                style("✓").green(),
                tools.len()
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(tools: &[ToolInfo], format: OutputFormat) -> String {
        let mut out = Vec::new();
        render(tools, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_truncate_description_keeps_short_text() {
        assert_eq!(truncate_description("Get an event"), "Get an event");
        assert_eq!(truncate_description(&"a".repeat(40)), "a".repeat(40));
    }

    #[test]
    fn test_truncate_description_shortens_long_text() {
        let truncated = truncate_description(&"b".repeat(41));
        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_description_counts_chars_not_bytes() {
        let text = "é".repeat(40);
        assert_eq!(truncate_description(&text), text);
    }

    #[test]
    fn test_select_tools_filters_by_tag() {
        let catalog = Catalog::standard();
        let actions = select_tools(catalog, Some("actions"));
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|t| t.tags.iter().any(|tag| tag == "actions")));
        assert_eq!(select_tools(catalog, None).len(), catalog.len());
        assert!(select_tools(catalog, Some("no-such-tag")).is_empty());
    }

    #[test]
    fn test_render_table_lists_every_tool() {
        let tools = select_tools(Catalog::standard(), Some("actions"));
        let output = render_to_string(&tools, OutputFormat::Table);

        assert!(output.contains("user_event_dismiss_reminder"));
        assert!(output.contains("POST"));
        assert!(output.contains(&format!("{} tool(s) available", tools.len())));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_to_string(&[], OutputFormat::Table), "No tools found\n");
    }

    #[test]
    fn test_render_json_includes_schemas() {
        let tools = select_tools(Catalog::standard(), Some("actions"));
        let output = render_to_string(&tools, OutputFormat::Json);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), tools.len());
        assert_eq!(array[0]["input_schema"]["type"], "object");
        assert!(array[0]["path"].as_str().unwrap().starts_with("/users/"));
    }
}
