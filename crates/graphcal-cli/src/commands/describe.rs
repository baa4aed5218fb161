//! Prints detailed information about one tool in the endpoint catalog.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use console::style;
use graphcal::{Catalog, ToolInfo};

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Tool name to describe (e.g. `user_calendar_get_event`).
    pub tool: String,
}

pub fn run(args: &DescribeArgs) -> Result<()> {
    let Some(descriptor) = Catalog::standard().get(&args.tool) else {
        anyhow::bail!("tool not found: {}", args.tool);
    };
    let stdout = io::stdout();
    render(&ToolInfo::from_descriptor(descriptor), &mut stdout.lock())
}

fn render(tool: &ToolInfo, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", style("Tool Details").bold().underlined())?;
    writeln!(out)?;

    writeln!(out, "{}: {}", style("Name").cyan(), tool.name)?;
    writeln!(out, "{}: {} {}", style("Request").cyan(), tool.method, tool.path)?;

    if !tool.description.is_empty() {
        writeln!(out, "{}: {}", style("Description").cyan(), tool.description)?;
    }

    if !tool.capabilities.is_empty() {
        writeln!(
            out,
            "{}: {}",
            style("Capabilities").cyan(),
            tool.capabilities.join(", ")
        )?;
    }

    if !tool.tags.is_empty() {
        writeln!(out, "{}: {}", style("Tags").cyan(), tool.tags.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style("Input Schema").bold().underlined())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&tool.input_schema)?)?;

    writeln!(out)?;
    writeln!(out, "{}", style("Output Schema").bold().underlined())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&tool.output_schema)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_request_and_schemas() {
        let descriptor = Catalog::standard().get("user_calendar_get_event").unwrap();
        let mut out = Vec::new();
        render(&ToolInfo::from_descriptor(descriptor), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("user_calendar_get_event"));
        assert!(output.contains("GET /users/{user-id}/calendar/events/{event-id}"));
        assert!(output.contains("\"user_id\""));
        assert!(output.contains("\"event_id\""));
        assert!(output.contains("Output Schema"));
    }

    #[test]
    fn test_run_rejects_unknown_tool() {
        let err = run(&DescribeArgs {
            tool: "user_get_weather".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "tool not found: user_get_weather");
    }
}
