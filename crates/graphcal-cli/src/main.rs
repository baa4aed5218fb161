//! Command-line interface for the graphcal endpoint catalog.
//!
//! Usage:
//! ```bash
//! graphcal list                                  # List every tool
//! graphcal list --tag actions --format json      # Filter and emit JSON
//! graphcal describe user_calendar_get_event      # Show a tool's schema
//! graphcal call user_list_event '{"user_id":"me","top":5}'
//! graphcal call user_create_event @event.json --dry-run
//! graphcal mcp                                   # Serve over MCP stdio
//! ```
//!
//! `call` and `mcp` read `graphcal.toml` (see `graphcal::config`) for the Graph
//! endpoint and access token. Logs go to stderr so stdout stays usable for
//! JSON output and the MCP protocol.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphcal::GraphConfig;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "graphcal", author, version, about)]
struct Cli {
    /// Path to a config file (defaults to `graphcal.toml` discovery).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List available tools
    List(commands::list::ListArgs),

    /// Describe a specific tool
    Describe(commands::describe::DescribeArgs),

    /// Call a tool against Microsoft Graph
    Call(commands::call::CallArgs),

    /// Serve tools over MCP stdio
    Mcp(commands::mcp::McpArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::List(args) => commands::list::run(args),
        Command::Describe(args) => commands::describe::run(args),
        Command::Call(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::call::run(args, &config).await
        }
        Command::Mcp(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::mcp::run(args, &config).await
        }
    }
}

/// Loads `path` if given, otherwise runs config discovery. Environment
/// overrides are applied in both cases.
fn load_config(path: Option<&std::path::Path>) -> Result<GraphConfig> {
    let config = match path {
        Some(path) => GraphConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GraphConfig::resolve()
            .context("failed to resolve config")?
            .unwrap_or_default(),
    };
    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse_command(argv: &[&str]) -> Result<Command, clap::Error> {
        Ok(Cli::try_parse_from(argv.iter().copied())?.command)
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let err = Cli::try_parse_from(["graphcal"]).expect_err("expected clap parse error");
        assert!(
            matches!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand | ErrorKind::MissingSubcommand
            ),
            "unexpected error kind: {:?}",
            err.kind()
        );
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        let err = Cli::try_parse_from(["graphcal", "serve"]).expect_err("expected clap parse error");
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_cli_call_requires_input_argument() {
        let err = Cli::try_parse_from(["graphcal", "call", "user_list_event"])
            .expect_err("expected clap parse error");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_parses_call_with_dry_run() -> Result<(), clap::Error> {
        let command = parse_command(&[
            "graphcal",
            "call",
            "user_list_event",
            r#"{"user_id":"me"}"#,
            "--dry-run",
        ])?;

        let Command::Call(args) = command else {
            panic!("expected Command::Call");
        };

        assert_eq!(args.tool, "user_list_event");
        assert_eq!(args.input, r#"{"user_id":"me"}"#);
        assert!(args.dry_run);
        Ok(())
    }

    #[test]
    fn test_cli_list_defaults_to_table() -> Result<(), clap::Error> {
        let command = parse_command(&["graphcal", "list"])?;

        let Command::List(args) = command else {
            panic!("expected Command::List");
        };

        assert_eq!(args.format, commands::list::OutputFormat::Table);
        assert!(args.tag.is_none());
        Ok(())
    }

    #[test]
    fn test_cli_global_config_flag_after_subcommand() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["graphcal", "mcp", "--config", "/tmp/graphcal.toml"])?;
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/graphcal.toml")));
        Ok(())
    }

    #[test]
    fn test_cli_mcp_accepts_repeated_tags() -> Result<(), clap::Error> {
        let command = parse_command(&[
            "graphcal",
            "mcp",
            "--tag",
            "events",
            "--tag",
            "actions",
            "--read-only",
        ])?;

        let Command::Mcp(args) = command else {
            panic!("expected Command::Mcp");
        };

        assert_eq!(args.tags, ["events", "actions"]);
        assert!(args.read_only);
        Ok(())
    }

    #[test]
    fn test_load_config_from_explicit_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "endpoint = \"https://graph.example.test/v1.0\"\n")?;

        let config = load_config(Some(&path))?;

        assert!(config.endpoint.is_some());
        Ok(())
    }

    #[test]
    fn test_load_config_missing_path_is_error() {
        let err = load_config(Some(std::path::Path::new("/nonexistent/graphcal.toml")))
            .expect_err("expected missing file error");
        assert!(err.to_string().contains("failed to load config"));
    }
}
