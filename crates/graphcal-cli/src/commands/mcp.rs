//! MCP (Model Context Protocol) server command implementation.
//!
//! Serves the endpoint catalog as MCP tools over standard input/output, for
//! MCP clients that spawn the server as a subprocess. The tool set can be
//! narrowed by tag and to read-only endpoints.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use graphcal::{CalendarApi, Catalog, GraphClient, GraphConfig, McpService};
use rmcp::{service::ServiceExt, transport::stdio};
use tokio::signal;
use tracing::info;

/// Command-line arguments for the MCP server subcommand.
#[derive(Debug, Args)]
pub struct McpArgs {
    /// Only expose tools carrying one of these tags. Repeatable.
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Only expose GET endpoints.
    #[arg(long, default_value_t = false)]
    pub read_only: bool,
}

/// Runs the MCP stdio server until the client disconnects or Ctrl+C.
///
/// # Errors
///
/// Returns an error if no access token is configured, if the filters leave
/// no tools, or if the MCP session fails.
pub async fn run(args: &McpArgs, config: &GraphConfig) -> Result<()> {
    let catalog = select_catalog(Catalog::standard(), &args.tags, args.read_only)?;
    let client = GraphClient::from_config(config).context("failed to create Graph client")?;

    eprintln!("{} Starting MCP stdio server...", style("→").cyan());
    eprintln!(
        "{} Loaded {} tool(s)",
        style("✓").green().bold(),
        catalog.len()
    );

    let service = McpService::new(CalendarApi::with_catalog(client, catalog));
    let (stdin, stdout) = stdio();

    let running = service
        .serve((stdin, stdout))
        .await
        .context("failed to start MCP stdio server")?;

    eprintln!("{} MCP stdio server running", style("✓").green().bold());
    eprintln!("Press Ctrl+C to stop\n");

    let cancel = running.cancellation_token();
    let mut waiting = Box::pin(running.waiting());

    tokio::select! {
        result = &mut waiting => {
            result.context("mcp stdio server exited")?;
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
            cancel.cancel();
            let _ = waiting.await;
        }
    }

    info!("graphcal MCP stdio server stopped");
    Ok(())
}

/// Narrows `catalog` to the requested tags and methods. Returns `catalog`
/// itself when no filter is set; a filtered catalog lives for the rest of the
/// process.
fn select_catalog(
    catalog: &'static Catalog,
    tags: &[String],
    read_only: bool,
) -> Result<&'static Catalog> {
    if tags.is_empty() && !read_only {
        return Ok(catalog);
    }

    let endpoints: Vec<_> = catalog
        .iter()
        .filter(|d| tags.is_empty() || d.tags.iter().any(|tag| tags.contains(tag)))
        .filter(|d| !read_only || d.method.is_read())
        .cloned()
        .collect();

    if endpoints.is_empty() {
        anyhow::bail!("no tools match the given filters");
    }

    let filtered = Catalog::new(endpoints).context("failed to build filtered catalog")?;
    Ok(Box::leak(Box::new(filtered)))
}
