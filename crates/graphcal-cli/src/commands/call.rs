//! `graphcal call` command implementation.
//!
//! The response JSON goes to stdout. Status lines go to stderr so the output
//! can be piped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use graphcal::{
    Arguments, CalendarApi, Catalog, GraphClient, GraphConfig, PreparedRequest,
    client::normalize_base_url,
};
use serde_json::{Value, json};

/// Arguments for the `call` command.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name to call (e.g. `user_list_event`).
    pub tool: String,

    /// Input JSON object (inline or @file.json).
    pub input: String,

    /// Print the request that would be sent instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: &CallArgs, config: &GraphConfig) -> Result<()> {
    let input = read_input(&args.input)?;

    if args.dry_run {
        let request = dry_run(&args.tool, input, config)?;
        println!("{}", serde_json::to_string_pretty(&describe_request(&request))?);
        return Ok(());
    }

    eprintln!(
        "{} Calling tool: {}",
        style("→").cyan(),
        style(&args.tool).bold()
    );

    let output = execute(&args.tool, input, config).await?;

    if output.is_null() {
        eprintln!("{} Done (no content)", style("✓").green().bold());
    } else {
        eprintln!("{} Result:", style("✓").green().bold());
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

/// Reads the input argument, loading it from a file when it starts with `@`.
fn read_input(input: &str) -> Result<Value> {
    let input_json = match input.strip_prefix('@') {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read input file: {}", path.display()))?
        }
        None => input.to_string(),
    };

    serde_json::from_str(&input_json).context("invalid input JSON")
}

/// Builds the request `execute` would send. Needs no access token.
fn dry_run(tool: &str, input: Value, config: &GraphConfig) -> Result<PreparedRequest> {
    let args = Arguments::from_json(input).context("invalid tool input")?;
    let base_url = normalize_base_url(config.endpoint())?;
    Ok(Catalog::standard().prepare(tool, &base_url, &args)?)
}

async fn execute(tool: &str, input: Value, config: &GraphConfig) -> Result<Value> {
    let client = GraphClient::from_config(config).context("failed to create Graph client")?;
    let api = CalendarApi::new(client);
    api.call_json(tool, input)
        .await
        .with_context(|| format!("failed to call tool: {tool}"))
}

fn describe_request(request: &PreparedRequest) -> Value {
    let query: serde_json::Map<String, Value> = request
        .query
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.encode())))
        .collect();
    json!({
        "method": request.method,
        "url": request.url,
        "query": query,
        "body": request.body,
        "contentType": request.content_type,
    })
}
