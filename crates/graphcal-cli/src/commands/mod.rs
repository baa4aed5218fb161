//! CLI command implementations.
//!
//! - `list`: print the endpoint catalog as a table or JSON
//! - `describe`: print one tool's metadata and schemas
//! - `call`: invoke one endpoint against Microsoft Graph
//! - `mcp`: serve the catalog as MCP tools over stdio

pub mod call;
pub mod describe;
pub mod list;
pub mod mcp;
