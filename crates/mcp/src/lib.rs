//! MCP (Model Context Protocol) server for the Qualer API.
//!
//! Exposes read-only Qualer operations as typed tools and resource views
//! to agent clients over JSON-RPC 2.0 on stdio.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use resources::ResourceCatalog;
pub use server::McpServer;
pub use tools::ToolRegistry;
