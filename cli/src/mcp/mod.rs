//! MCP tool server: the agent-facing surface of AutoDock.

pub mod server;
pub mod tools;

pub use server::{serve_http, serve_stdio};
pub use tools::{AutodockTools, ToolState};
