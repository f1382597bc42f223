//! MCP server module
//!
//! Exposes the drink calculator over the Model Context Protocol.

pub mod server;

pub use server::DrinkService;
