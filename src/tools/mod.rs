//! Drinkcalc Tools module
//!
//! MCP tool implementations for the drink calculator.

pub mod classics;
pub mod drinks;
pub mod saved;
pub mod status;
