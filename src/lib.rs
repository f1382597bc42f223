//! Drink Calculator (drinkcalc) Library
//!
//! Cocktail ABV, dilution, and nutrition estimates, with saved drinks and a
//! classic recipe catalog.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod mcp;
pub mod models;
pub mod tools;
