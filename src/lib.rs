//! MCP tools for searching residential sale listings on realestate.co.nz.

pub mod api;
pub mod listing;
pub mod matcher;
pub mod query;
pub mod stdio;
pub mod suburbs;
pub mod tools;
