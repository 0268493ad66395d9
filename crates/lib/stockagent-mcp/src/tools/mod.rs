//! MCP tool modules.
//!
//! Portfolio tools cover question classification and record lookup.

pub mod portfolio;
