//! Real-time clock drivers

pub mod mcp79410;

pub use mcp79410::{Mcp79410, MCP79410_ADDR};
