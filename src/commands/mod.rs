mod mcp;

pub use mcp::*;
