// ============================================================================
// MCP Module - Claude Desktop config documents and ordering
// ============================================================================

mod document;
mod ordering;
mod validation;

pub use document::{
    read_document, write_document, ConfigDocument, McpServerConfig, ServerEntry,
};
pub use ordering::{move_name, reorder_map};
pub use validation::entry_problem;
