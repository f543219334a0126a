pub mod desktop;
pub mod mcp;

pub use desktop::DesktopService;
pub use mcp::{DesktopInfo, McpServerList, McpService};
