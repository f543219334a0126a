use crate::error::{DocumentKind, ErrorReport};
use crate::services::{DesktopInfo, DesktopService, McpServerList, McpService};
use crate::store::ConfigStore;

/// Paths and existence flags for both config files.
pub fn get_claude_desktop_info(store: &ConfigStore) -> DesktopInfo {
    McpService::get_info(store)
}

/// Enabled and disabled server lists.
pub fn get_mcp_servers(store: &ConfigStore) -> Result<McpServerList, ErrorReport> {
    McpService::list_servers(store).map_err(|e| ErrorReport::from(&e))
}

pub fn disable_mcp_server(store: &ConfigStore, name: &str) -> Result<McpServerList, ErrorReport> {
    McpService::disable_server(store, name).map_err(|e| ErrorReport::from(&e))
}

pub fn enable_mcp_server(store: &ConfigStore, name: &str) -> Result<McpServerList, ErrorReport> {
    McpService::enable_server(store, name).map_err(|e| ErrorReport::from(&e))
}

pub fn reorder_mcp_servers(
    store: &ConfigStore,
    names: &[String],
) -> Result<McpServerList, ErrorReport> {
    McpService::reorder_enabled(store, names).map_err(|e| ErrorReport::from(&e))
}

pub fn reorder_disabled_mcp_servers(
    store: &ConfigStore,
    names: &[String],
) -> Result<McpServerList, ErrorReport> {
    McpService::reorder_disabled(store, names).map_err(|e| ErrorReport::from(&e))
}

pub fn move_mcp_server(
    store: &ConfigStore,
    kind: DocumentKind,
    name: &str,
    to_index: usize,
) -> Result<McpServerList, ErrorReport> {
    McpService::move_server(store, kind, name, to_index).map_err(|e| ErrorReport::from(&e))
}

/// Kill and relaunch Claude Desktop.
pub async fn restart_claude_desktop(store: &ConfigStore) -> Result<(), ErrorReport> {
    DesktopService::restart(store)
        .await
        .map_err(|e| ErrorReport::from(&e))
}
