use serde::Serialize;

use crate::config::delete_file;
use crate::error::{AppError, DocumentKind};
use crate::mcp::{
    entry_problem, move_name, read_document, reorder_map, write_document,
    ConfigDocument, ServerEntry,
};
use crate::store::ConfigStore;

/// Paths and presence of the two documents plus the resolved executable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopInfo {
    pub config_path: String,
    pub config_exists: bool,
    pub disabled_config_path: String,
    pub disabled_config_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_executable: Option<String>,
}

/// Both server lists, each in on-disk order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct McpServerList {
    pub enabled: Vec<ServerEntry>,
    pub disabled: Vec<ServerEntry>,
}

impl McpServerList {
    pub fn enabled_names(&self) -> Vec<&str> {
        self.enabled.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn disabled_names(&self) -> Vec<&str> {
        self.disabled.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Enable/disable/reorder business logic over the two config documents.
pub struct McpService;

impl McpService {
    pub fn get_info(store: &ConfigStore) -> DesktopInfo {
        DesktopInfo {
            config_path: store.enabled_path().to_string_lossy().to_string(),
            config_exists: store.enabled_path().exists(),
            disabled_config_path: store.disabled_path().to_string_lossy().to_string(),
            disabled_config_exists: store.disabled_path().exists(),
            claude_executable: store
                .executable()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }

    pub fn list_servers(store: &ConfigStore) -> Result<McpServerList, AppError> {
        let enabled = read_document(store.enabled_path())?.unwrap_or_default();
        let disabled = read_document(store.disabled_path())?.unwrap_or_default();

        for (id, spec) in enabled.mcp_servers.iter() {
            if let Some(problem) = entry_problem(spec) {
                log::warn!("MCP server '{id}' may be rejected by Claude Desktop: {problem}");
            }
        }

        Ok(McpServerList {
            enabled: ServerEntry::from_document(&enabled, true),
            disabled: ServerEntry::from_document(&disabled, false),
        })
    }

    /// Move `name` from the enabled document to the end of the disabled one.
    pub fn disable_server(store: &ConfigStore, name: &str) -> Result<McpServerList, AppError> {
        let mut enabled = read_document(store.enabled_path())?
            .filter(|doc| doc.contains(name))
            .ok_or_else(|| AppError::not_found(name, DocumentKind::Enabled))?;
        let spec = enabled
            .take(name)
            .ok_or_else(|| AppError::not_found(name, DocumentKind::Enabled))?;

        let mut disabled = read_document(store.disabled_path())?.unwrap_or_default();
        disabled.append(name.to_string(), spec);

        // receiving side first: an interruption leaves a duplicate, not a loss
        write_document(store.disabled_path(), &disabled)?;
        write_document(store.enabled_path(), &enabled)?;
        log::info!("disabled MCP server '{name}'");

        Self::list_servers(store)
    }

    /// Move `name` from the disabled document to the end of the enabled one.
    /// The disabled file is deleted once it holds no servers.
    pub fn enable_server(store: &ConfigStore, name: &str) -> Result<McpServerList, AppError> {
        let mut disabled = read_document(store.disabled_path())?
            .filter(|doc| doc.contains(name))
            .ok_or_else(|| AppError::not_found(name, DocumentKind::Disabled))?;
        let spec = disabled
            .take(name)
            .ok_or_else(|| AppError::not_found(name, DocumentKind::Disabled))?;

        let mut enabled = read_document(store.enabled_path())?.unwrap_or_default();
        if enabled.contains(name) {
            log::warn!("MCP server '{name}' exists in both documents, the disabled copy wins");
        }
        enabled.append(name.to_string(), spec);

        write_document(store.enabled_path(), &enabled)?;
        if disabled.is_empty() {
            delete_file(store.disabled_path())?;
            log::info!(
                "removed empty disabled config {}",
                store.disabled_path().display()
            );
        } else {
            write_document(store.disabled_path(), &disabled)?;
        }
        log::info!("enabled MCP server '{name}'");

        Self::list_servers(store)
    }

    pub fn reorder(
        store: &ConfigStore,
        kind: DocumentKind,
        names: &[String],
    ) -> Result<McpServerList, AppError> {
        let mut doc = Self::read_non_empty(store, kind)?;

        let servers = std::mem::take(&mut doc.mcp_servers);
        doc.mcp_servers = reorder_map(servers, names);
        write_document(Self::document_path(store, kind), &doc)?;
        log::info!("reordered {kind} MCP servers: {:?}", doc.names());

        Self::list_servers(store)
    }

    pub fn reorder_enabled(
        store: &ConfigStore,
        names: &[String],
    ) -> Result<McpServerList, AppError> {
        Self::reorder(store, DocumentKind::Enabled, names)
    }

    pub fn reorder_disabled(
        store: &ConfigStore,
        names: &[String],
    ) -> Result<McpServerList, AppError> {
        Self::reorder(store, DocumentKind::Disabled, names)
    }

    /// Drag one entry to `to_index` within its document.
    pub fn move_server(
        store: &ConfigStore,
        kind: DocumentKind,
        name: &str,
        to_index: usize,
    ) -> Result<McpServerList, AppError> {
        let doc = Self::read_non_empty(store, kind)?;
        let order = move_name(&doc.names(), name, to_index, kind)?;
        Self::reorder(store, kind, &order)
    }

    fn read_non_empty(store: &ConfigStore, kind: DocumentKind) -> Result<ConfigDocument, AppError> {
        read_document(Self::document_path(store, kind))?
            .filter(|doc| !doc.is_empty())
            .ok_or(AppError::NothingToReorder(kind))
    }

    fn document_path(store: &ConfigStore, kind: DocumentKind) -> &std::path::Path {
        match kind {
            DocumentKind::Enabled => store.enabled_path(),
            DocumentKind::Disabled => store.disabled_path(),
        }
    }
}
