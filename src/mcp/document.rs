use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::config::write_json_file;
use crate::error::AppError;

const SERVERS_KEY: &str = "mcpServers";

/// One Claude Desktop config file.
///
/// Server entries are kept as raw JSON so per-entry keys this tool does not
/// know about (`type`, `url`, ...) are written back untouched. Any other
/// top-level key (`globalShortcut`, preferences, ...) lands in `extra`, and
/// `mcpServers` is written back at the position it was read from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ConfigDocument {
    pub mcp_servers: IndexMap<String, Value>,
    pub extra: Map<String, Value>,
    /// Index of `mcpServers` among the top-level keys; `None` appends it.
    servers_at: Option<usize>,
}

impl TryFrom<Map<String, Value>> for ConfigDocument {
    type Error = serde_json::Error;

    fn try_from(mut root: Map<String, Value>) -> Result<Self, Self::Error> {
        let servers_at = root.keys().position(|k| k == SERVERS_KEY);
        let mcp_servers = match root.shift_remove(SERVERS_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => IndexMap::new(),
        };
        Ok(Self {
            mcp_servers,
            extra: root,
            servers_at,
        })
    }
}

impl Serialize for ConfigDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let at = self
            .servers_at
            .unwrap_or(self.extra.len())
            .min(self.extra.len());
        let mut map = serializer.serialize_map(Some(self.extra.len() + 1))?;
        for (i, (key, value)) in self.extra.iter().enumerate() {
            if i == at {
                map.serialize_entry(SERVERS_KEY, &self.mcp_servers)?;
            }
            map.serialize_entry(key, value)?;
        }
        if at == self.extra.len() {
            map.serialize_entry(SERVERS_KEY, &self.mcp_servers)?;
        }
        map.end()
    }
}

impl ConfigDocument {
    pub fn is_empty(&self) -> bool {
        self.mcp_servers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mcp_servers.contains_key(name)
    }

    /// Remove an entry, keeping the relative order of the rest.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.mcp_servers.shift_remove(name)
    }

    /// Insert at the end, even if the name was already present.
    pub fn append(&mut self, name: String, spec: Value) {
        self.mcp_servers.shift_remove(&name);
        self.mcp_servers.insert(name, spec);
    }

    pub fn names(&self) -> Vec<String> {
        self.mcp_servers.keys().cloned().collect()
    }
}

/// Typed, lenient view of a server entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerConfig {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl McpServerConfig {
    pub fn from_value(v: &Value) -> Self {
        let command = v
            .get("command")
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string();
        let args = v.get("args").and_then(|a| a.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(|s| s.to_string()))
                .collect()
        });
        let env = v.get("env").and_then(|e| e.as_object()).map(|o| {
            o.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        });
        let disabled = v.get("disabled").and_then(|d| d.as_bool());
        Self {
            command,
            args,
            env,
            disabled,
        }
    }
}

/// A listing row: the entry plus which document it was found in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEntry {
    pub name: String,
    pub config: McpServerConfig,
    pub enabled: bool,
}

impl ServerEntry {
    pub fn from_document(doc: &ConfigDocument, enabled: bool) -> Vec<ServerEntry> {
        doc.mcp_servers
            .iter()
            .map(|(name, spec)| ServerEntry {
                name: name.clone(),
                config: McpServerConfig::from_value(spec),
                enabled,
            })
            .collect()
    }
}

/// Read a config document.
///
/// `Ok(None)` when the file is absent or does not hold a JSON object;
/// malformed content is logged, never surfaced.
pub fn read_document(path: &Path) -> Result<Option<ConfigDocument>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::io(path, e)),
    };

    match serde_json::from_str::<ConfigDocument>(&content) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => {
            log::warn!("Failed to read config from {}: {e}", path.display());
            Ok(None)
        }
    }
}

pub fn write_document(path: &Path, doc: &ConfigDocument) -> Result<(), AppError> {
    write_json_file(path, doc)
}
