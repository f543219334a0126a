use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands;
use crate::error::{DocumentKind, ErrorReport};
use crate::settings::AppSettings;
use crate::store::ConfigStore;

#[derive(Debug, Parser)]
#[command(name = "mcp-desk", version)]
#[command(about = "Enable, disable and reorder Claude Desktop MCP servers")]
pub struct Cli {
    /// Claude Desktop config directory (overrides settings and MCP_DESK_CONFIG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Claude Desktop executable to relaunch (overrides MCP_DESK_EXECUTABLE)
    #[arg(long, global = true, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show config paths and whether they exist
    Info,
    /// List enabled and disabled servers
    List,
    /// Move a server from the disabled config into the live config
    Enable {
        name: String,
        /// Restart Claude Desktop afterwards
        #[arg(long)]
        restart: bool,
    },
    /// Move a server out of the live config
    Disable {
        name: String,
        #[arg(long)]
        restart: bool,
    },
    /// Reorder servers; unlisted servers keep their relative order at the end
    Reorder {
        /// Reorder the disabled list instead of the enabled one
        #[arg(long)]
        disabled: bool,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Move one server to a new position (0-based)
    Move {
        #[arg(long)]
        disabled: bool,
        name: String,
        index: usize,
    },
    /// Restart Claude Desktop (Windows and macOS)
    Restart,
}

fn kind_of(disabled: bool) -> DocumentKind {
    if disabled {
        DocumentKind::Disabled
    } else {
        DocumentKind::Enabled
    }
}

/// Build the store from settings, with CLI flags taking precedence.
pub fn build_store(cli: &Cli) -> Result<ConfigStore, ErrorReport> {
    let mut settings = AppSettings::load();
    if let Some(dir) = &cli.config_dir {
        settings.config_dir = Some(dir.to_string_lossy().to_string());
    }
    if let Some(exe) = &cli.executable {
        settings.executable_path = Some(exe.to_string_lossy().to_string());
    }
    ConfigStore::from_settings(&settings).map_err(|e| ErrorReport::from(&e))
}

/// Run one command; the returned JSON goes to stdout.
pub async fn execute(store: &ConfigStore, command: Command) -> Result<serde_json::Value, ErrorReport> {
    match command {
        Command::Info => to_json(&commands::get_claude_desktop_info(store)),
        Command::List => to_json(&commands::get_mcp_servers(store)?),
        Command::Enable { name, restart } => {
            let list = commands::enable_mcp_server(store, &name)?;
            if restart {
                commands::restart_claude_desktop(store).await?;
            }
            to_json(&list)
        }
        Command::Disable { name, restart } => {
            let list = commands::disable_mcp_server(store, &name)?;
            if restart {
                commands::restart_claude_desktop(store).await?;
            }
            to_json(&list)
        }
        Command::Reorder { disabled, names } => {
            let list = if disabled {
                commands::reorder_disabled_mcp_servers(store, &names)?
            } else {
                commands::reorder_mcp_servers(store, &names)?
            };
            to_json(&list)
        }
        Command::Move {
            disabled,
            name,
            index,
        } => to_json(&commands::move_mcp_server(
            store,
            kind_of(disabled),
            &name,
            index,
        )?),
        Command::Restart => {
            commands::restart_claude_desktop(store).await?;
            Ok(serde_json::json!({ "restarted": true }))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ErrorReport> {
    serde_json::to_value(value).map_err(|e| {
        ErrorReport::from(&crate::error::AppError::JsonSerialize { source: e })
    })
}
