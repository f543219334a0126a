mod cli;
mod commands;
mod config;
mod error;
mod logger;
mod mcp;
mod process;
mod services;
mod settings;
mod store;

pub use cli::{build_store, execute, Cli, Command};
pub use commands::*;
pub use config::{
    atomic_write, default_config_dir, executable_candidates, write_json_file, DesktopPaths,
    PathEnv, Platform, CLAUDE_CONFIG_DISABLED_FILENAME, CLAUDE_CONFIG_FILENAME,
};
pub use error::{AppError, DocumentKind, ErrorKind, ErrorReport};
pub use logger::init_logger;
pub use mcp::{read_document, reorder_map, ConfigDocument, McpServerConfig, ServerEntry};
pub use process::{ProcessControl, SystemProcessControl, TerminateOutcome};
pub use services::{DesktopInfo, DesktopService, McpServerList, McpService};
pub use settings::{AppSettings, CONFIG_DIR_ENV, EXECUTABLE_ENV};
pub use store::ConfigStore;

use clap::Parser;

/// Binary entry point: parse args, run one command, print the result.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let store = match build_store(&cli) {
        Ok(store) => store,
        Err(report) => return report_error(&report),
    };

    match execute(&store, cli.command).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                0
            }
            Err(e) => {
                log::error!("failed to render output: {e}");
                1
            }
        },
        Err(report) => report_error(&report),
    }
}

fn report_error(report: &ErrorReport) -> i32 {
    match serde_json::to_string_pretty(report) {
        Ok(text) => eprintln!("{text}"),
        Err(_) => eprintln!("{}", report.message),
    }
    match report.kind {
        ErrorKind::NotFound | ErrorKind::NothingToReorder => 2,
        _ => 1,
    }
}
