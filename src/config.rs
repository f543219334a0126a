use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const CLAUDE_CONFIG_FILENAME: &str = "claude_desktop_config.json";
pub const CLAUDE_CONFIG_DISABLED_FILENAME: &str = "claude_desktop_config_disabled.json";

/// Host platform as far as Claude Desktop is concerned; anything that is not
/// Windows or macOS is handled like Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Whether Claude Desktop ships for this platform, i.e. restart can work.
    pub fn supports_restart(&self) -> bool {
        matches!(self, Platform::Windows | Platform::MacOs)
    }

    /// Process image name used when terminating the running app.
    pub fn process_image_name(&self) -> &'static str {
        match self {
            Platform::Windows => "Claude.exe",
            _ => "Claude",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::MacOs => f.write_str("macos"),
            Platform::Linux => f.write_str("linux"),
        }
    }
}

/// Snapshot of the environment inputs path resolution depends on.
#[derive(Debug, Clone, Default)]
pub struct PathEnv {
    pub home: PathBuf,
    pub app_data: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
}

impl PathEnv {
    pub fn from_system() -> Result<Self, AppError> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("unable to resolve home directory".into()))?;
        Ok(Self {
            home,
            app_data: non_empty_env("APPDATA"),
            local_app_data: non_empty_env("LOCALAPPDATA"),
        })
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolved locations of the two config documents and the app executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPaths {
    pub platform: Platform,
    pub config_dir: PathBuf,
    pub enabled_path: PathBuf,
    pub disabled_path: PathBuf,
    /// Probed in order; the first one that exists is used for restart.
    pub executable_candidates: Vec<PathBuf>,
}

impl DesktopPaths {
    pub fn resolve(platform: Platform, env: &PathEnv) -> Self {
        let config_dir = default_config_dir(platform, env);
        Self::in_dir(platform, config_dir, executable_candidates(platform, env))
    }

    /// Paths rooted at an explicit config directory.
    pub fn in_dir(
        platform: Platform,
        config_dir: PathBuf,
        executable_candidates: Vec<PathBuf>,
    ) -> Self {
        Self {
            platform,
            enabled_path: config_dir.join(CLAUDE_CONFIG_FILENAME),
            disabled_path: config_dir.join(CLAUDE_CONFIG_DISABLED_FILENAME),
            config_dir,
            executable_candidates,
        }
    }

    /// Override the config directory, keeping platform and executable candidates.
    pub fn with_config_dir(self, config_dir: PathBuf) -> Self {
        Self::in_dir(self.platform, config_dir, self.executable_candidates)
    }

    /// Put an explicit executable ahead of the platform candidates.
    pub fn with_preferred_executable(mut self, exe: PathBuf) -> Self {
        self.executable_candidates.retain(|c| c != &exe);
        self.executable_candidates.insert(0, exe);
        self
    }

    /// First candidate present on disk.
    pub fn find_executable(&self) -> Option<PathBuf> {
        self.executable_candidates
            .iter()
            .find(|p| p.exists())
            .cloned()
    }
}

/// Claude Desktop config directory for a platform.
pub fn default_config_dir(platform: Platform, env: &PathEnv) -> PathBuf {
    match platform {
        Platform::Windows => env
            .app_data
            .clone()
            .unwrap_or_else(|| env.home.join("AppData").join("Roaming"))
            .join("Claude"),
        Platform::MacOs => env
            .home
            .join("Library")
            .join("Application Support")
            .join("Claude"),
        Platform::Linux => env.home.join(".config").join("Claude"),
    }
}

/// Executable locations, user-level install first on macOS.
pub fn executable_candidates(platform: Platform, env: &PathEnv) -> Vec<PathBuf> {
    match platform {
        Platform::Windows => {
            let local = env
                .local_app_data
                .clone()
                .unwrap_or_else(|| env.home.join("AppData").join("Local"));
            vec![local.join("AnthropicClaude").join("claude.exe")]
        }
        Platform::MacOs => vec![
            env.home
                .join("Applications")
                .join("Claude.app")
                .join("Contents")
                .join("MacOS")
                .join("Claude"),
            PathBuf::from("/Applications/Claude.app/Contents/MacOS/Claude"),
        ],
        Platform::Linux => Vec::new(),
    }
}

/// Pretty-print `data` (two-space indent) and write it atomically.
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), AppError> {
    let json =
        serde_json::to_string_pretty(data).map_err(|e| AppError::JsonSerialize { source: e })?;

    atomic_write(path, json.as_bytes())
}

/// Write to a hidden sibling file, then rename over `path`. Readers see the
/// old content or the new content, never a partial write.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AppError> {
    let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(AppError::Config(format!(
            "not a file path: {}",
            path.display()
        )));
    };
    fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;

    let staging = dir.join(format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        std::process::id()
    ));
    let mut file = fs::File::create(&staging).map_err(|e| AppError::io(&staging, e))?;
    file.write_all(data)
        .and_then(|()| file.sync_all())
        .map_err(|e| AppError::io(&staging, e))?;
    drop(file);

    // keep the mode of the file being replaced
    #[cfg(unix)]
    {
        if let Ok(meta) = fs::metadata(path) {
            let _ = fs::set_permissions(&staging, meta.permissions());
        }
    }

    if let Err(source) = replace_file(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(AppError::IoContext {
            context: format!("failed to replace {}", path.display()),
            source,
        });
    }
    Ok(())
}

#[cfg(not(windows))]
fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::rename(from, to)
}

#[cfg(windows)]
fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    // rename refuses to overwrite on some Windows filesystems
    match fs::remove_file(to) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(from, to)
}

/// Remove `path`; a missing file is not an error.
pub fn delete_file(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::io(path, e)),
    }
}
