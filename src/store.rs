use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DesktopPaths, PathEnv, Platform};
use crate::error::AppError;
use crate::process::{ProcessControl, SystemProcessControl};
use crate::settings::AppSettings;

/// Everything an operation needs, resolved once at startup.
///
/// Holds no document state: every operation re-reads disk.
#[derive(Clone)]
pub struct ConfigStore {
    paths: DesktopPaths,
    executable: Option<PathBuf>,
    restart_delay: Duration,
    process: Arc<dyn ProcessControl>,
}

impl ConfigStore {
    pub fn new(paths: DesktopPaths) -> Self {
        let executable = if paths.platform.supports_restart() {
            paths.find_executable()
        } else {
            None
        };
        Self {
            paths,
            executable,
            restart_delay: Duration::from_secs(1),
            process: Arc::new(SystemProcessControl),
        }
    }

    /// Paths for the current platform with settings overrides applied.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, AppError> {
        let env = PathEnv::from_system()?;
        let mut paths = DesktopPaths::resolve(Platform::current(), &env);
        if let Some(dir) = settings.config_dir_override() {
            paths = paths.with_config_dir(dir);
        }
        if let Some(exe) = settings.executable_override() {
            paths = paths.with_preferred_executable(exe);
        }
        log::debug!(
            "config store: enabled={}, disabled={}",
            paths.enabled_path.display(),
            paths.disabled_path.display()
        );
        Ok(Self::new(paths).with_restart_delay(settings.restart_delay()))
    }

    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    pub fn with_process_control(mut self, process: Arc<dyn ProcessControl>) -> Self {
        self.process = process;
        self
    }

    pub fn paths(&self) -> &DesktopPaths {
        &self.paths
    }

    pub fn platform(&self) -> Platform {
        self.paths.platform
    }

    pub fn enabled_path(&self) -> &Path {
        &self.paths.enabled_path
    }

    pub fn disabled_path(&self) -> &Path {
        &self.paths.disabled_path
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn restart_delay(&self) -> Duration {
        self.restart_delay
    }

    pub fn process(&self) -> &Arc<dyn ProcessControl> {
        &self.process
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("paths", &self.paths)
            .field("executable", &self.executable)
            .field("restart_delay", &self.restart_delay)
            .finish_non_exhaustive()
    }
}
