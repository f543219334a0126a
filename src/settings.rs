use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR_ENV: &str = "MCP_DESK_CONFIG_DIR";
pub const EXECUTABLE_ENV: &str = "MCP_DESK_EXECUTABLE";

/// Optional overrides for the config directory and Claude executable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Replaces the platform config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,
    /// Tried before the platform default install locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

fn default_restart_delay_ms() -> u64 {
    1000
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            config_dir: None,
            executable_path: None,
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

impl AppSettings {
    /// ~/.mcp-desk/settings.json
    pub fn settings_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mcp-desk").join("settings.json"))
    }

    /// File settings with environment overrides applied.
    pub fn load() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                log::warn!("unable to resolve home directory, using default settings");
                Self::default()
            }
        };
        settings.apply_env_overrides();
        settings
    }

    pub fn load_from_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                log::warn!(
                    "failed to read settings, using defaults. path: {}, error: {}",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<AppSettings>(&content) {
            Ok(mut settings) => {
                settings.normalize_paths();
                settings
            }
            Err(err) => {
                log::warn!(
                    "failed to parse settings, using defaults. path: {}, error: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn apply_env_overrides(&mut self) {
        // blank variables leave the file value in place
        if let Some(dir) = non_blank_env(CONFIG_DIR_ENV) {
            self.config_dir = Some(dir);
        }
        if let Some(exe) = non_blank_env(EXECUTABLE_ENV) {
            self.executable_path = Some(exe);
        }
        self.normalize_paths();
    }

    fn normalize_paths(&mut self) {
        self.config_dir = self
            .config_dir
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        self.executable_path = self
            .executable_path
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
    }

    pub fn config_dir_override(&self) -> Option<PathBuf> {
        self.config_dir.as_deref().map(resolve_override_path)
    }

    pub fn executable_override(&self) -> Option<PathBuf> {
        self.executable_path.as_deref().map(resolve_override_path)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

fn resolve_override_path(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    } else if let Some(stripped) = raw.strip_prefix("~\\") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    PathBuf::from(raw)
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let saved = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
            for key in keys {
                env::remove_var(key);
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let settings = AppSettings::load_from_file(&dir.path().join("settings.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.restart_delay(), Duration::from_secs(1));
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").expect("seed settings");
        assert_eq!(AppSettings::load_from_file(&path), AppSettings::default());
    }

    #[test]
    fn blank_overrides_are_dropped() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"configDir":"   ","executablePath":"/opt/Claude","restartDelayMs":250}"#,
        )
        .expect("seed settings");

        let settings = AppSettings::load_from_file(&path);
        assert_eq!(settings.config_dir, None);
        assert_eq!(settings.executable_override(), Some(PathBuf::from("/opt/Claude")));
        assert_eq!(settings.restart_delay(), Duration::from_millis(250));
    }

    #[test]
    #[serial]
    fn env_overrides_take_precedence() {
        let _guard = EnvGuard::capture(&[CONFIG_DIR_ENV, EXECUTABLE_ENV]);
        env::set_var(CONFIG_DIR_ENV, "/srv/claude");

        let mut settings = AppSettings {
            config_dir: Some("/from/file".into()),
            ..AppSettings::default()
        };
        settings.apply_env_overrides();

        assert_eq!(settings.config_dir_override(), Some(PathBuf::from("/srv/claude")));
        assert_eq!(settings.executable_path, None);
    }

    #[test]
    #[serial]
    fn blank_env_keeps_file_values() {
        let _guard = EnvGuard::capture(&[CONFIG_DIR_ENV, EXECUTABLE_ENV]);
        env::set_var(CONFIG_DIR_ENV, "  ");
        env::set_var(EXECUTABLE_ENV, "");

        let mut settings = AppSettings {
            config_dir: Some("/from/file".into()),
            executable_path: Some("/opt/Claude".into()),
            ..AppSettings::default()
        };
        settings.apply_env_overrides();

        assert_eq!(settings.config_dir_override(), Some(PathBuf::from("/from/file")));
        assert_eq!(settings.executable_override(), Some(PathBuf::from("/opt/Claude")));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else { return };
        assert_eq!(resolve_override_path("~/Claude"), home.join("Claude"));
        assert_eq!(resolve_override_path("/abs"), PathBuf::from("/abs"));
    }
}
