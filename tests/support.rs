#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tempfile::TempDir;

use mcp_desk_lib::{
    AppError, ConfigStore, DesktopPaths, Platform, ProcessControl, TerminateOutcome,
};

/// Isolated Claude Desktop config dir for one test.
pub fn temp_store(platform: Platform) -> (TempDir, ConfigStore) {
    let dir = TempDir::new().expect("create temp config dir");
    let paths = DesktopPaths::in_dir(platform, dir.path().join("Claude"), Vec::new());
    (dir, ConfigStore::new(paths))
}

pub fn seed(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(
        path,
        serde_json::to_string_pretty(value).expect("serialize seed"),
    )
    .expect("seed config");
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read config");
    serde_json::from_str(&text).expect("parse config")
}

pub fn server_names(path: &Path) -> Vec<String> {
    read_json(path)["mcpServers"]
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Terminate(String),
    Launch(PathBuf),
}

/// Records calls instead of touching real processes.
#[derive(Default)]
pub struct FakeProcess {
    pub calls: Mutex<Vec<ProcessCall>>,
    pub terminate_result: Mutex<Option<Result<TerminateOutcome, String>>>,
    pub launch_error: Mutex<Option<String>>,
    /// When set, terminate blocks until a message arrives (or gives up).
    pub terminate_gate: Mutex<Option<Receiver<()>>>,
}

impl FakeProcess {
    pub fn returning(outcome: Result<TerminateOutcome, String>) -> Arc<Self> {
        let fake = Self::default();
        *fake.terminate_result.lock().unwrap() = Some(outcome);
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<ProcessCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessControl for FakeProcess {
    fn terminate(
        &self,
        _platform: Platform,
        image_name: &str,
    ) -> Result<TerminateOutcome, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(ProcessCall::Terminate(image_name.to_string()));
        if let Some(gate) = self.terminate_gate.lock().unwrap().take() {
            if gate.recv_timeout(Duration::from_secs(2)).is_err() {
                return Err(AppError::ProcessControl("terminate was never released".into()));
            }
        }
        match self.terminate_result.lock().unwrap().clone() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(msg)) => Err(AppError::ProcessControl(msg)),
            None => Ok(TerminateOutcome::Terminated),
        }
    }

    fn launch_detached(&self, _platform: Platform, executable: &Path) -> Result<(), AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(ProcessCall::Launch(executable.to_path_buf()));
        match self.launch_error.lock().unwrap().clone() {
            Some(msg) => Err(AppError::ProcessControl(msg)),
            None => Ok(()),
        }
    }
}
