use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::config::Platform;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    Terminated,
    NotRunning,
}

/// Kill/launch seam used by restart.
pub trait ProcessControl: Send + Sync {
    /// Force-terminate every process with the given image name.
    fn terminate(&self, platform: Platform, image_name: &str)
        -> Result<TerminateOutcome, AppError>;

    /// Start `executable` without keeping a handle to it.
    fn launch_detached(&self, platform: Platform, executable: &Path) -> Result<(), AppError>;
}

/// Drives the real OS tools (`taskkill`, `pkill`, `open`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessControl;

impl ProcessControl for SystemProcessControl {
    fn terminate(
        &self,
        platform: Platform,
        image_name: &str,
    ) -> Result<TerminateOutcome, AppError> {
        let mut cmd = match platform {
            Platform::Windows => {
                let mut c = Command::new("taskkill");
                c.args(["/F", "/IM", image_name]);
                c
            }
            Platform::MacOs => {
                let mut c = Command::new("pkill");
                c.args(["-9", image_name]);
                c
            }
            Platform::Linux => {
                return Err(AppError::UnsupportedPlatform(platform.to_string()));
            }
        };

        let output = cmd.stdin(Stdio::null()).output().map_err(|e| {
            AppError::ProcessControl(format!("failed to run terminate command: {e}"))
        })?;
        classify_terminate(platform, &output)
    }

    fn launch_detached(&self, platform: Platform, executable: &Path) -> Result<(), AppError> {
        let mut cmd = match platform {
            Platform::Windows => {
                #[allow(unused_mut)]
                let mut c = Command::new(executable);
                #[cfg(windows)]
                {
                    use std::os::windows::process::CommandExt;
                    const DETACHED_PROCESS: u32 = 0x0000_0008;
                    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
                    c.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
                }
                c
            }
            Platform::MacOs => {
                let mut c = Command::new("open");
                c.arg("-a").arg(executable);
                c
            }
            Platform::Linux => {
                return Err(AppError::UnsupportedPlatform(platform.to_string()));
            }
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                AppError::ProcessControl(format!(
                    "failed to launch {}: {e}",
                    executable.display()
                ))
            })?;
        Ok(())
    }
}

fn classify_terminate(platform: Platform, output: &Output) -> Result<TerminateOutcome, AppError> {
    if output.status.success() {
        return Ok(TerminateOutcome::Terminated);
    }
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    interpret_failure(platform, output.status.code(), &text)
}

/// Decide whether a failed terminate just means nothing was running.
pub(crate) fn interpret_failure(
    platform: Platform,
    code: Option<i32>,
    text: &str,
) -> Result<TerminateOutcome, AppError> {
    let lower = text.to_lowercase();
    // pkill: 1 = no process matched
    let no_match_code = platform == Platform::MacOs && code == Some(1);
    if no_match_code || lower.contains("not found") || lower.contains("no process") {
        return Ok(TerminateOutcome::NotRunning);
    }
    let detail = text.trim();
    Err(AppError::ProcessControl(format!(
        "failed to terminate Claude Desktop (exit code {}){}",
        code.map(|c| c.to_string()).unwrap_or_else(|| "none".into()),
        if detail.is_empty() {
            String::new()
        } else {
            format!(": {detail}")
        }
    )))
}
