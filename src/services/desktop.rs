use crate::error::AppError;
use crate::process::TerminateOutcome;
use crate::store::ConfigStore;

pub struct DesktopService;

impl DesktopService {
    /// Kill Claude Desktop (if running), wait for the OS to release it, then
    /// launch it again detached. Steps run strictly in order.
    pub async fn restart(store: &ConfigStore) -> Result<(), AppError> {
        let platform = store.platform();
        if !platform.supports_restart() {
            return Err(AppError::UnsupportedPlatform(platform.to_string()));
        }

        // checked up front so the app is never killed without a relaunch target
        let executable = store.executable().ok_or_else(|| {
            AppError::ExecutableNotFound(
                store
                    .paths()
                    .executable_candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            )
        })?;

        // taskkill/pkill wait for exit; keep them off the async workers
        let process = store.process().clone();
        let outcome = tokio::task::spawn_blocking(move || {
            process.terminate(platform, platform.process_image_name())
        })
        .await
        .map_err(|e| AppError::ProcessControl(format!("terminate task failed: {e}")))??;
        match outcome {
            TerminateOutcome::Terminated => log::info!("Claude Desktop terminated"),
            TerminateOutcome::NotRunning => log::info!("Claude Desktop was not running"),
        }

        tokio::time::sleep(store.restart_delay()).await;

        store.process().launch_detached(platform, executable)?;
        log::info!("Claude Desktop launched from {}", executable.display());
        Ok(())
    }
}
