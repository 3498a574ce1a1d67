//! PDF export: pending guard, artificial delay, blocking render, toast, status reset.
//!
//! # Lifecycle
//! `idle → pending → complete → idle` on success (the last step after
//! `EXPORT_RESET_MS`, unless a newer export started), `pending → idle` on failure.
//! A request that arrives while an export is pending is refused with 409.

pub mod handlers;
pub mod notifier;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::export::notifier::Toast;
use crate::form::BuilderSession;
use crate::models::resume::ResumeDocument;
use crate::render::RenderedPdf;
use crate::state::AppState;

/// Runs one export end to end and returns the rendered file.
///
/// The work runs on its own task so an abandoned request still settles the
/// session status and raises its toast.
pub async fn export_resume(state: &AppState) -> Result<RenderedPdf, AppError> {
    let (generation, snapshot) = {
        let mut session = state.session.lock().await;
        session.begin_export().ok_or_else(|| {
            warn!("Export refused: another export is pending");
            AppError::Conflict("An export is already in progress".to_string())
        })?
    };
    info!(generation, "Export started");

    let task_state = state.clone();
    tokio::spawn(async move { run_export(task_state, generation, snapshot).await })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))?
}

async fn run_export(
    state: AppState,
    generation: u64,
    snapshot: ResumeDocument,
) -> Result<RenderedPdf, AppError> {
    tokio::time::sleep(state.config.export_delay).await;

    let page_config = state.page_config.clone();
    let renderer = state.renderer.clone();
    let outcome = tokio::task::spawn_blocking(move || renderer.render(&snapshot, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))
        .and_then(|rendered| rendered.map_err(AppError::from));

    match outcome {
        Ok(rendered) => {
            if let Some(dir) = &state.config.export_dir {
                if let Err(e) = save_copy(dir, &rendered).await {
                    warn!("Could not keep a copy of the export: {e:#}");
                }
            }

            state
                .session
                .lock()
                .await
                .complete_export(generation, rendered.file_name.clone());
            state
                .notifier
                .notify(Toast::export_succeeded(&rendered.file_name))
                .await;
            schedule_status_reset(state.session.clone(), generation, state.config.export_reset);

            info!(
                generation,
                file_name = %rendered.file_name,
                pages = rendered.page_count,
                bytes = rendered.bytes.len(),
                "Export finished"
            );
            Ok(rendered)
        }
        Err(err) => {
            state.session.lock().await.fail_export(generation);
            state.notifier.notify(Toast::export_failed(failure_text(&err))).await;
            warn!(generation, "Export failed: {err}");
            Err(err)
        }
    }
}

fn schedule_status_reset(
    session: Arc<Mutex<BuilderSession>>,
    generation: u64,
    after: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        session.lock().await.expire_export(generation);
    });
}

async fn save_copy(dir: &Path, rendered: &RenderedPdf) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(&rendered.file_name);
    tokio::fs::write(&path, &rendered.bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Saved export copy");
    Ok(())
}

/// The text shown to the user when an export fails.
fn failure_text(err: &AppError) -> String {
    match err {
        AppError::Render(e) => e.to_string(),
        other => other.to_string(),
    }
}
