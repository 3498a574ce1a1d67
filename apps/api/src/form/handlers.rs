//! Axum route handlers for the form state: document edits, tabs, and reset.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::form::session::SessionView;
use crate::form::{FormAction, Tab};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: Tab,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    let session = state.session.lock().await;
    Json(session.document().clone())
}

/// POST /api/v1/resume/actions
///
/// Applies one form action and returns the new snapshot.
pub async fn handle_apply_action(
    State(state): State<AppState>,
    Json(action): Json<FormAction>,
) -> Result<Json<ResumeDocument>, AppError> {
    debug!(?action, "Applying form action");
    let mut session = state.session.lock().await;
    let document = session.apply(action)?;
    Ok(Json(document.clone()))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<ResumeDocument> {
    let mut session = state.session.lock().await;
    session.reset();
    info!("Builder session reset");
    Json(session.document().clone())
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.lock().await.view())
}

/// PUT /api/v1/session/tab
pub async fn handle_set_tab(
    State(state): State<AppState>,
    Json(request): Json<TabRequest>,
) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.set_active_tab(request.tab);
    Json(session.view())
}
