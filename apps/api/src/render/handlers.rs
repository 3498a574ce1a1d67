//! Axum route handlers for the live preview.

use axum::{extract::State, response::Html, Json};

use crate::render::{layout_document, preview_document, LaidOutDocument};
use crate::state::AppState;

/// GET /api/v1/preview
///
/// The current snapshot as a standalone HTML page.
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.session.lock().await.document().clone();
    Html(preview_document(&snapshot))
}

/// GET /api/v1/preview/layout
///
/// The paginated layout the PDF export would produce, as JSON.
pub async fn handle_preview_layout(State(state): State<AppState>) -> Json<LaidOutDocument> {
    let snapshot = state.session.lock().await.document().clone();
    Json(layout_document(&snapshot, &state.page_config))
}
