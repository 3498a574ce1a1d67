//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::errors::AppError;
use crate::export::export_resume;
use crate::export::notifier::Toast;
use crate::form::ExportStatus;
use crate::state::AppState;

/// Characters outside RFC 5987 `attr-char`, which must be percent-encoded in `filename*`.
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// POST /api/v1/export
///
/// Renders the current snapshot and returns it as a PDF attachment.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let rendered = export_resume(&state).await?;
    let disposition = attachment_disposition(&rendered.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(rendered.bytes),
    )
        .into_response())
}

/// GET /api/v1/export/status
pub async fn handle_export_status(State(state): State<AppState>) -> Json<ExportStatus> {
    Json(state.session.lock().await.export_status().clone())
}

/// GET /api/v1/toasts
///
/// Drains pending notifications.
pub async fn handle_take_toasts(State(state): State<AppState>) -> Json<Vec<Toast>> {
    Json(state.toasts.take_all().await)
}

/// `Content-Disposition` for a download: an ASCII `filename` for old clients
/// plus the exact name as UTF-8 in `filename*` (RFC 6266).
fn attachment_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, ATTR_CHAR_ENCODE_SET);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
