//! Transient user notifications ("toasts") raised by exports.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Oldest toasts are dropped once this many are waiting.
const MAX_PENDING_TOASTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    pub fn export_succeeded(file_name: &str) -> Self {
        Toast::new(
            ToastKind::Success,
            "Resume Downloaded",
            format!("Your resume has been saved as {file_name}"),
        )
    }

    pub fn export_failed(error_text: impl Into<String>) -> Self {
        Toast::new(ToastKind::Error, "Download Failed", error_text)
    }
}

/// Delivery seam for toasts. The HTTP server queues them for the UI to poll.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, toast: Toast);
}

/// In-memory queue drained by `GET /api/v1/toasts`.
#[derive(Debug, Default)]
pub struct ToastLog {
    pending: Mutex<VecDeque<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every waiting toast, oldest first.
    pub async fn take_all(&self) -> Vec<Toast> {
        self.pending.lock().await.drain(..).collect()
    }
}

#[async_trait]
impl Notifier for ToastLog {
    async fn notify(&self, toast: Toast) {
        let mut pending = self.pending.lock().await;
        if pending.len() == MAX_PENDING_TOASTS {
            pending.pop_front();
        }
        pending.push_back(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_texts() {
        let ok = Toast::export_succeeded("Doe_Resume.pdf");
        assert_eq!(ok.title, "Resume Downloaded");
        assert_eq!(ok.description, "Your resume has been saved as Doe_Resume.pdf");
        assert_eq!(ok.kind, ToastKind::Success);

        let failed = Toast::export_failed("Failed to write PDF: disk full");
        assert_eq!(failed.title, "Download Failed");
        assert_eq!(failed.kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_take_all_drains_in_order() {
        let log = ToastLog::new();
        log.notify(Toast::export_failed("first")).await;
        log.notify(Toast::export_failed("second")).await;

        let drained = log.take_all().await;
        let descriptions: Vec<_> = drained.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second"]);
        assert!(log.take_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_queue_is_bounded() {
        let log = ToastLog::new();
        for i in 0..(MAX_PENDING_TOASTS + 3) {
            log.notify(Toast::export_failed(i.to_string())).await;
        }
        let drained = log.take_all().await;
        assert_eq!(drained.len(), MAX_PENDING_TOASTS);
        assert_eq!(drained[0].description, "3");
    }
}
