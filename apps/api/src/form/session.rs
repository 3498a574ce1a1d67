//! The builder session: current document snapshot, active tab, and export status.

use serde::{Deserialize, Serialize};

use crate::form::actions::{apply_action, FormAction, FormError};
use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Personal,
        Tab::Experience,
        Tab::Education,
        Tab::Skills,
        Tab::Projects,
        Tab::Certifications,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportStatus {
    #[default]
    Idle,
    Pending,
    Complete {
        file_name: String,
    },
}

/// What the UI needs to draw its chrome.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub active_tab: Tab,
    pub tabs: [Tab; 6],
    pub export: ExportStatus,
}

#[derive(Debug, Default)]
pub struct BuilderSession {
    document: ResumeDocument,
    active_tab: Tab,
    export: ExportStatus,
    /// Bumped on every export start; stale timers compare against it.
    export_generation: u64,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn export_status(&self) -> &ExportStatus {
        &self.export
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            active_tab: self.active_tab(),
            tabs: Tab::ALL,
            export: self.export.clone(),
        }
    }

    /// Replaces the snapshot with the result of `action`. On error the snapshot is kept.
    pub fn apply(&mut self, action: FormAction) -> Result<&ResumeDocument, FormError> {
        self.document = apply_action(&self.document, action)?;
        Ok(&self.document)
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Fresh document, tab back to personal. Export state is left alone so a
    /// running export still settles normally.
    pub fn reset(&mut self) {
        self.document = ResumeDocument::new();
        self.active_tab = Tab::Personal;
    }

    /// Marks an export as pending and hands out an owned snapshot to render.
    /// Returns `None` while another export is pending.
    pub fn begin_export(&mut self) -> Option<(u64, ResumeDocument)> {
        if self.export == ExportStatus::Pending {
            return None;
        }
        self.export_generation += 1;
        self.export = ExportStatus::Pending;
        Some((self.export_generation, self.document.clone()))
    }

    pub fn complete_export(&mut self, generation: u64, file_name: String) {
        if generation == self.export_generation {
            self.export = ExportStatus::Complete { file_name };
        }
    }

    pub fn fail_export(&mut self, generation: u64) {
        if generation == self.export_generation {
            self.export = ExportStatus::Idle;
        }
    }

    /// Returns a completed export to idle unless a newer export has started.
    /// Reports whether the status changed.
    pub fn expire_export(&mut self, generation: u64) -> bool {
        let is_current = generation == self.export_generation;
        if is_current && matches!(self.export, ExportStatus::Complete { .. }) {
            self.export = ExportStatus::Idle;
            return true;
        }
        false
    }
}
