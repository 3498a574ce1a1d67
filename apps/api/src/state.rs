use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::export::notifier::{Notifier, ToastLog};
use crate::form::BuilderSession;
use crate::layout::{default_page_config, PageConfig};
use crate::render::{LopdfRenderer, PdfRenderer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single builder session. One async mutex guards document, tab, and export status.
    pub session: Arc<Mutex<BuilderSession>>,
    pub config: Config,
    /// Page geometry and type scale used for both the layout preview and PDF export.
    pub page_config: PageConfig,
    /// Produces the PDF bytes for an export. Runs on the blocking pool.
    pub renderer: Arc<dyn PdfRenderer>,
    /// Where export outcomes are announced.
    pub notifier: Arc<dyn Notifier>,
    /// The queue behind `notifier`, drained by the UI.
    pub toasts: Arc<ToastLog>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let toasts = Arc::new(ToastLog::new());
        AppState {
            session: Arc::new(Mutex::new(BuilderSession::new())),
            config,
            page_config: default_page_config(),
            renderer: Arc::new(LopdfRenderer),
            notifier: toasts.clone(),
            toasts,
        }
    }
}
