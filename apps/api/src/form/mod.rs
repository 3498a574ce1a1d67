// Form state holder: typed edits over immutable document snapshots, held by a
// single builder session.

pub mod actions;
pub mod handlers;
pub mod session;

pub use actions::{FormAction, FormError};
pub use session::{BuilderSession, ExportStatus, Tab};
