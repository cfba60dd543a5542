use std::sync::Arc;

use crate::analytics::source::RecordSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loader for a user's application records. Default: `PgRecordSource`.
    pub records: Arc<dyn RecordSource>,
}
