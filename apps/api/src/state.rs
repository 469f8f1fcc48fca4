use std::sync::Arc;

use crate::metadata::AppMetadata;
use crate::model::SalaryModel;

/// Shared application state injected into all route handlers via Axum
/// extractors. Metadata and model are loaded once at startup and read-only
/// thereafter; no request path reinitializes either.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<AppMetadata>,
    /// Pluggable regression model. Production: `LinearModel` loaded from the
    /// coefficient artifact. Tests substitute stubs.
    pub model: Arc<dyn SalaryModel>,
}
