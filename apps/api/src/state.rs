use std::sync::Arc;

use crate::enhancement::ai_manager::AiServiceManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide backend manager. Backends are discovered once; read-only afterwards.
    pub ai: Arc<AiServiceManager>,
}
