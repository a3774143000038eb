use std::sync::Arc;

use crate::llm::TextGenerator;

/// Immutable per-process state. Everything request-specific lives in the handler.
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

pub type SharedState = Arc<AppState>;
