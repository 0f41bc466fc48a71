use std::sync::Arc;

use crate::compiler::Compiler;
use crate::llm_client::{GenerationOptions, Generator};
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation. Production: `OllamaClient`.
    pub llm: Arc<dyn Generator>,
    /// LaTeX → PDF. Production: `RemoteCompiler`.
    pub compiler: Arc<dyn Compiler>,
    /// Memory store by default; Postgres when `DATABASE_URL` is set.
    pub profiles: Arc<dyn ProfileStore>,
    /// Sampling defaults applied to every generation call.
    pub generation: GenerationOptions,
}
