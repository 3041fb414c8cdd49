use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::ProviderChain;
use crate::config::Config;
use crate::universities::UniversityClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Ordered AI fallback chain, built once from the startup config.
    pub ai: Arc<ProviderChain>,
    pub universities: UniversityClient,
    pub config: Config,
}
