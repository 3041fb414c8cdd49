pub mod ai;
pub mod auth;
pub mod health;
pub mod resumes;
pub mod universities;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Resume store (auth-scoped)
        .route(
            "/api/resumes",
            get(resumes::list_resumes).post(resumes::create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::get_resume)
                .put(resumes::update_resume)
                .delete(resumes::delete_resume),
        )
        // AI surface (public, like the enhance proxy it fronts)
        .route("/api/ai/enhance", post(ai::enhance))
        .route("/api/ai/skill-suggestions", post(ai::skill_suggestions))
        .route("/api/ai/import-resume", post(ai::import_resume))
        // Lookup proxy
        .route("/api/universities", get(universities::search))
        .with_state(state)
}
