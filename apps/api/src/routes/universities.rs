use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UniversityQuery {
    pub q: String,
}

/// GET /api/universities?q= — autocomplete proxy; always 200, failures
/// degrade to an empty list.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<UniversityQuery>,
) -> Json<Value> {
    let universities = state.universities.search(&params.q).await;
    Json(json!({ "universities": universities }))
}
