//! Resume CRUD. The store is key-value: `data` is the resume document as
//! opaque JSON, scoped to the authenticated user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{ResumeMeta, ResumeRow, ResumeSummaryRow};
use crate::state::AppState;

const DEFAULT_NAME: &str = "Untitled Resume";
const DEFAULT_TEMPLATE: &str = "modern-01";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResumePayload {
    pub name: String,
    pub template_id: String,
    pub data: Option<Value>,
}

impl ResumePayload {
    fn name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_NAME
        } else {
            trimmed
        }
    }

    fn template_id(&self) -> &str {
        let trimmed = self.template_id.trim();
        if trimmed.is_empty() {
            DEFAULT_TEMPLATE
        } else {
            trimmed
        }
    }

    fn data(&self) -> Value {
        self.data.clone().unwrap_or_else(|| json!({}))
    }
}

pub async fn list_resumes(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Value>, AppError> {
    let rows: Vec<ResumeSummaryRow> = sqlx::query_as(
        "SELECT id, name, template_id, updated_at FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(caller.user_id)
    .fetch_all(&state.db)
    .await?;

    let resumes: Vec<ResumeMeta> = rows.iter().map(ResumeMeta::from).collect();
    Ok(Json(json!({ "resumes": resumes })))
}

pub async fn create_resume(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<ResumePayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let row: ResumeSummaryRow = sqlx::query_as(
        "INSERT INTO resumes (id, user_id, name, template_id, data) VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, name, template_id, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(caller.user_id)
    .bind(payload.name())
    .bind(payload.template_id())
    .bind(payload.data())
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Resume saved!",
            "resume": ResumeMeta::from(&row)
        })),
    ))
}

pub async fn get_resume(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let row: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(caller.user_id)
            .fetch_optional(&state.db)
            .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Resume not found.".to_string()))?;

    Ok(Json(json!({
        "resume": {
            "id": row.id,
            "name": row.name,
            "templateId": row.template_id,
            "data": row.data,
            "updatedAt": row.updated_at
        }
    })))
}

pub async fn update_resume(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResumePayload>,
) -> Result<Json<Value>, AppError> {
    let row: Option<ResumeSummaryRow> = sqlx::query_as(
        "UPDATE resumes SET name = $1, template_id = $2, data = $3, updated_at = NOW() \
         WHERE id = $4 AND user_id = $5 RETURNING id, name, template_id, updated_at",
    )
    .bind(payload.name())
    .bind(payload.template_id())
    .bind(payload.data())
    .bind(id)
    .bind(caller.user_id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Resume not found.".to_string()))?;

    Ok(Json(json!({
        "message": "Resume updated!",
        "resume": ResumeMeta::from(&row)
    })))
}

pub async fn delete_resume(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(caller.user_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Resume deleted." })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_defaults_apply_to_blank_fields() {
        let payload: ResumePayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.name(), "Untitled Resume");
        assert_eq!(payload.template_id(), "modern-01");
        assert_eq!(payload.data(), json!({}));

        let payload: ResumePayload =
            serde_json::from_str(r#"{"name": "  ", "template_id": "classic-02"}"#).unwrap();
        assert_eq!(payload.name(), "Untitled Resume");
        assert_eq!(payload.template_id(), "classic-02");
    }

    #[test]
    fn test_payload_keeps_caller_values() {
        let payload: ResumePayload = serde_json::from_str(
            r#"{"name": "CV 2026", "template_id": "minimal-03", "data": {"skills": ["Rust"]}}"#,
        )
        .unwrap();
        assert_eq!(payload.name(), "CV 2026");
        assert_eq!(payload.data()["skills"][0], "Rust");
    }
}
