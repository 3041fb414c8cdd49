//! AI endpoints: text enhancement, skill suggestions, and resume import.
//!
//! Public like the proxy they front: guests can use AI features before
//! creating an account.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::prompts::EnhanceMode;
use crate::errors::AppError;
use crate::pipeline;
use crate::state::AppState;

const MAX_ENHANCE_CHARS: usize = 8000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnhanceRequest {
    pub text: String,
    pub mode: String,
}

pub async fn enhance(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Response, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    if text.chars().count() > MAX_ENHANCE_CHARS {
        return Err(AppError::Validation(
            "text too long (max 8000 chars)".to_string(),
        ));
    }

    let mode = EnhanceMode::from_param(req.mode.trim());

    match pipeline::enhance_text(&state.ai, text, mode).await {
        Some(result) => Ok(Json(json!({ "result": result, "provider": "ai" })).into_response()),
        // All providers down: explicit unavailable payload, never a partial result
        None => Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "result": null, "provider": "none" })),
        )
            .into_response()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillSuggestionRequest {
    pub input: String,
}

pub async fn skill_suggestions(
    State(state): State<AppState>,
    Json(req): Json<SkillSuggestionRequest>,
) -> Json<Value> {
    let suggestions = pipeline::suggest_skills(&state.ai, &req.input).await;
    Json(json!({ "suggestions": suggestions }))
}

/// POST /api/ai/import-resume — multipart upload with a `file` field.
/// The extension hint comes from the uploaded filename.
pub async fn import_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("A 'file' field is required".to_string()))?;

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let imported = pipeline::import_resume(&state.ai, &bytes, &extension).await?;

    Ok(Json(json!({
        "resume": imported.document,
        "source": imported.source
    })))
}
