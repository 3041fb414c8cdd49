//! Account registration, login, and the current-user endpoint.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{self, AuthUser};
use crate::errors::AppError;
use crate::models::user::{PublicUser, UserRow};
use crate::state::AppState;

const MIN_FULL_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap());

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let full_name = req.full_name.trim().to_string();
    let email = req.email.trim().to_lowercase();
    let password = req.password.trim().to_string();

    let mut errors = HashMap::new();
    if full_name.chars().count() < MIN_FULL_NAME_CHARS {
        errors.insert(
            "full_name".to_string(),
            "Full name must be at least 2 characters.".to_string(),
        );
    }
    if !EMAIL_RE.is_match(&email) {
        errors.insert(
            "email".to_string(),
            "Please enter a valid email address.".to_string(),
        );
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.insert(
            "password".to_string(),
            "Password must be at least 8 characters.".to_string(),
        );
    }
    if !errors.is_empty() {
        return Err(AppError::FieldErrors(
            StatusCode::UNPROCESSABLE_ENTITY,
            errors,
        ));
    }

    let password_hash = auth::hash_password(&password)?;

    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (id, full_name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&full_name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        // Per-field payload so the signup form can highlight the email input
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::FieldErrors(
            StatusCode::CONFLICT,
            HashMap::from([(
                "email".to_string(),
                "An account with this email already exists.".to_string(),
            )]),
        ),
        _ => AppError::Database(e),
    })?;

    let token = auth::issue_token(user.id, &user.email, &state.config.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created!",
            "token": token,
            "user": PublicUser::from(&user)
        })),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let email = req.email.trim().to_lowercase();
    let password = req.password.trim().to_string();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    }

    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Same response for unknown email and wrong password
    let user = user
        .filter(|u| auth::verify_password(&password, &u.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".to_string()))?;

    let token = auth::issue_token(user.id, &user.email, &state.config.jwt_secret)?;

    Ok(Json(json!({
        "message": "Signed in!",
        "token": token,
        "user": PublicUser::from(&user)
    })))
}

pub async fn me(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Value>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(caller.user_id)
        .fetch_optional(&state.db)
        .await?;

    let user = user.ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(Json(json!({ "user": PublicUser::from(&user) })))
}
