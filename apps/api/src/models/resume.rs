use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Stored resume row. `data` is the resume document as opaque JSON —
/// the store has no awareness of its internal shape.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub template_id: String,
    pub data: Value,
    pub updated_at: DateTime<Utc>,
}

/// Listing row — everything except the (potentially large) document body.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub template_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Resume metadata as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMeta {
    pub id: Uuid,
    pub name: String,
    pub template_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeSummaryRow> for ResumeMeta {
    fn from(row: &ResumeSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            template_id: row.template_id.clone(),
            updated_at: row.updated_at,
        }
    }
}

impl From<&ResumeRow> for ResumeMeta {
    fn from(row: &ResumeRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            template_id: row.template_id.clone(),
            updated_at: row.updated_at,
        }
    }
}
