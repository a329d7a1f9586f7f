use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::job::JobStatus;
use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct OpenJobNotice {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub jobs: Vec<OpenJobNotice>,
}

/// GET /api/v1/student/notifications
///
/// Open postings, newest first. Targeted rows written by the admin notify
/// endpoint land in the same feed through the posting itself being open.
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
) -> Result<Json<NotificationsResponse>, AppError> {
    let jobs = sqlx::query_as::<_, OpenJobNotice>(
        r#"
        SELECT id, company, role, created_at, deadline
        FROM job_posts
        WHERE status = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(JobStatus::Open.as_str())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(NotificationsResponse { jobs }))
}
