//! Posting views for any authenticated user. Students only ever see OPEN
//! posts here; drafts stay admin-side.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::admin::postings::fetch_job;
use crate::auth::extractors::CurrentUser;
use crate::eligibility::handlers::fetch_criteria;
use crate::errors::AppError;
use crate::models::job::{EligibilityCriteriaRow, JobPostRow, JobStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PostingDetailResponse {
    pub posting: JobPostRow,
    pub eligibility: Option<EligibilityCriteriaRow>,
}

/// GET /api/v1/postings
pub async fn handle_list_open(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Result<Json<Vec<JobPostRow>>, AppError> {
    let postings = sqlx::query_as::<_, JobPostRow>(
        "SELECT * FROM job_posts WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(JobStatus::Open.as_str())
    .fetch_all(&state.db)
    .await?;
    Ok(Json(postings))
}

/// GET /api/v1/postings/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PostingDetailResponse>, AppError> {
    let posting = fetch_job(&state.db, id).await?;

    // Drafts are invisible to students even by direct id.
    if !user.is_admin() && JobStatus::parse(&posting.status) == Some(JobStatus::Draft) {
        return Err(AppError::NotFound(format!("Job post {id} not found")));
    }

    let eligibility = fetch_criteria(&state.db, id).await?;
    Ok(Json(PostingDetailResponse {
        posting,
        eligibility,
    }))
}
