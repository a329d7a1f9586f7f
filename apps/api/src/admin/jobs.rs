//! Admin job views and the eligible-not-applied notification sweep.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::admin::postings::fetch_job;
use crate::auth::extractors::AdminUser;
use crate::eligibility::handlers::fetch_criteria;
use crate::eligibility::matching::check_eligibility;
use crate::errors::AppError;
use crate::models::job::{EligibilityCriteriaRow, JobPostRow};
use crate::models::student::EducationRow;
use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct JobWithCount {
    pub id: Uuid,
    pub posted_by_id: Uuid,
    pub role: String,
    pub company: String,
    pub company_info: Option<String>,
    pub description: String,
    pub ctc: String,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub application_count: i64,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub posting: JobPostRow,
    pub eligibility: Option<EligibilityCriteriaRow>,
    pub application_count: i64,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub notified: u64,
}

/// GET /api/v1/admin/jobs
pub async fn handle_list(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<JobWithCount>>, AppError> {
    let jobs = sqlx::query_as::<_, JobWithCount>(
        r#"
        SELECT jp.*, COUNT(a.id) AS application_count
        FROM job_posts jp
        LEFT JOIN applications a ON a.job_post_id = jp.id
        GROUP BY jp.id
        ORDER BY jp.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(jobs))
}

/// GET /api/v1/admin/jobs/:job_id
pub async fn handle_get(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let posting = fetch_job(&state.db, job_id).await?;
    let eligibility = fetch_criteria(&state.db, job_id).await?;

    let application_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_post_id = $1")
            .bind(job_id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(JobDetailResponse {
        posting,
        eligibility,
        application_count,
    }))
}

/// POST /api/v1/admin/jobs/:job_id/notify
///
/// Finds students who meet the job's criteria but have not applied, and
/// records one notification row each. The unique (student, job) key makes
/// repeated sweeps idempotent.
pub async fn handle_notify_eligible(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<NotifyResponse>, AppError> {
    let job = fetch_job(&state.db, job_id).await?;
    let criteria = fetch_criteria(&state.db, job_id).await?;

    // educations.student_id is the profile id, so the education rows alone
    // identify the candidates.
    let candidates = sqlx::query_as::<_, EducationRow>(
        r#"
        SELECT e.*
        FROM educations e
        WHERE e.student_id NOT IN (SELECT student_id FROM applications WHERE job_post_id = $1)
        "#,
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    let message = format!("New opening at {} for {}", job.company, job.role);
    let mut notified = 0u64;

    for education in candidates {
        let eligible = match &criteria {
            Some(c) => check_eligibility(c, &education).eligible,
            None => true,
        };
        if !eligible {
            continue;
        }

        let result = sqlx::query(
            r#"
            INSERT INTO notifications (student_id, job_post_id, message)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, job_post_id) DO NOTHING
            "#,
        )
        .bind(education.student_id)
        .bind(job_id)
        .bind(&message)
        .execute(&state.db)
        .await?;
        notified += result.rows_affected();
    }

    tracing::info!("Notified {notified} eligible student(s) about job {job_id}");

    Ok(Json(NotifyResponse { notified }))
}
