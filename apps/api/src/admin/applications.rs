//! Admin views over applications: per-job listing and bulk status updates.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::admin::postings::fetch_job;
use crate::auth::extractors::AdminUser;
use crate::errors::AppError;
use crate::models::job::ApplicationStatus;
use crate::state::AppState;

/// An application joined with the applicant's identity and academic record.
#[derive(Debug, Serialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub personal_email: Option<String>,
    pub phone_no: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub passing_year: Option<i32>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    pub application_ids: Vec<Uuid>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct BulkStatusResponse {
    pub updated: u64,
}

pub async fn applicants_for_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<ApplicantRow>, AppError> {
    Ok(sqlx::query_as::<_, ApplicantRow>(
        r#"
        SELECT a.id, a.student_id, sp.first_name, sp.last_name, sp.personal_email,
               sp.phone_no, e.branch, e.cgpa, e.passing_year, a.status, a.applied_at
        FROM applications a
        JOIN student_profiles sp ON sp.id = a.student_id
        LEFT JOIN educations e ON e.student_id = sp.id
        WHERE a.job_post_id = $1
        ORDER BY a.applied_at ASC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

/// GET /api/v1/admin/jobs/:job_id/applications
pub async fn handle_list_for_job(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    fetch_job(&state.db, job_id).await?;
    let applicants = applicants_for_job(&state.db, job_id).await?;
    Ok(Json(applicants))
}

/// PATCH /api/v1/admin/applications/status
pub async fn handle_bulk_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<BulkStatusRequest>,
) -> Result<Json<BulkStatusResponse>, AppError> {
    if req.application_ids.is_empty() {
        return Err(AppError::Validation(
            "application_ids must not be empty".to_string(),
        ));
    }
    let status = ApplicationStatus::parse(&req.status).ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Unknown application status '{}'", req.status))
    })?;

    let result = sqlx::query(
        "UPDATE applications SET status = $1, updated_at = now() WHERE id = ANY($2)",
    )
    .bind(status.as_str())
    .bind(&req.application_ids)
    .execute(&state.db)
    .await?;

    tracing::info!(
        "Bulk-updated {} application(s) to {}",
        result.rows_affected(),
        status.as_str()
    );

    Ok(Json(BulkStatusResponse {
        updated: result.rows_affected(),
    }))
}
