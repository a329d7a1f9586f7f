//! Job posting management: creation, edits, the combined
//! posting-plus-criteria transaction, and lifecycle transitions.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractors::AdminUser;
use crate::eligibility::handlers::{insert_criteria, CriteriaInput};
use crate::errors::AppError;
use crate::models::job::{EligibilityCriteriaRow, JobPostRow, JobStatus};
use crate::state::AppState;

pub async fn fetch_job(pool: &PgPool, id: Uuid) -> Result<JobPostRow, AppError> {
    sqlx::query_as::<_, JobPostRow>("SELECT * FROM job_posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job post {id} not found")))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostingRequest {
    pub role: String,
    pub company: String,
    pub company_info: Option<String>,
    pub description: String,
    pub ctc: String,
    pub deadline: DateTime<Utc>,
}

impl CreatePostingRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.role.trim().is_empty()
            || self.company.trim().is_empty()
            || self.description.trim().is_empty()
            || self.ctc.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Job details are incomplete".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostingRequest {
    pub id: Uuid,
    pub role: Option<String>,
    pub company: Option<String>,
    pub company_info: Option<String>,
    pub description: Option<String>,
    pub ctc: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobWithEligibilityRequest {
    pub job: CreatePostingRequest,
    pub eligibility: CriteriaInput,
}

#[derive(Debug, Serialize)]
pub struct JobWithEligibilityResponse {
    pub posting: JobPostRow,
    pub eligibility: EligibilityCriteriaRow,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub job_id: Uuid,
    pub status: String,
}

/// POST /api/v1/admin/addPostingDetails
///
/// New postings always start in DRAFT; they become visible to students only
/// through an explicit status transition.
pub async fn handle_add_posting(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(req): Json<CreatePostingRequest>,
) -> Result<(StatusCode, Json<JobPostRow>), AppError> {
    req.validate()?;

    let posting = insert_posting(&state.db, user.id, &req).await?;
    Ok((StatusCode::CREATED, Json(posting)))
}

async fn insert_posting<'e, E>(
    executor: E,
    posted_by_id: Uuid,
    req: &CreatePostingRequest,
) -> Result<JobPostRow, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, JobPostRow>(
        r#"
        INSERT INTO job_posts
            (posted_by_id, role, company, company_info, description, ctc, deadline, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(posted_by_id)
    .bind(&req.role)
    .bind(&req.company)
    .bind(&req.company_info)
    .bind(&req.description)
    .bind(&req.ctc)
    .bind(req.deadline)
    .bind(JobStatus::Draft.as_str())
    .fetch_one(executor)
    .await
}

/// PUT /api/v1/admin/editPostingDetails
pub async fn handle_edit_posting(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<UpdatePostingRequest>,
) -> Result<Json<JobPostRow>, AppError> {
    let posting = sqlx::query_as::<_, JobPostRow>(
        r#"
        UPDATE job_posts
        SET role = COALESCE($2, role),
            company = COALESCE($3, company),
            company_info = COALESCE($4, company_info),
            description = COALESCE($5, description),
            ctc = COALESCE($6, ctc),
            deadline = COALESCE($7, deadline),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(req.id)
    .bind(&req.role)
    .bind(&req.company)
    .bind(&req.company_info)
    .bind(&req.description)
    .bind(&req.ctc)
    .bind(req.deadline)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job post {} not found", req.id)))?;

    Ok(Json(posting))
}

/// POST /api/v1/admin/createJobWithEligibility
///
/// Inserts the posting and its criteria in one transaction; a failure on
/// either side rolls back both.
pub async fn handle_create_with_eligibility(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(req): Json<CreateJobWithEligibilityRequest>,
) -> Result<(StatusCode, Json<JobWithEligibilityResponse>), AppError> {
    req.job.validate()?;

    let mut tx = state.db.begin().await?;
    let posting = insert_posting(&mut *tx, user.id, &req.job).await?;
    let eligibility = insert_criteria(&mut *tx, posting.id, &req.eligibility).await?;
    tx.commit().await?;

    tracing::info!(
        "Created job {} ({} @ {}) with eligibility criteria",
        posting.id,
        posting.role,
        posting.company
    );

    Ok((
        StatusCode::CREATED,
        Json(JobWithEligibilityResponse {
            posting,
            eligibility,
        }),
    ))
}

/// PATCH /api/v1/admin/job/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<UpdateJobStatusRequest>,
) -> Result<Json<JobPostRow>, AppError> {
    let next = JobStatus::parse(&req.status).ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Unknown job status '{}'", req.status))
    })?;

    let job = fetch_job(&state.db, req.job_id).await?;
    let current = JobStatus::parse(&job.status)
        .ok_or_else(|| anyhow::anyhow!("Job {} has corrupt status '{}'", job.id, job.status))?;

    if !current.can_transition_to(next) {
        return Err(AppError::UnprocessableEntity(format!(
            "Cannot move job from {} to {}",
            current.as_str(),
            next.as_str()
        )));
    }

    let updated = sqlx::query_as::<_, JobPostRow>(
        "UPDATE job_posts SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(job.id)
    .bind(next.as_str())
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Job {} moved {} -> {}", job.id, current.as_str(), next.as_str());

    Ok(Json(updated))
}
