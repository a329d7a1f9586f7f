//! Student job applications. The apply path is the one place every gate
//! fires: job lifecycle, deadline, profile completeness, eligibility match,
//! and duplicate suppression.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::admin::postings::fetch_job;
use crate::auth::extractors::StudentUser;
use crate::eligibility::handlers::fetch_criteria;
use crate::eligibility::matching::check_eligibility;
use crate::errors::AppError;
use crate::models::job::{ApplicationRow, ApplicationStatus, JobStatus};
use crate::models::student::StudentProfileRow;
use crate::state::AppState;
use crate::student::education::education_for_student;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_post_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub application: ApplicationRow,
}

/// An application joined with the job it targets, for the student's own list.
#[derive(Debug, Serialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_post_id: Uuid,
    pub company: String,
    pub role: String,
    pub ctc: String,
    pub deadline: DateTime<Utc>,
    pub job_status: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// POST /api/v1/student/applyForJob
pub async fn handle_apply(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let job = fetch_job(&state.db, req.job_post_id).await?;

    if JobStatus::parse(&job.status) != Some(JobStatus::Open) {
        return Err(AppError::UnprocessableEntity(
            "Job is not open for applications".to_string(),
        ));
    }
    if job.deadline <= Utc::now() {
        return Err(AppError::UnprocessableEntity(
            "Application deadline has passed".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, StudentProfileRow>(
        "SELECT * FROM student_profiles WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        AppError::UnprocessableEntity("Complete your profile before applying".to_string())
    })?;

    if let Some(criteria) = fetch_criteria(&state.db, job.id).await? {
        let education = education_for_student(&state.db, profile.id)
            .await?
            .ok_or_else(|| {
                AppError::UnprocessableEntity(
                    "Add education details before applying".to_string(),
                )
            })?;

        let report = check_eligibility(&criteria, &education);
        if !report.eligible {
            return Err(AppError::UnprocessableEntity(format!(
                "Eligibility criteria not met: {}",
                report.unmet.join("; ")
            )));
        }
    }

    let existing = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_post_id = $1 AND student_id = $2",
    )
    .bind(job.id)
    .bind(profile.id)
    .fetch_optional(&state.db)
    .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Already applied to this job".to_string(),
        ));
    }

    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (job_post_id, student_id, status)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(job.id)
    .bind(profile.id)
    .bind(ApplicationStatus::Applied.as_str())
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Student {} applied to job {} ({} @ {})",
        profile.id,
        job.id,
        job.role,
        job.company
    );

    Ok((StatusCode::CREATED, Json(ApplyResponse { application })))
}

/// GET /api/v1/student/applications
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<ApplicationWithJob>>, AppError> {
    let profile = crate::student::profile::profile_for_user(&state.db, user.id).await?;

    let applications = sqlx::query_as::<_, ApplicationWithJob>(
        r#"
        SELECT a.id, a.job_post_id, jp.company, jp.role, jp.ctc, jp.deadline,
               jp.status AS job_status, a.status, a.applied_at
        FROM applications a
        JOIN job_posts jp ON jp.id = a.job_post_id
        WHERE a.student_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applications))
}
