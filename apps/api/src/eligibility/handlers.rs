//! Axum route handlers for eligibility criteria, admin and student facing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::postings::fetch_job;
use crate::auth::extractors::{AdminUser, StudentUser};
use crate::eligibility::matching::{check_eligibility, EligibilityReport};
use crate::errors::AppError;
use crate::models::job::EligibilityCriteriaRow;
use crate::state::AppState;
use crate::student::education::education_for_student;
use crate::student::profile::profile_for_user;

/// Criteria fields as accepted from admins. All optional; an omitted field
/// places no restriction (or, on edit, leaves the stored value unchanged).
#[derive(Debug, Clone, Deserialize)]
pub struct CriteriaInput {
    pub min_cgpa: Option<f64>,
    pub min_tenth: Option<f64>,
    pub min_twelfth: Option<f64>,
    pub min_diploma: Option<f64>,
    pub max_backlogs: Option<i32>,
    pub allowed_branches: Option<Vec<String>>,
    pub passing_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AddCriteriaRequest {
    pub job_post_id: Uuid,
    #[serde(flatten)]
    pub criteria: CriteriaInput,
}

#[derive(Debug, Serialize)]
pub struct StudentCriteriaResponse {
    pub criteria: Option<EligibilityCriteriaRow>,
    #[serde(flatten)]
    pub report: EligibilityReport,
}

pub async fn fetch_criteria(
    pool: &sqlx::PgPool,
    job_post_id: Uuid,
) -> Result<Option<EligibilityCriteriaRow>, AppError> {
    Ok(sqlx::query_as::<_, EligibilityCriteriaRow>(
        "SELECT * FROM eligibility_criteria WHERE job_post_id = $1",
    )
    .bind(job_post_id)
    .fetch_optional(pool)
    .await?)
}

/// Inserts a criteria row. Generic over the executor so the combined
/// create-job-with-eligibility transaction can reuse it.
pub async fn insert_criteria<'e, E>(
    executor: E,
    job_post_id: Uuid,
    input: &CriteriaInput,
) -> Result<EligibilityCriteriaRow, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, EligibilityCriteriaRow>(
        r#"
        INSERT INTO eligibility_criteria
            (job_post_id, min_cgpa, min_tenth, min_twelfth, min_diploma,
             max_backlogs, allowed_branches, passing_year)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(job_post_id)
    .bind(input.min_cgpa)
    .bind(input.min_tenth)
    .bind(input.min_twelfth)
    .bind(input.min_diploma)
    .bind(input.max_backlogs)
    .bind(input.allowed_branches.clone().unwrap_or_default())
    .bind(input.passing_year)
    .fetch_one(executor)
    .await
}

/// POST /api/v1/admin/addEligibilityCriteria
pub async fn handle_add_criteria(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<AddCriteriaRequest>,
) -> Result<(StatusCode, Json<EligibilityCriteriaRow>), AppError> {
    fetch_job(&state.db, req.job_post_id).await?;

    if fetch_criteria(&state.db, req.job_post_id).await?.is_some() {
        return Err(AppError::Conflict(
            "Eligibility criteria already exist for this job post".to_string(),
        ));
    }

    let criteria = insert_criteria(&state.db, req.job_post_id, &req.criteria).await?;
    Ok((StatusCode::CREATED, Json(criteria)))
}

/// PUT /api/v1/admin/editEligibilityCriteria
pub async fn handle_edit_criteria(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<AddCriteriaRequest>,
) -> Result<Json<EligibilityCriteriaRow>, AppError> {
    let input = &req.criteria;
    let updated = sqlx::query_as::<_, EligibilityCriteriaRow>(
        r#"
        UPDATE eligibility_criteria
        SET min_cgpa = COALESCE($2, min_cgpa),
            min_tenth = COALESCE($3, min_tenth),
            min_twelfth = COALESCE($4, min_twelfth),
            min_diploma = COALESCE($5, min_diploma),
            max_backlogs = COALESCE($6, max_backlogs),
            allowed_branches = COALESCE($7, allowed_branches),
            passing_year = COALESCE($8, passing_year),
            updated_at = now()
        WHERE job_post_id = $1
        RETURNING *
        "#,
    )
    .bind(req.job_post_id)
    .bind(input.min_cgpa)
    .bind(input.min_tenth)
    .bind(input.min_twelfth)
    .bind(input.min_diploma)
    .bind(input.max_backlogs)
    .bind(input.allowed_branches.clone())
    .bind(input.passing_year)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "No eligibility criteria for job post {}",
            req.job_post_id
        ))
    })?;

    Ok(Json(updated))
}

/// GET /api/v1/admin/getEligibilityCriteria/:job_post_id
pub async fn handle_get_criteria(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(job_post_id): Path<Uuid>,
) -> Result<Json<EligibilityCriteriaRow>, AppError> {
    let criteria = fetch_criteria(&state.db, job_post_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("No eligibility criteria for job post {job_post_id}"))
    })?;
    Ok(Json(criteria))
}

/// GET /api/v1/student/getEligibilityCriteria/:job_post_id
///
/// Returns the criteria plus whether the calling student currently meets
/// them. A job without a criteria row restricts nobody.
pub async fn handle_student_criteria(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(job_post_id): Path<Uuid>,
) -> Result<Json<StudentCriteriaResponse>, AppError> {
    fetch_job(&state.db, job_post_id).await?;

    let Some(criteria) = fetch_criteria(&state.db, job_post_id).await? else {
        return Ok(Json(StudentCriteriaResponse {
            criteria: None,
            report: EligibilityReport::eligible(),
        }));
    };

    let profile = profile_for_user(&state.db, user.id).await?;
    let report = match education_for_student(&state.db, profile.id).await? {
        Some(education) => check_eligibility(&criteria, &education),
        None => EligibilityReport {
            eligible: false,
            unmet: vec!["No education record on file".to_string()],
        },
    };

    Ok(Json(StudentCriteriaResponse {
        criteria: Some(criteria),
        report,
    }))
}
