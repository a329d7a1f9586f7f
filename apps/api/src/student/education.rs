//! Education details. One record per student; the eligibility matcher reads it.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::EducationRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

pub async fn education_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<EducationRow>, AppError> {
    Ok(
        sqlx::query_as::<_, EducationRow>("SELECT * FROM educations WHERE student_id = $1")
            .bind(student_id)
            .fetch_optional(pool)
            .await?,
    )
}

#[derive(Debug, Deserialize)]
pub struct AddEducationRequest {
    pub branch: String,
    pub degree: String,
    pub cgpa: f64,
    pub tenth_percent: f64,
    pub twelfth_percent: Option<f64>,
    pub diploma_percent: Option<f64>,
    #[serde(default)]
    pub active_backlogs: i32,
    pub passing_year: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEducationRequest {
    pub branch: Option<String>,
    pub degree: Option<String>,
    pub cgpa: Option<f64>,
    pub tenth_percent: Option<f64>,
    pub twelfth_percent: Option<f64>,
    pub diploma_percent: Option<f64>,
    pub active_backlogs: Option<i32>,
    pub passing_year: Option<i32>,
}

fn validate_percent(value: f64, field: &str) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(())
}

/// GET /api/v1/student/education
pub async fn handle_get_education(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<EducationRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let education = education_for_student(&state.db, profile.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Education details not found".to_string()))?;
    Ok(Json(education))
}

/// POST /api/v1/student/addEducation
pub async fn handle_add_education(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddEducationRequest>,
) -> Result<(StatusCode, Json<EducationRow>), AppError> {
    if req.branch.trim().is_empty() || req.degree.trim().is_empty() {
        return Err(AppError::Validation(
            "branch and degree are required".to_string(),
        ));
    }
    if !(0.0..=10.0).contains(&req.cgpa) {
        return Err(AppError::Validation(
            "cgpa must be between 0 and 10".to_string(),
        ));
    }
    validate_percent(req.tenth_percent, "tenth_percent")?;
    if let Some(p) = req.twelfth_percent {
        validate_percent(p, "twelfth_percent")?;
    }
    if let Some(p) = req.diploma_percent {
        validate_percent(p, "diploma_percent")?;
    }

    let profile = profile_for_user(&state.db, user.id).await?;

    if education_for_student(&state.db, profile.id).await?.is_some() {
        return Err(AppError::Conflict(
            "Education details already exist".to_string(),
        ));
    }

    let education = sqlx::query_as::<_, EducationRow>(
        r#"
        INSERT INTO educations
            (student_id, branch, degree, cgpa, tenth_percent, twelfth_percent,
             diploma_percent, active_backlogs, passing_year)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.branch)
    .bind(&req.degree)
    .bind(req.cgpa)
    .bind(req.tenth_percent)
    .bind(req.twelfth_percent)
    .bind(req.diploma_percent)
    .bind(req.active_backlogs)
    .bind(req.passing_year)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(education)))
}

/// PUT /api/v1/student/editEducation
pub async fn handle_edit_education(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<UpdateEducationRequest>,
) -> Result<Json<EducationRow>, AppError> {
    if let Some(cgpa) = req.cgpa {
        if !(0.0..=10.0).contains(&cgpa) {
            return Err(AppError::Validation(
                "cgpa must be between 0 and 10".to_string(),
            ));
        }
    }

    let profile = profile_for_user(&state.db, user.id).await?;

    let education = sqlx::query_as::<_, EducationRow>(
        r#"
        UPDATE educations
        SET branch = COALESCE($2, branch),
            degree = COALESCE($3, degree),
            cgpa = COALESCE($4, cgpa),
            tenth_percent = COALESCE($5, tenth_percent),
            twelfth_percent = COALESCE($6, twelfth_percent),
            diploma_percent = COALESCE($7, diploma_percent),
            active_backlogs = COALESCE($8, active_backlogs),
            passing_year = COALESCE($9, passing_year),
            updated_at = now()
        WHERE student_id = $1
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.branch)
    .bind(&req.degree)
    .bind(req.cgpa)
    .bind(req.tenth_percent)
    .bind(req.twelfth_percent)
    .bind(req.diploma_percent)
    .bind(req.active_backlogs)
    .bind(req.passing_year)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Education details not found".to_string()))?;

    Ok(Json(education))
}

/// DELETE /api/v1/student/education
pub async fn handle_delete_education(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;

    let result = sqlx::query("DELETE FROM educations WHERE student_id = $1")
        .bind(profile.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Education details not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds() {
        assert!(validate_percent(0.0, "x").is_ok());
        assert!(validate_percent(100.0, "x").is_ok());
        assert!(validate_percent(-0.1, "x").is_err());
        assert!(validate_percent(100.5, "x").is_err());
    }
}
