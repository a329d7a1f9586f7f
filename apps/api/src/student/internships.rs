use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::InternshipRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

#[derive(Debug, Deserialize)]
pub struct AddInternshipRequest {
    pub company: String,
    pub role: String,
    pub stipend: Option<String>,
    pub date_start: NaiveDate,
    pub date_end: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInternshipRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub stipend: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub description: Option<String>,
}

/// GET /api/v1/student/internship
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<InternshipRow>>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let internships = sqlx::query_as::<_, InternshipRow>(
        "SELECT * FROM internships WHERE student_id = $1 ORDER BY date_start DESC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(internships))
}

/// POST /api/v1/student/addInternship
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddInternshipRequest>,
) -> Result<(StatusCode, Json<InternshipRow>), AppError> {
    if req.company.trim().is_empty() || req.role.trim().is_empty() {
        return Err(AppError::Validation(
            "company and role are required".to_string(),
        ));
    }
    if let Some(end) = req.date_end {
        if end < req.date_start {
            return Err(AppError::Validation(
                "date_end cannot be before date_start".to_string(),
            ));
        }
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let internship = sqlx::query_as::<_, InternshipRow>(
        r#"
        INSERT INTO internships (student_id, company, role, stipend, date_start, date_end, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.company)
    .bind(&req.role)
    .bind(&req.stipend)
    .bind(req.date_start)
    .bind(req.date_end)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(internship)))
}

/// PUT /api/v1/student/internship/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInternshipRequest>,
) -> Result<Json<InternshipRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, InternshipRow>("SELECT * FROM internships WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, InternshipRow>(
        r#"
        UPDATE internships
        SET company = COALESCE($2, company),
            role = COALESCE($3, role),
            stipend = COALESCE($4, stipend),
            date_start = COALESCE($5, date_start),
            date_end = COALESCE($6, date_end),
            description = COALESCE($7, description),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.company)
    .bind(&req.role)
    .bind(&req.stipend)
    .bind(req.date_start)
    .bind(req.date_end)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/internship/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, InternshipRow>("SELECT * FROM internships WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM internships WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
