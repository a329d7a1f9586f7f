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
use crate::models::student::ProjectRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

#[derive(Debug, Deserialize)]
pub struct AddProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub url: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub url: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

/// GET /api/v1/student/project
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let projects = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(projects))
}

/// POST /api/v1/student/addProject
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddProjectRequest>,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    if req.title.trim().is_empty() || req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description are required".to_string(),
        ));
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let project = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (student_id, title, description, tech_stack, url, date_start, date_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.tech_stack)
    .bind(&req.url)
    .bind(req.date_start)
    .bind(req.date_end)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/student/editProject/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            tech_stack = COALESCE($4, tech_stack),
            url = COALESCE($5, url),
            date_start = COALESCE($6, date_start),
            date_end = COALESCE($7, date_end),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.tech_stack)
    .bind(&req.url)
    .bind(req.date_start)
    .bind(req.date_end)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/project/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
