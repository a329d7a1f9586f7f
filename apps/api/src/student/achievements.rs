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
use crate::models::student::AchievementRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

#[derive(Debug, Deserialize)]
pub struct AddAchievementRequest {
    pub title: String,
    pub description: Option<String>,
    pub awarded_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAchievementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub awarded_on: Option<NaiveDate>,
}

/// GET /api/v1/student/achievement
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<AchievementRow>>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let achievements = sqlx::query_as::<_, AchievementRow>(
        "SELECT * FROM achievements WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(achievements))
}

/// POST /api/v1/student/addAchievement
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddAchievementRequest>,
) -> Result<(StatusCode, Json<AchievementRow>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let achievement = sqlx::query_as::<_, AchievementRow>(
        r#"
        INSERT INTO achievements (student_id, title, description, awarded_on)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.awarded_on)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(achievement)))
}

/// PUT /api/v1/student/editAchievement/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAchievementRequest>,
) -> Result<Json<AchievementRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, AchievementRow>("SELECT * FROM achievements WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, AchievementRow>(
        r#"
        UPDATE achievements
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            awarded_on = COALESCE($4, awarded_on)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.awarded_on)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/achievement/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, AchievementRow>("SELECT * FROM achievements WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM achievements WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
