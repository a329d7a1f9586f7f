use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::SocialRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

#[derive(Debug, Deserialize)]
pub struct AddSocialRequest {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSocialRequest {
    pub platform: Option<String>,
    pub url: Option<String>,
}

/// GET /api/v1/student/social
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<SocialRow>>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let socials = sqlx::query_as::<_, SocialRow>(
        "SELECT * FROM socials WHERE student_id = $1 ORDER BY created_at ASC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(socials))
}

/// POST /api/v1/student/addSocial
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddSocialRequest>,
) -> Result<(StatusCode, Json<SocialRow>), AppError> {
    if req.platform.trim().is_empty() || req.url.trim().is_empty() {
        return Err(AppError::Validation(
            "platform and url are required".to_string(),
        ));
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let social = sqlx::query_as::<_, SocialRow>(
        "INSERT INTO socials (student_id, platform, url) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(profile.id)
    .bind(&req.platform)
    .bind(&req.url)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(social)))
}

/// PUT /api/v1/student/social/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSocialRequest>,
) -> Result<Json<SocialRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, SocialRow>("SELECT * FROM socials WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Social link {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, SocialRow>(
        r#"
        UPDATE socials
        SET platform = COALESCE($2, platform),
            url = COALESCE($3, url)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.platform)
    .bind(&req.url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/social/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, SocialRow>("SELECT * FROM socials WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Social link {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM socials WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
