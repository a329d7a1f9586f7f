//! Interview experiences shared between students. Any student can read;
//! only the author can edit or delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::InterviewExperienceRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

const DIFFICULTIES: &[&str] = &["EASY", "MEDIUM", "HARD"];

#[derive(Debug, Deserialize)]
pub struct AddExperienceRequest {
    pub title: String,
    pub company: String,
    pub role: String,
    pub difficulty: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub difficulty: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ExperienceWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub company: String,
    pub role: String,
    pub difficulty: String,
    pub content: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_difficulty(difficulty: &str) -> Result<(), AppError> {
    if !DIFFICULTIES.contains(&difficulty) {
        return Err(AppError::Validation(format!(
            "difficulty must be one of {}",
            DIFFICULTIES.join(", ")
        )));
    }
    Ok(())
}

/// GET /api/v1/student/experiences
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
) -> Result<Json<Vec<ExperienceWithAuthor>>, AppError> {
    let experiences = sqlx::query_as::<_, ExperienceWithAuthor>(
        r#"
        SELECT ie.id, ie.author_id, ie.title, ie.company, ie.role, ie.difficulty,
               ie.content, sp.first_name, sp.last_name, ie.created_at, ie.updated_at
        FROM interview_experiences ie
        JOIN student_profiles sp ON sp.id = ie.author_id
        ORDER BY ie.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(experiences))
}

/// GET /api/v1/student/experiences/:id
pub async fn handle_get(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExperienceWithAuthor>, AppError> {
    let experience = sqlx::query_as::<_, ExperienceWithAuthor>(
        r#"
        SELECT ie.id, ie.author_id, ie.title, ie.company, ie.role, ie.difficulty,
               ie.content, sp.first_name, sp.last_name, ie.created_at, ie.updated_at
        FROM interview_experiences ie
        JOIN student_profiles sp ON sp.id = ie.author_id
        WHERE ie.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
    Ok(Json(experience))
}

/// POST /api/v1/student/addExperience
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddExperienceRequest>,
) -> Result<(StatusCode, Json<InterviewExperienceRow>), AppError> {
    if req.title.trim().is_empty()
        || req.company.trim().is_empty()
        || req.role.trim().is_empty()
        || req.content.trim().is_empty()
    {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }
    validate_difficulty(&req.difficulty)?;

    let profile = profile_for_user(&state.db, user.id).await?;
    let experience = sqlx::query_as::<_, InterviewExperienceRow>(
        r#"
        INSERT INTO interview_experiences (author_id, title, company, role, difficulty, content)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.role)
    .bind(&req.difficulty)
    .bind(&req.content)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(experience)))
}

/// PUT /api/v1/student/experiences/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateExperienceRequest>,
) -> Result<Json<InterviewExperienceRow>, AppError> {
    if let Some(difficulty) = &req.difficulty {
        validate_difficulty(difficulty)?;
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, InterviewExperienceRow>(
        "SELECT * FROM interview_experiences WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;

    if existing.author_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, InterviewExperienceRow>(
        r#"
        UPDATE interview_experiences
        SET title = COALESCE($2, title),
            company = COALESCE($3, company),
            role = COALESCE($4, role),
            difficulty = COALESCE($5, difficulty),
            content = COALESCE($6, content),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.role)
    .bind(&req.difficulty)
    .bind(&req.content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/experiences/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing = sqlx::query_as::<_, InterviewExperienceRow>(
        "SELECT * FROM interview_experiences WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;

    if existing.author_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM interview_experiences WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_difficulties_accepted() {
        for d in ["EASY", "MEDIUM", "HARD"] {
            assert!(validate_difficulty(d).is_ok());
        }
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(validate_difficulty("BRUTAL").is_err());
        assert!(validate_difficulty("easy").is_err());
    }
}
