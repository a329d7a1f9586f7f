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
use crate::models::student::CertificationRow;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

#[derive(Debug, Deserialize)]
pub struct AddCertificateRequest {
    pub name: String,
    pub issuer: String,
    pub issued_on: Option<NaiveDate>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCertificateRequest {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub credential_url: Option<String>,
}

/// GET /api/v1/student/certificate
pub async fn handle_list(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<Vec<CertificationRow>>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let certificates = sqlx::query_as::<_, CertificationRow>(
        "SELECT * FROM certifications WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(certificates))
}

/// POST /api/v1/student/addCertificate
pub async fn handle_add(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<AddCertificateRequest>,
) -> Result<(StatusCode, Json<CertificationRow>), AppError> {
    if req.name.trim().is_empty() || req.issuer.trim().is_empty() {
        return Err(AppError::Validation(
            "name and issuer are required".to_string(),
        ));
    }

    let profile = profile_for_user(&state.db, user.id).await?;
    let certificate = sqlx::query_as::<_, CertificationRow>(
        r#"
        INSERT INTO certifications (student_id, name, issuer, issued_on, credential_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&req.name)
    .bind(&req.issuer)
    .bind(req.issued_on)
    .bind(&req.credential_url)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(certificate)))
}

/// PUT /api/v1/student/certificate/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCertificateRequest>,
) -> Result<Json<CertificationRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing =
        sqlx::query_as::<_, CertificationRow>("SELECT * FROM certifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, CertificationRow>(
        r#"
        UPDATE certifications
        SET name = COALESCE($2, name),
            issuer = COALESCE($3, issuer),
            issued_on = COALESCE($4, issued_on),
            credential_url = COALESCE($5, credential_url)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.issuer)
    .bind(req.issued_on)
    .bind(&req.credential_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/student/certificate/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let existing =
        sqlx::query_as::<_, CertificationRow>("SELECT * FROM certifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;

    if existing.student_id != profile.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM certifications WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
