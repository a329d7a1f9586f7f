//! Resume storage. PDFs live in S3 under `resumes/{student_id}.pdf`; the
//! profile row records the object key.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde_json::json;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::student::profile::profile_for_user;

const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/v1/student/uploadResume
///
/// Multipart upload; the PDF is expected in a `file` field.
pub async fn handle_upload(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;

    let mut data: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
            );
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(
            "Resume exceeds the 5 MB limit".to_string(),
        ));
    }
    // PDF magic bytes; content-type headers from browsers are unreliable.
    if !data.starts_with(b"%PDF") {
        return Err(AppError::Validation("Resume must be a PDF".to_string()));
    }

    let key = format!("resumes/{}.pdf", profile.id);
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(data.to_vec()))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    sqlx::query("UPDATE student_profiles SET resume_s3_key = $2, updated_at = now() WHERE id = $1")
        .bind(profile.id)
        .bind(&key)
        .execute(&state.db)
        .await?;

    tracing::info!("Stored resume for student {} at s3://{}/{}", profile.id, state.config.s3_bucket, key);

    Ok((StatusCode::CREATED, Json(json!({ "key": key }))))
}

/// GET /api/v1/student/download-resume
pub async fn handle_download(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let key = profile
        .resume_s3_key
        .ok_or_else(|| AppError::NotFound("No resume uploaded".to_string()))?;

    let object = state
        .s3
        .get_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume fetch failed: {e}")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("Resume stream failed: {e}")))?
        .into_bytes();

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"".to_string(),
            ),
        ],
        data,
    ))
}
