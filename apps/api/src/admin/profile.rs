use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::extractors::AdminUser;
use crate::errors::AppError;
use crate::models::user::AdminProfileRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpsertAdminProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub designation: Option<String>,
    pub phone_no: Option<String>,
}

/// GET /api/v1/admin/profile
pub async fn handle_get(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Json<AdminProfileRow>, AppError> {
    let profile =
        sqlx::query_as::<_, AdminProfileRow>("SELECT * FROM admin_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin profile not found".to_string()))?;
    Ok(Json(profile))
}

/// POST | PUT /api/v1/admin/profile
pub async fn handle_upsert(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(req): Json<UpsertAdminProfileRequest>,
) -> Result<Json<AdminProfileRow>, AppError> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "first_name and last_name are required".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, AdminProfileRow>(
        r#"
        INSERT INTO admin_profiles (user_id, first_name, last_name, designation, phone_no)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE
        SET first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            designation = EXCLUDED.designation,
            phone_no = EXCLUDED.phone_no,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.designation)
    .bind(&req.phone_no)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}
