//! Account rows keyed by the identity provider's subject. Tokens are minted
//! externally; this module only mirrors the subject into `users`.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::extractors::{AuthClaims, CurrentUser};
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct SyncRequest {
    /// Fallback for tokens without an email claim.
    pub email: Option<String>,
}

/// POST /api/v1/user/sync
///
/// Upserts the account row for the verified subject. New accounts default to
/// STUDENT; role escalation happens out of band, never through this endpoint.
pub async fn handle_sync(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(req): Json<SyncRequest>,
) -> Result<Json<UserRow>, AppError> {
    let email = claims
        .email
        .or(req.email)
        .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (auth0_id, email, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (auth0_id) DO UPDATE SET email = EXCLUDED.email
        RETURNING *
        "#,
    )
    .bind(&claims.sub)
    .bind(&email)
    .bind(Role::Student.as_str())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user))
}

/// GET /api/v1/user/me (also mounted at GET /profile)
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<UserRow> {
    Json(user)
}
