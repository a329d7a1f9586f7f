use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::FromRow;

use crate::auth::extractors::AdminUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct Statistics {
    pub total_students: i64,
    pub total_postings: i64,
    pub placed_students: i64,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub statistics: Statistics,
}

/// GET /api/v1/admin/statistics
///
/// One aggregate query; a student counts as placed once any of their
/// applications is SELECTED, however many offers they hold.
pub async fn handle_statistics(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<StatisticsResponse>, AppError> {
    let statistics = sqlx::query_as::<_, Statistics>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM student_profiles) AS total_students,
            (SELECT COUNT(*) FROM job_posts) AS total_postings,
            (SELECT COUNT(DISTINCT student_id) FROM applications WHERE status = 'SELECTED')
                AS placed_students
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(StatisticsResponse { statistics }))
}
