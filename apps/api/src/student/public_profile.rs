//! Public profile search and viewing. Responses here are visible to every
//! student, so the sensitive contact fields never leave this module.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::{
    AchievementRow, CertificationRow, EducationRow, InternshipRow, ProjectRow, SocialRow,
    StudentProfileRow,
};
use crate::state::AppState;
use crate::student::profile::load_profile_sections;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct SearchResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub branch: Option<String>,
    pub passing_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub students: Vec<SearchResult>,
}

/// Public view of a student profile. Deliberately omits personal email,
/// phone number, and date of birth.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub skills: Vec<String>,
    pub education: Option<EducationRow>,
    pub achievements: Vec<AchievementRow>,
    pub projects: Vec<ProjectRow>,
    pub internships: Vec<InternshipRow>,
    pub certifications: Vec<CertificationRow>,
    pub socials: Vec<SocialRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SuggestedProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub branch: String,
}

#[derive(FromRow)]
struct SuggestedRow {
    id: Uuid,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    branch: Option<String>,
}

/// GET /api/v1/student/search?query=
///
/// An empty or missing query is not an error; it returns an empty list.
pub async fn handle_search(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = match params.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Ok(Json(SearchResponse { students: vec![] })),
    };

    let pattern = format!("%{query}%");
    let students = sqlx::query_as::<_, SearchResult>(
        r#"
        SELECT sp.id, sp.user_id, sp.first_name, sp.last_name, e.branch, e.passing_year
        FROM student_profiles sp
        LEFT JOIN educations e ON e.student_id = sp.id
        WHERE sp.first_name ILIKE $1 OR sp.last_name ILIKE $1 OR e.branch ILIKE $1
        ORDER BY sp.first_name, sp.last_name
        LIMIT 10
        "#,
    )
    .bind(&pattern)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SearchResponse { students }))
}

/// GET /api/v1/student/publicProfile/:user_id
pub async fn handle_public_profile(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicProfile>, AppError> {
    let profile = sqlx::query_as::<_, StudentProfileRow>(
        "SELECT * FROM student_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))?;

    let sections = load_profile_sections(&state.db, profile.id).await?;

    Ok(Json(PublicProfile {
        id: profile.id,
        user_id: profile.user_id,
        first_name: profile.first_name,
        middle_name: profile.middle_name,
        last_name: profile.last_name,
        skills: profile.skills,
        education: sections.education,
        achievements: sections.achievements,
        projects: sections.projects,
        internships: sections.internships,
        certifications: sections.certifications,
        socials: sections.socials,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }))
}

/// GET /api/v1/student/suggested-profiles
pub async fn handle_suggested(
    State(state): State<AppState>,
    StudentUser(_): StudentUser,
) -> Result<Json<SuggestedResponse>, AppError> {
    let rows = sqlx::query_as::<_, SuggestedRow>(
        r#"
        SELECT sp.id, sp.user_id, sp.first_name, sp.last_name, e.branch
        FROM student_profiles sp
        LEFT JOIN educations e ON e.student_id = sp.id
        ORDER BY RANDOM()
        LIMIT 5
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let students = rows
        .into_iter()
        .map(|r| SuggestedProfile {
            id: r.id,
            user_id: r.user_id,
            name: format!("{} {}", r.first_name, r.last_name),
            branch: r.branch.unwrap_or_else(|| "N/A".to_string()),
        })
        .collect();

    Ok(Json(SuggestedResponse { students }))
}

#[derive(Debug, Serialize)]
pub struct SuggestedResponse {
    pub students: Vec<SuggestedProfile>,
}
