//! Student profile registration and maintenance.

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractors::StudentUser;
use crate::errors::AppError;
use crate::models::student::{
    AchievementRow, CertificationRow, EducationRow, InternshipRow, ProjectRow, SocialRow,
    StudentProfileRow,
};
use crate::state::AppState;

/// Loads the caller's student profile, or 404 if they never registered.
pub async fn profile_for_user(pool: &PgPool, user_id: Uuid) -> Result<StudentProfileRow, AppError> {
    sqlx::query_as::<_, StudentProfileRow>("SELECT * FROM student_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct RegisterProfileRequest {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub personal_email: Option<String>,
    pub phone_no: Option<String>,
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub personal_email: Option<String>,
    pub phone_no: Option<String>,
    pub dob: Option<NaiveDate>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct FullProfileResponse {
    pub profile: StudentProfileRow,
    pub education: Option<EducationRow>,
    pub achievements: Vec<AchievementRow>,
    pub projects: Vec<ProjectRow>,
    pub internships: Vec<InternshipRow>,
    pub certifications: Vec<CertificationRow>,
    pub socials: Vec<SocialRow>,
}

/// GET /api/v1/student/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<StudentProfileRow>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/student/registerStudent
pub async fn handle_register(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<RegisterProfileRequest>,
) -> Result<(StatusCode, Json<StudentProfileRow>), AppError> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "first_name and last_name are required".to_string(),
        ));
    }

    let existing = sqlx::query_as::<_, StudentProfileRow>(
        "SELECT * FROM student_profiles WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Student profile is already registered".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, StudentProfileRow>(
        r#"
        INSERT INTO student_profiles
            (user_id, first_name, middle_name, last_name, personal_email, phone_no, dob, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.first_name)
    .bind(&req.middle_name)
    .bind(&req.last_name)
    .bind(&req.personal_email)
    .bind(&req.phone_no)
    .bind(req.dob)
    .bind(&req.skills)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/v1/student/editProfile
pub async fn handle_edit_profile(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<StudentProfileRow>, AppError> {
    let profile = sqlx::query_as::<_, StudentProfileRow>(
        r#"
        UPDATE student_profiles
        SET first_name = COALESCE($2, first_name),
            middle_name = COALESCE($3, middle_name),
            last_name = COALESCE($4, last_name),
            personal_email = COALESCE($5, personal_email),
            phone_no = COALESCE($6, phone_no),
            dob = COALESCE($7, dob),
            skills = COALESCE($8, skills),
            updated_at = now()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.first_name)
    .bind(&req.middle_name)
    .bind(&req.last_name)
    .bind(&req.personal_email)
    .bind(&req.phone_no)
    .bind(req.dob)
    .bind(&req.skills)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))?;

    Ok(Json(profile))
}

/// GET /api/v1/student/profile/full
///
/// Profile plus every attached section in one response.
pub async fn handle_full_profile(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> Result<Json<FullProfileResponse>, AppError> {
    let profile = profile_for_user(&state.db, user.id).await?;
    let sections = load_profile_sections(&state.db, profile.id).await?;

    Ok(Json(FullProfileResponse {
        profile,
        education: sections.education,
        achievements: sections.achievements,
        projects: sections.projects,
        internships: sections.internships,
        certifications: sections.certifications,
        socials: sections.socials,
    }))
}

pub struct ProfileSections {
    pub education: Option<EducationRow>,
    pub achievements: Vec<AchievementRow>,
    pub projects: Vec<ProjectRow>,
    pub internships: Vec<InternshipRow>,
    pub certifications: Vec<CertificationRow>,
    pub socials: Vec<SocialRow>,
}

/// Loads every section attached to a profile. Shared with the public
/// profile endpoint, which re-serializes without the sensitive fields.
pub async fn load_profile_sections(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<ProfileSections, AppError> {
    let education =
        sqlx::query_as::<_, EducationRow>("SELECT * FROM educations WHERE student_id = $1")
            .bind(student_id)
            .fetch_optional(pool)
            .await?;

    let achievements = sqlx::query_as::<_, AchievementRow>(
        "SELECT * FROM achievements WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    let projects = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    let internships = sqlx::query_as::<_, InternshipRow>(
        "SELECT * FROM internships WHERE student_id = $1 ORDER BY date_start DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    let certifications = sqlx::query_as::<_, CertificationRow>(
        "SELECT * FROM certifications WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    let socials = sqlx::query_as::<_, SocialRow>(
        "SELECT * FROM socials WHERE student_id = $1 ORDER BY created_at ASC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(ProfileSections {
        education,
        achievements,
        projects,
        internships,
        certifications,
        socials,
    })
}
