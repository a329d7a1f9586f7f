pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::admin;
use crate::eligibility::handlers as eligibility;
use crate::postings;
use crate::state::AppState;
use crate::student;
use crate::users;

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route("/profile", get(users::handle_me))
        .nest("/api/v1/user", user_routes())
        .nest("/api/v1/student", student_routes())
        .nest("/api/v1/admin", admin_routes())
        .nest("/api/v1/postings", posting_routes())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(users::handle_sync))
        .route("/me", get(users::handle_me))
}

fn student_routes() -> Router<AppState> {
    Router::new()
        // Profile
        .route("/profile", get(student::profile::handle_get_profile))
        .route("/registerStudent", post(student::profile::handle_register))
        .route("/editProfile", put(student::profile::handle_edit_profile))
        .route("/profile/full", get(student::profile::handle_full_profile))
        // Education
        .route("/education", get(student::education::handle_get_education))
        .route("/addEducation", post(student::education::handle_add_education))
        .route("/editEducation", put(student::education::handle_edit_education))
        .route("/education", delete(student::education::handle_delete_education))
        // Achievements
        .route("/achievement", get(student::achievements::handle_list))
        .route("/addAchievement", post(student::achievements::handle_add))
        .route("/editAchievement/:id", put(student::achievements::handle_edit))
        .route("/achievement/:id", delete(student::achievements::handle_delete))
        // Projects
        .route("/project", get(student::projects::handle_list))
        .route("/addProject", post(student::projects::handle_add))
        .route("/editProject/:id", put(student::projects::handle_edit))
        .route("/project/:id", delete(student::projects::handle_delete))
        // Internships
        .route("/internship", get(student::internships::handle_list))
        .route("/addInternship", post(student::internships::handle_add))
        .route("/internship/:id", put(student::internships::handle_edit))
        .route("/internship/:id", delete(student::internships::handle_delete))
        // Certificates
        .route("/certificate", get(student::certificates::handle_list))
        .route("/addCertificate", post(student::certificates::handle_add))
        .route("/certificate/:id", put(student::certificates::handle_edit))
        .route("/certificate/:id", delete(student::certificates::handle_delete))
        // Socials
        .route("/social", get(student::socials::handle_list))
        .route("/addSocial", post(student::socials::handle_add))
        .route("/social/:id", put(student::socials::handle_edit))
        .route("/social/:id", delete(student::socials::handle_delete))
        // Applications
        .route("/applyForJob", post(student::applications::handle_apply))
        .route("/applications", get(student::applications::handle_list))
        // Eligibility
        .route(
            "/getEligibilityCriteria/:job_post_id",
            get(eligibility::handle_student_criteria),
        )
        // Resume
        .route("/uploadResume", post(student::resume::handle_upload))
        .route("/download-resume", get(student::resume::handle_download))
        // Public profiles
        .route("/search", get(student::public_profile::handle_search))
        .route(
            "/publicProfile/:user_id",
            get(student::public_profile::handle_public_profile),
        )
        .route(
            "/suggested-profiles",
            get(student::public_profile::handle_suggested),
        )
        // Notifications
        .route("/notifications", get(student::notifications::handle_list))
        // Interview experiences
        .route("/experiences", get(student::experiences::handle_list))
        .route("/experiences/:id", get(student::experiences::handle_get))
        .route("/addExperience", post(student::experiences::handle_add))
        .route("/experiences/:id", put(student::experiences::handle_edit))
        .route("/experiences/:id", delete(student::experiences::handle_delete))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        // Profile
        .route("/profile", get(admin::profile::handle_get))
        .route("/profile", post(admin::profile::handle_upsert))
        .route("/profile", put(admin::profile::handle_upsert))
        // Postings
        .route("/addPostingDetails", post(admin::postings::handle_add_posting))
        .route("/editPostingDetails", put(admin::postings::handle_edit_posting))
        .route(
            "/createJobWithEligibility",
            post(admin::postings::handle_create_with_eligibility),
        )
        .route("/job/status", patch(admin::postings::handle_update_status))
        // Eligibility criteria
        .route(
            "/addEligibilityCriteria",
            post(eligibility::handle_add_criteria),
        )
        .route(
            "/editEligibilityCriteria",
            put(eligibility::handle_edit_criteria),
        )
        .route(
            "/getEligibilityCriteria/:job_post_id",
            get(eligibility::handle_get_criteria),
        )
        // Jobs
        .route("/jobs", get(admin::jobs::handle_list))
        .route("/jobs/:job_id", get(admin::jobs::handle_get))
        .route("/jobs/:job_id/notify", post(admin::jobs::handle_notify_eligible))
        // Applications
        .route(
            "/jobs/:job_id/applications",
            get(admin::applications::handle_list_for_job),
        )
        .route(
            "/applications/status",
            patch(admin::applications::handle_bulk_status),
        )
        .route(
            "/jobs/:job_id/applications/download",
            get(admin::export::handle_download),
        )
        // Statistics
        .route("/statistics", get(admin::statistics::handle_statistics))
}

fn posting_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(postings::handle_list_open))
        .route("/:id", get(postings::handle_get))
}
