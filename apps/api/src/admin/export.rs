//! CSV export of a job's applicant list.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::admin::applications::{applicants_for_job, ApplicantRow};
use crate::admin::postings::fetch_job;
use crate::auth::extractors::AdminUser;
use crate::errors::AppError;
use crate::state::AppState;

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(rows: &[ApplicantRow]) -> String {
    let mut csv = String::from(
        "first_name,last_name,email,phone,branch,cgpa,passing_year,status,applied_at\n",
    );
    for row in rows {
        let fields = [
            csv_escape(&row.first_name),
            csv_escape(&row.last_name),
            csv_escape(row.personal_email.as_deref().unwrap_or("")),
            csv_escape(row.phone_no.as_deref().unwrap_or("")),
            csv_escape(row.branch.as_deref().unwrap_or("")),
            row.cgpa.map(|c| format!("{c:.2}")).unwrap_or_default(),
            row.passing_year.map(|y| y.to_string()).unwrap_or_default(),
            csv_escape(&row.status),
            row.applied_at.to_rfc3339(),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

/// GET /api/v1/admin/jobs/:job_id/applications/download
pub async fn handle_download(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    fetch_job(&state.db, job_id).await?;
    let applicants = applicants_for_job(&state.db, job_id).await?;
    let csv = render_csv(&applicants);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"applications-{job_id}.csv\""),
            ),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_plain_value_unquoted() {
        assert_eq!(csv_escape("Computer Science"), "Computer Science");
    }

    #[test]
    fn test_comma_forces_quoting() {
        assert_eq!(csv_escape("Pune, India"), "\"Pune, India\"");
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        assert_eq!(csv_escape("the \"best\" batch"), "\"the \"\"best\"\" batch\"");
    }

    #[test]
    fn test_newline_forces_quoting() {
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
    }

    fn applicant(first: &str, branch: Option<&str>) -> ApplicantRow {
        ApplicantRow {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: "Sharma".to_string(),
            personal_email: Some("a@example.com".to_string()),
            phone_no: None,
            branch: branch.map(String::from),
            cgpa: Some(8.5),
            passing_year: Some(2026),
            status: "APPLIED".to_string(),
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_has_header_and_rows() {
        let csv = render_csv(&[applicant("Asha", Some("IT")), applicant("Ravi", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("first_name,last_name"));
        assert!(lines[1].contains("Asha"));
        assert!(lines[1].contains("8.50"));
        // missing branch renders as an empty field, not a literal "None"
        assert!(lines[2].contains(",,"));
    }

    #[test]
    fn test_render_empty_is_header_only() {
        let csv = render_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
