#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Job post lifecycle. Stored in `job_posts.status` as the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Draft,
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "DRAFT",
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<JobStatus> {
        match s {
            "DRAFT" => Some(JobStatus::Draft),
            "OPEN" => Some(JobStatus::Open),
            "CLOSED" => Some(JobStatus::Closed),
            _ => None,
        }
    }

    /// Legal lifecycle moves. CLOSED is terminal.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Draft, JobStatus::Open)
                | (JobStatus::Open, JobStatus::Closed)
                | (JobStatus::Draft, JobStatus::Closed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Selected => "SELECTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<ApplicationStatus> {
        match s {
            "APPLIED" => Some(ApplicationStatus::Applied),
            "SHORTLISTED" => Some(ApplicationStatus::Shortlisted),
            "SELECTED" => Some(ApplicationStatus::Selected),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostRow {
    pub id: Uuid,
    pub posted_by_id: Uuid,
    pub role: String,
    pub company: String,
    pub company_info: Option<String>,
    pub description: String,
    pub ctc: String,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EligibilityCriteriaRow {
    pub id: Uuid,
    pub job_post_id: Uuid,
    pub min_cgpa: Option<f64>,
    pub min_tenth: Option<f64>,
    pub min_twelfth: Option<f64>,
    pub min_diploma: Option<f64>,
    pub max_backlogs: Option<i32>,
    pub allowed_branches: Vec<String>,
    pub passing_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_post_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub job_post_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_can_open() {
        assert!(JobStatus::Draft.can_transition_to(JobStatus::Open));
    }

    #[test]
    fn test_open_can_close() {
        assert!(JobStatus::Open.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn test_draft_can_close() {
        assert!(JobStatus::Draft.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Open));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Draft));
    }

    #[test]
    fn test_no_reopen_from_open_to_draft() {
        assert!(!JobStatus::Open.can_transition_to(JobStatus::Draft));
    }

    #[test]
    fn test_same_state_is_not_a_transition() {
        assert!(!JobStatus::Open.can_transition_to(JobStatus::Open));
        assert!(!JobStatus::Draft.can_transition_to(JobStatus::Draft));
    }

    #[test]
    fn test_job_status_roundtrip() {
        for status in [JobStatus::Draft, JobStatus::Open, JobStatus::Closed] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("ARCHIVED"), None);
    }

    #[test]
    fn test_application_status_roundtrip() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Selected,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("WAITLISTED"), None);
    }
}
