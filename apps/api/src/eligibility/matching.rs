//! Eligibility matching: pure checks of a student's education record against
//! a job post's criteria.
//!
//! Every criterion is optional; an absent criterion always passes. The result
//! carries the human-readable list of unmet criteria so callers can surface
//! exactly why an application was refused.

use serde::Serialize;

use crate::models::job::EligibilityCriteriaRow;
use crate::models::student::EducationRow;

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub unmet: Vec<String>,
}

impl EligibilityReport {
    pub fn eligible() -> Self {
        EligibilityReport {
            eligible: true,
            unmet: vec![],
        }
    }
}

/// Checks a student's education record against a job's criteria.
///
/// Twelfth-grade and diploma thresholds are alternative entry paths: when the
/// criteria set both, meeting either one on the record the student actually
/// has is enough. When only one is set, that record is required.
pub fn check_eligibility(
    criteria: &EligibilityCriteriaRow,
    education: &EducationRow,
) -> EligibilityReport {
    let mut unmet = Vec::new();

    if let Some(min) = criteria.min_cgpa {
        if education.cgpa < min {
            unmet.push(format!(
                "CGPA {:.2} is below the required {:.2}",
                education.cgpa, min
            ));
        }
    }

    if let Some(min) = criteria.min_tenth {
        if education.tenth_percent < min {
            unmet.push(format!(
                "Tenth percentage {:.2} is below the required {:.2}",
                education.tenth_percent, min
            ));
        }
    }

    match (criteria.min_twelfth, criteria.min_diploma) {
        (None, None) => {}
        (Some(min_tw), Some(min_di)) => {
            let twelfth_ok = education.twelfth_percent.is_some_and(|p| p >= min_tw);
            let diploma_ok = education.diploma_percent.is_some_and(|p| p >= min_di);
            if !twelfth_ok && !diploma_ok {
                unmet.push(format!(
                    "Neither twelfth percentage (min {:.2}) nor diploma percentage (min {:.2}) requirement is met",
                    min_tw, min_di
                ));
            }
        }
        (Some(min_tw), None) => match education.twelfth_percent {
            Some(p) if p >= min_tw => {}
            Some(p) => unmet.push(format!(
                "Twelfth percentage {:.2} is below the required {:.2}",
                p, min_tw
            )),
            None => unmet.push("No twelfth-grade record on file".to_string()),
        },
        (None, Some(min_di)) => match education.diploma_percent {
            Some(p) if p >= min_di => {}
            Some(p) => unmet.push(format!(
                "Diploma percentage {:.2} is below the required {:.2}",
                p, min_di
            )),
            None => unmet.push("No diploma record on file".to_string()),
        },
    }

    if let Some(max) = criteria.max_backlogs {
        if education.active_backlogs > max {
            unmet.push(format!(
                "{} active backlog(s) exceed the allowed {}",
                education.active_backlogs, max
            ));
        }
    }

    if !criteria.allowed_branches.is_empty() {
        let allowed = criteria
            .allowed_branches
            .iter()
            .any(|b| b.eq_ignore_ascii_case(&education.branch));
        if !allowed {
            unmet.push(format!(
                "Branch '{}' is not among the allowed branches",
                education.branch
            ));
        }
    }

    if let Some(year) = criteria.passing_year {
        if education.passing_year != year {
            unmet.push(format!(
                "Passing year {} does not match the required {}",
                education.passing_year, year
            ));
        }
    }

    EligibilityReport {
        eligible: unmet.is_empty(),
        unmet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn criteria() -> EligibilityCriteriaRow {
        EligibilityCriteriaRow {
            id: Uuid::new_v4(),
            job_post_id: Uuid::new_v4(),
            min_cgpa: None,
            min_tenth: None,
            min_twelfth: None,
            min_diploma: None,
            max_backlogs: None,
            allowed_branches: vec![],
            passing_year: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn education() -> EducationRow {
        EducationRow {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            branch: "Computer Science".to_string(),
            degree: "B.Tech".to_string(),
            cgpa: 8.2,
            tenth_percent: 88.0,
            twelfth_percent: Some(85.0),
            diploma_percent: None,
            active_backlogs: 0,
            passing_year: 2026,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_criteria_passes() {
        let report = check_eligibility(&criteria(), &education());
        assert!(report.eligible);
        assert!(report.unmet.is_empty());
    }

    #[test]
    fn test_cgpa_pass_at_threshold() {
        let mut c = criteria();
        c.min_cgpa = Some(8.2);
        assert!(check_eligibility(&c, &education()).eligible);
    }

    #[test]
    fn test_cgpa_below_threshold_fails() {
        let mut c = criteria();
        c.min_cgpa = Some(8.5);
        let report = check_eligibility(&c, &education());
        assert!(!report.eligible);
        assert!(report.unmet[0].contains("CGPA"));
    }

    #[test]
    fn test_tenth_below_threshold_fails() {
        let mut c = criteria();
        c.min_tenth = Some(90.0);
        assert!(!check_eligibility(&c, &education()).eligible);
    }

    #[test]
    fn test_twelfth_only_requirement() {
        let mut c = criteria();
        c.min_twelfth = Some(80.0);
        assert!(check_eligibility(&c, &education()).eligible);

        c.min_twelfth = Some(90.0);
        assert!(!check_eligibility(&c, &education()).eligible);
    }

    #[test]
    fn test_twelfth_required_but_missing() {
        let mut c = criteria();
        c.min_twelfth = Some(60.0);
        let mut e = education();
        e.twelfth_percent = None;
        e.diploma_percent = Some(95.0);
        let report = check_eligibility(&c, &e);
        assert!(!report.eligible);
        assert!(report.unmet[0].contains("twelfth-grade record"));
    }

    #[test]
    fn test_diploma_path_satisfies_either_or() {
        let mut c = criteria();
        c.min_twelfth = Some(60.0);
        c.min_diploma = Some(60.0);
        let mut e = education();
        e.twelfth_percent = None;
        e.diploma_percent = Some(72.0);
        assert!(check_eligibility(&c, &e).eligible);
    }

    #[test]
    fn test_either_or_fails_when_neither_met() {
        let mut c = criteria();
        c.min_twelfth = Some(90.0);
        c.min_diploma = Some(90.0);
        let mut e = education();
        e.twelfth_percent = Some(70.0);
        e.diploma_percent = Some(70.0);
        assert!(!check_eligibility(&c, &e).eligible);
    }

    #[test]
    fn test_backlogs_at_limit_pass() {
        let mut c = criteria();
        c.max_backlogs = Some(2);
        let mut e = education();
        e.active_backlogs = 2;
        assert!(check_eligibility(&c, &e).eligible);
    }

    #[test]
    fn test_backlogs_over_limit_fail() {
        let mut c = criteria();
        c.max_backlogs = Some(0);
        let mut e = education();
        e.active_backlogs = 1;
        let report = check_eligibility(&c, &e);
        assert!(!report.eligible);
        assert!(report.unmet[0].contains("backlog"));
    }

    #[test]
    fn test_branch_match_case_insensitive() {
        let mut c = criteria();
        c.allowed_branches = vec!["COMPUTER SCIENCE".to_string(), "IT".to_string()];
        assert!(check_eligibility(&c, &education()).eligible);
    }

    #[test]
    fn test_branch_not_allowed_fails() {
        let mut c = criteria();
        c.allowed_branches = vec!["Mechanical".to_string()];
        let report = check_eligibility(&c, &education());
        assert!(!report.eligible);
        assert!(report.unmet[0].contains("Branch"));
    }

    #[test]
    fn test_passing_year_mismatch_fails() {
        let mut c = criteria();
        c.passing_year = Some(2025);
        assert!(!check_eligibility(&c, &education()).eligible);

        c.passing_year = Some(2026);
        assert!(check_eligibility(&c, &education()).eligible);
    }

    #[test]
    fn test_multiple_unmet_criteria_accumulate() {
        let mut c = criteria();
        c.min_cgpa = Some(9.0);
        c.max_backlogs = Some(0);
        c.passing_year = Some(2024);
        let mut e = education();
        e.active_backlogs = 3;
        let report = check_eligibility(&c, &e);
        assert!(!report.eligible);
        assert_eq!(report.unmet.len(), 3);
    }
}
