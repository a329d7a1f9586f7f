#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Portal roles. Stored in the `users.role` column as their string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
    TnpOfficer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Admin => "ADMIN",
            Role::TnpOfficer => "TNP_OFFICER",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "STUDENT" => Some(Role::Student),
            "ADMIN" => Some(Role::Admin),
            "TNP_OFFICER" => Some(Role::TnpOfficer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub auth0_id: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student.as_str()
    }

    /// ADMIN and TNP_OFFICER both count as placement staff.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str() || self.role == Role::TnpOfficer.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub designation: Option<String>,
    pub phone_no: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Student, Role::Admin, Role::TnpOfficer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(Role::parse("SUPERUSER"), None);
        assert_eq!(Role::parse("student"), None);
    }

    #[test]
    fn test_tnp_officer_counts_as_admin() {
        let user = UserRow {
            id: Uuid::new_v4(),
            auth0_id: "auth0|abc".to_string(),
            email: "officer@college.edu".to_string(),
            role: "TNP_OFFICER".to_string(),
            created_at: Utc::now(),
        };
        assert!(user.is_admin());
        assert!(!user.is_student());
    }
}
