use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_complexity;

/// Role label for the first/second round interviewer group.
pub const GROUP_INTERVIEWER: &str = "interviewer";
/// Role label for the HR group.
pub const GROUP_HR: &str = "hr";

/// Explicit per-actor grant for the CSV export bulk action.
pub const PERM_EXPORT: &str = "export_candidates";
/// Explicit per-actor grant for the webhook notify bulk action.
pub const PERM_NOTIFY: &str = "notify_interviewers";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub groups: Vec<String>,
    pub is_superuser: bool,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub groups: Vec<String>,
    pub is_superuser: bool,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, message = "Must be at least 2 characters"))]
    pub username: String,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_complexity",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,
}

impl NewUser {
    /// Self-registration never grants roles: group membership, superuser
    /// status and action grants are assigned afterwards by an operator.
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash,
            groups: Vec::new(),
            is_superuser: false,
            permissions: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub groups: Vec<String>,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            username: user.username,
            groups: user.groups,
            is_superuser: user.is_superuser,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visibility::RoleSet;

    #[test]
    fn registration_payload_cannot_smuggle_roles_or_grants() {
        let form: NewUser = serde_json::from_value(serde_json::json!({
            "email": "intruder@example.com",
            "username": "intruder",
            "password": "Sup3r$ecret",
            "is_superuser": true,
            "groups": ["hr"],
            "permissions": [PERM_EXPORT, PERM_NOTIFY]
        }))
        .unwrap();

        let insert = form.prepare_for_insert("hash".into());
        assert!(!insert.is_superuser);
        assert!(insert.groups.is_empty());
        assert!(insert.permissions.is_empty());

        let roles = RoleSet::resolve(&insert.groups, insert.is_superuser, &insert.permissions);
        assert!(!roles.is_staff());
        assert!(!roles.sees_all_candidates());
        assert!(!roles.can(PERM_EXPORT));
        assert!(!roles.can(PERM_NOTIFY));
    }
}
