use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "degree_type", rename_all = "lowercase")]
pub enum Degree {
    Bachelor,
    Master,
    Doctor,
}

/// Raw application record. Read-only after creation; promotion copies it
/// into a candidate without touching the original.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Resume {
    pub id: i32,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub born_address: String,
    pub gender: Gender,
    pub apply_position: String,
    pub bachelor_school: String,
    pub master_school: String,
    pub major: String,
    pub degree: Degree,
    pub candidate_introduction: String,
    pub work_experience: String,
    pub project_experience: String,
    pub applicant_id: Uuid,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{2,19}$").unwrap());

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone_format");
        error.message = Some("Invalid phone number".into());
        Err(error)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewResume {
    #[validate(length(min = 1, max = 135, message = "Must be 1-135 characters"))]
    pub username: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 135, message = "Must be 1-135 characters"))]
    pub city: String,

    #[validate(length(max = 135, message = "Must be at most 135 characters"))]
    #[serde(default)]
    pub born_address: String,

    pub gender: Gender,

    #[validate(length(max = 135, message = "Must be at most 135 characters"))]
    #[serde(default)]
    pub apply_position: String,

    #[validate(length(max = 135, message = "Must be at most 135 characters"))]
    #[serde(default)]
    pub bachelor_school: String,

    #[validate(length(max = 135, message = "Must be at most 135 characters"))]
    #[serde(default)]
    pub master_school: String,

    #[validate(length(max = 135, message = "Must be at most 135 characters"))]
    #[serde(default)]
    pub major: String,

    pub degree: Degree,

    #[validate(length(max = 1024, message = "Must be at most 1024 characters"))]
    #[serde(default)]
    pub candidate_introduction: String,

    #[validate(length(max = 1024, message = "Must be at most 1024 characters"))]
    #[serde(default)]
    pub work_experience: String,

    #[validate(length(max = 1024, message = "Must be at most 1024 characters"))]
    #[serde(default)]
    pub project_experience: String,
}

#[derive(Debug)]
pub struct ResumeInsert {
    pub form: NewResume,
    pub applicant_id: Uuid,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl NewResume {
    pub fn prepare_for_insert(self, applicant_id: Uuid) -> ResumeInsert {
        let now = Utc::now();
        ResumeInsert {
            form: self,
            applicant_id,
            created_date: now,
            modified_date: now,
        }
    }
}

/// Query parameters accepted by the submission form, used to seed the
/// editable defaults when linking from a job posting.
#[derive(Debug, Default, Deserialize)]
pub struct ResumePrefillQuery {
    pub apply_position: Option<String>,
    pub city: Option<String>,
}

/// Pre-filled form payload returned by `GET /resumes/new`.
#[derive(Debug, Serialize)]
pub struct ResumePrefill {
    pub apply_position: String,
    pub city: String,
}

impl From<ResumePrefillQuery> for ResumePrefill {
    fn from(query: ResumePrefillQuery) -> Self {
        ResumePrefill {
            apply_position: query.apply_position.unwrap_or_default(),
            city: query.city.unwrap_or_default(),
        }
    }
}
