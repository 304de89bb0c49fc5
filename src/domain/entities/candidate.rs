use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::domain::entities::resume::{Degree, Gender, Resume};

/// Per-round verdict. Every round starts out pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "interview_result", rename_all = "lowercase")]
pub enum InterviewResult {
    Pending,
    Pass,
    Fail,
}

/// Durable workflow record for a person in the interview pipeline. The base
/// attributes are copied verbatim from the resume at promotion time; the
/// three rounds are filled incrementally by the assigned interviewers.
///
/// Serialized field names are the contract the visibility policy and the
/// export field list are written against.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Candidate {
    pub id: i32,

    // Shared with Resume
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

    // First round
    pub first_score: Option<f64>,
    pub first_learning_ability: Option<f64>,
    pub first_professional_competency: Option<f64>,
    pub first_advantage: Option<String>,
    pub first_disadvantage: Option<String>,
    pub first_result: InterviewResult,
    pub first_recommend_position: Option<String>,
    pub first_interviewer_id: Option<Uuid>,
    pub first_remark: Option<String>,

    // Second round
    pub second_score: Option<f64>,
    pub second_learning_ability: Option<f64>,
    pub second_professional_competency: Option<f64>,
    pub second_pursue_of_excellence: Option<f64>,
    pub second_communication_ability: Option<f64>,
    pub second_pressure_score: Option<f64>,
    pub second_advantage: Option<String>,
    pub second_disadvantage: Option<String>,
    pub second_result: InterviewResult,
    pub second_recommend_position: Option<String>,
    pub second_interviewer_id: Option<Uuid>,
    pub second_remark: Option<String>,

    // HR round
    pub hr_score: Option<f64>,
    pub hr_responsibility: Option<f64>,
    pub hr_communication_ability: Option<f64>,
    pub hr_logic_ability: Option<f64>,
    pub hr_potential: Option<f64>,
    pub hr_stability: Option<f64>,
    pub hr_advantage: Option<String>,
    pub hr_disadvantage: Option<String>,
    pub hr_result: InterviewResult,
    pub hr_interviewer_id: Option<Uuid>,
    pub hr_remark: Option<String>,

    // Audit
    pub creator: Option<String>,
    pub last_editor: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

/// Promotion payload. The field-by-field copy is deliberate: additions to
/// either entity must be reflected here explicitly rather than merged by
/// reflection.
#[derive(Debug, Clone)]
pub struct CandidateInsert {
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
    pub creator: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl CandidateInsert {
    /// Copies every shared attribute from the resume and re-stamps the
    /// timestamps. Rounds start empty and are not represented here; the
    /// database defaults them to pending/NULL.
    pub fn from_resume(resume: &Resume, creator: &str, now: DateTime<Utc>) -> Self {
        CandidateInsert {
            username: resume.username.clone(),
            phone: resume.phone.clone(),
            email: resume.email.clone(),
            city: resume.city.clone(),
            born_address: resume.born_address.clone(),
            gender: resume.gender,
            apply_position: resume.apply_position.clone(),
            bachelor_school: resume.bachelor_school.clone(),
            master_school: resume.master_school.clone(),
            major: resume.major.clone(),
            degree: resume.degree,
            candidate_introduction: resume.candidate_introduction.clone(),
            work_experience: resume.work_experience.clone(),
            project_experience: resume.project_experience.clone(),
            creator: Some(creator.to_string()),
            created_date: now,
            modified_date: now,
        }
    }
}

/// Optional list filters, mirroring the legacy admin filter sidebar.
#[derive(Debug, Default, Deserialize)]
pub struct CandidateFilters {
    pub city: Option<String>,
    pub first_result: Option<InterviewResult>,
    pub second_result: Option<InterviewResult>,
    pub hr_result: Option<InterviewResult>,
    pub first_interviewer_id: Option<Uuid>,
    pub second_interviewer_id: Option<Uuid>,
    /// Substring search over username, phone, email and bachelor school.
    pub q: Option<String>,
}

/// Inline edit of the two interviewer-assignment fields from the list view.
#[derive(Debug, Deserialize)]
pub struct AssignInterviewers {
    #[serde(default, with = "double_option")]
    pub first_interviewer_id: Option<Option<Uuid>>,
    #[serde(default, with = "double_option")]
    pub second_interviewer_id: Option<Option<Uuid>>,
}

/// Distinguishes an omitted field from an explicit null so an assignment can
/// be cleared.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

/// Joined row used to compose the interview notification.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotifyRow {
    pub username: String,
    pub first_interviewer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedResumes {
    pub resume_ids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedCandidates {
    pub candidate_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct PromotionResponse {
    pub promoted: Vec<String>,
    pub message: String,
}
