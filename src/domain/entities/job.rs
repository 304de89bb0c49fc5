use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;
use validator::Validate;

/// Job category. Stored as SMALLINT, same codes as the legacy data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum JobType {
    Technology = 0,
    Product = 1,
    Operations = 2,
    Design = 3,
    Marketing = 4,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobType::Technology => "Technology",
            JobType::Product => "Product",
            JobType::Operations => "Operations",
            JobType::Design => "Design",
            JobType::Marketing => "Marketing",
        };
        write!(f, "{s}")
    }
}

/// Office city. Stored as SMALLINT, same codes as the legacy data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum City {
    Beijing = 0,
    Shanghai = 1,
    Shenzhen = 2,
    Hangzhou = 3,
    Guangzhou = 4,
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            City::Beijing => "Beijing",
            City::Shanghai => "Shanghai",
            City::Shenzhen => "Shenzhen",
            City::Hangzhou => "Hangzhou",
            City::Guangzhou => "Guangzhou",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i32,
    pub job_type: JobType,
    pub job_name: String,
    pub job_city: City,
    pub job_responsibility: String,
    pub job_requirement: String,
    pub creator_id: Option<Uuid>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewJob {
    pub job_type: JobType,

    #[validate(length(min = 1, max = 250, message = "Must be 1-250 characters"))]
    pub job_name: String,

    pub job_city: City,

    #[validate(length(max = 1024, message = "Must be at most 1024 characters"))]
    pub job_responsibility: String,

    #[validate(length(min = 1, max = 1024, message = "Must be 1-1024 characters"))]
    pub job_requirement: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJob {
    pub job_type: Option<JobType>,

    #[validate(length(min = 1, max = 250, message = "Must be 1-250 characters"))]
    pub job_name: Option<String>,

    pub job_city: Option<City>,

    #[validate(length(max = 1024, message = "Must be at most 1024 characters"))]
    pub job_responsibility: Option<String>,

    #[validate(length(min = 1, max = 1024, message = "Must be 1-1024 characters"))]
    pub job_requirement: Option<String>,
}

/// Board-facing view of a job, with human-readable type/city labels.
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i32,
    pub job_type: JobType,
    pub job_type_label: String,
    pub job_name: String,
    pub job_city: City,
    pub job_city_label: String,
    pub job_responsibility: String,
    pub job_requirement: String,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            id: job.id,
            job_type_label: job.job_type.to_string(),
            job_city_label: job.job_city.to_string(),
            job_type: job.job_type,
            job_name: job.job_name,
            job_city: job.job_city,
            job_responsibility: job.job_responsibility,
            job_requirement: job.job_requirement,
            created_date: job.created_date,
            modified_date: job.modified_date,
        }
    }
}
