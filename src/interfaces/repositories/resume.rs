use async_trait::async_trait;

use crate::{
    domain::entities::resume::{Resume, ResumeInsert},
    errors::AppError,
    interfaces::repositories::sqlx_repo::SqlxResumeRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create(&self, resume: &ResumeInsert) -> Result<Resume, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Resume>, AppError>;
    async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Resume>, AppError>;
}

impl SqlxResumeRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxResumeRepo { pool }
    }
}

#[async_trait]
impl ResumeRepository for SqlxResumeRepo {
    async fn create(&self, resume: &ResumeInsert) -> Result<Resume, AppError> {
        sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (
                username, phone, email, city, born_address, gender, apply_position,
                bachelor_school, master_school, major, degree,
                candidate_introduction, work_experience, project_experience,
                applicant_id, created_date, modified_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&resume.form.username)
        .bind(&resume.form.phone)
        .bind(&resume.form.email)
        .bind(&resume.form.city)
        .bind(&resume.form.born_address)
        .bind(resume.form.gender)
        .bind(&resume.form.apply_position)
        .bind(&resume.form.bachelor_school)
        .bind(&resume.form.master_school)
        .bind(&resume.form.major)
        .bind(resume.form.degree)
        .bind(&resume.form.candidate_introduction)
        .bind(&resume.form.work_experience)
        .bind(&resume.form.project_experience)
        .bind(resume.applicant_id)
        .bind(resume.created_date)
        .bind(resume.modified_date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Resume>, AppError> {
        sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Resume>, AppError> {
        sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
