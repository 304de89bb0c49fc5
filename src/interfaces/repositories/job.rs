use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::entities::job::{Job, NewJob},
    errors::AppError,
    interfaces::repositories::sqlx_repo::SqlxJobRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &NewJob, creator_id: &Uuid) -> Result<Job, AppError>;
    async fn update(&self, job: &Job) -> Result<Job, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Job>, AppError>;
    /// Board listing order, same as the legacy admin: by job type.
    async fn list_ordered(&self) -> Result<Vec<Job>, AppError>;
}

impl SqlxJobRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxJobRepo { pool }
    }
}

#[async_trait]
impl JobRepository for SqlxJobRepo {
    async fn create(&self, job: &NewJob, creator_id: &Uuid) -> Result<Job, AppError> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                job_type, job_name, job_city, job_responsibility, job_requirement,
                creator_id, created_date, modified_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(job.job_type)
        .bind(&job.job_name)
        .bind(job.job_city)
        .bind(&job.job_responsibility)
        .bind(&job.job_requirement)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, job: &Job) -> Result<Job, AppError> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                job_type = $2,
                job_name = $3,
                job_city = $4,
                job_responsibility = $5,
                job_requirement = $6,
                modified_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(job.job_type)
        .bind(&job.job_name)
        .bind(job.job_city)
        .bind(&job.job_responsibility)
        .bind(&job.job_requirement)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Job not found".into()),
            _ => e.into(),
        })
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Job>, AppError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_ordered(&self) -> Result<Vec<Job>, AppError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY job_type, id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
