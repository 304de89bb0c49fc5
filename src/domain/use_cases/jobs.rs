use validator::Validate;

use crate::domain::entities::job::{Job, JobResponse, NewJob, UpdateJob};
use crate::domain::visibility::ActorContext;
use crate::errors::AppError;
use crate::interfaces::repositories::job::JobRepository;

pub struct JobHandler<R: JobRepository> {
    pub job_repo: R,
}

impl<R: JobRepository> JobHandler<R> {
    pub fn new(job_repo: R) -> Self {
        JobHandler { job_repo }
    }

    /// Public job board, grouped by job type.
    pub async fn list(&self) -> Result<Vec<JobResponse>, AppError> {
        let jobs = self.job_repo.list_ordered().await?;
        Ok(jobs.into_iter().map(JobResponse::from).collect())
    }

    pub async fn detail(&self, id: i32) -> Result<JobResponse, AppError> {
        self.job_repo
            .get_by_id(id)
            .await?
            .map(JobResponse::from)
            .ok_or_else(|| AppError::NotFound("Job not found".into()))
    }

    pub async fn create(&self, actor: &ActorContext, job: NewJob) -> Result<JobResponse, AppError> {
        job.validate()?;
        let created = self.job_repo.create(&job, &actor.id).await?;
        tracing::info!(actor = %actor.username, job = %created.job_name, "Job posted");
        Ok(created.into())
    }

    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i32,
        changes: UpdateJob,
    ) -> Result<JobResponse, AppError> {
        changes.validate()?;

        let mut job: Job = self
            .job_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))?;

        if let Some(job_type) = changes.job_type {
            job.job_type = job_type;
        }
        if let Some(job_name) = changes.job_name {
            job.job_name = job_name;
        }
        if let Some(job_city) = changes.job_city {
            job.job_city = job_city;
        }
        if let Some(job_responsibility) = changes.job_responsibility {
            job.job_responsibility = job_responsibility;
        }
        if let Some(job_requirement) = changes.job_requirement {
            job.job_requirement = job_requirement;
        }

        let updated = self.job_repo.update(&job).await?;
        tracing::info!(actor = %actor.username, job_id = id, "Job updated");
        Ok(updated.into())
    }
}
