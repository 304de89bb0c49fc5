use validator::Validate;

use crate::domain::entities::resume::{NewResume, Resume, ResumePrefill, ResumePrefillQuery};
use crate::domain::visibility::ActorContext;
use crate::errors::AppError;
use crate::interfaces::repositories::resume::ResumeRepository;

pub struct ResumeHandler<R: ResumeRepository> {
    pub resume_repo: R,
}

impl<R: ResumeRepository> ResumeHandler<R> {
    pub fn new(resume_repo: R) -> Self {
        ResumeHandler { resume_repo }
    }

    /// Seeds the submission form from a job-posting link. Everything it
    /// returns stays editable in the form.
    pub fn prefill(&self, query: ResumePrefillQuery) -> ResumePrefill {
        query.into()
    }

    /// Stores a submitted resume, attributed to the signed-in applicant.
    pub async fn submit(&self, actor: &ActorContext, form: NewResume) -> Result<Resume, AppError> {
        form.validate()?;

        let resume = self
            .resume_repo
            .create(&form.prepare_for_insert(actor.id))
            .await?;

        tracing::info!(
            applicant = %actor.username,
            resume_id = resume.id,
            position = %resume.apply_position,
            "Resume submitted"
        );
        Ok(resume)
    }

    pub async fn detail(&self, id: i32) -> Result<Resume, AppError> {
        self.resume_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))
    }
}
