mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases, visibility};
pub use infrastructure::{auth, db, notify};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use notify::webhook::WebhookNotifier;
use repositories::sqlx_repo::{SqlxCandidateRepo, SqlxJobRepo, SqlxResumeRepo, SqlxUserRepo};
use use_cases::auth::AuthHandler;
use use_cases::candidates::CandidateHandler;
use use_cases::jobs::JobHandler;
use use_cases::notify::NotifyHandler;
use use_cases::resumes::ResumeHandler;

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppJobHandler = JobHandler<SqlxJobRepo>;
pub type AppResumeHandler = ResumeHandler<SqlxResumeRepo>;
pub type AppCandidateHandler = CandidateHandler<SqlxCandidateRepo, SqlxResumeRepo>;
pub type AppNotifyHandler = NotifyHandler<SqlxCandidateRepo, WebhookNotifier>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub job_handler: AppJobHandler,
    pub resume_handler: AppResumeHandler,
    pub candidate_handler: AppCandidateHandler,
    pub notify_handler: AppNotifyHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let notifier = WebhookNotifier::new(config.notify_webhook_url.clone());

        AppState {
            auth_handler: AuthHandler::new(SqlxUserRepo::new(pool.clone()), jwt_service),
            job_handler: JobHandler::new(SqlxJobRepo::new(pool.clone())),
            resume_handler: ResumeHandler::new(SqlxResumeRepo::new(pool.clone())),
            candidate_handler: CandidateHandler::new(
                SqlxCandidateRepo::new(pool.clone()),
                SqlxResumeRepo::new(pool.clone()),
            ),
            notify_handler: NotifyHandler::new(SqlxCandidateRepo::new(pool), notifier),
        }
    }
}
