use actix_web::web;

use crate::handlers::{actions, candidates, jobs, resumes, system::admin_health_check, users};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin_health_check)
            .service(users::list_interviewers)
            .service(jobs::create_job)
            .service(jobs::update_job)
            .service(resumes::resume_detail)
            .service(actions::promote_resumes)
            .service(actions::export_candidates)
            .service(actions::notify_interviewers)
            .service(candidates::list_candidates)
            .service(candidates::candidate_detail)
            .service(candidates::update_candidate)
            .service(candidates::assign_interviewers),
    );
}
