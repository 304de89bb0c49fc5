use actix_web::web;

use crate::handlers::resumes;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resumes::resume_prefill)
        .service(resumes::submit_resume);
}
