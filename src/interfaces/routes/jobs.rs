use actix_web::web;

use crate::handlers::jobs;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(jobs::job_board).service(jobs::job_detail);
}
