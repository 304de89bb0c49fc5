use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod auth;
mod jobs;
mod json_error;
mod resumes;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.configure(jobs::config_routes);
    cfg.configure(auth::config_routes);
    cfg.configure(resumes::config_routes);
    cfg.configure(admin::config_routes);

    cfg.configure(json_error::config_routes);
}
