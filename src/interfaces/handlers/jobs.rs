use actix_web::{get, post, put, web, HttpResponse, Responder};

use crate::entities::job::{NewJob, UpdateJob};
use crate::use_cases::extractors::Actor;
use crate::AppState;

/// Public job board, no authentication required.
#[get("/joblist")]
pub async fn job_board(state: web::Data<AppState>) -> impl Responder {
    match state.job_handler.list().await {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => e.to_http_response(),
    }
}

#[get("/job/{id}")]
pub async fn job_detail(state: web::Data<AppState>, id: web::Path<i32>) -> impl Responder {
    match state.job_handler.detail(id.into_inner()).await {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(e) => e.to_http_response(),
    }
}

#[post("/jobs")]
pub async fn create_job(
    state: web::Data<AppState>,
    actor: Actor,
    job: web::Json<NewJob>,
) -> impl Responder {
    match state.job_handler.create(&actor.0, job.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => e.to_http_response(),
    }
}

#[put("/jobs/{id}")]
pub async fn update_job(
    state: web::Data<AppState>,
    actor: Actor,
    id: web::Path<i32>,
    changes: web::Json<UpdateJob>,
) -> impl Responder {
    match state
        .job_handler
        .update(&actor.0, id.into_inner(), changes.into_inner())
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => e.to_http_response(),
    }
}
