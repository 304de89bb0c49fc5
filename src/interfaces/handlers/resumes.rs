use actix_web::{get, post, web, HttpResponse, Responder};

use crate::entities::resume::{NewResume, ResumePrefillQuery};
use crate::use_cases::extractors::{Actor, HrActor};
use crate::AppState;

/// Pre-fills the submission form from job-posting link parameters.
#[get("/resumes/new")]
pub async fn resume_prefill(
    state: web::Data<AppState>,
    _actor: Actor,
    query: web::Query<ResumePrefillQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(state.resume_handler.prefill(query.into_inner()))
}

#[post("/resumes")]
pub async fn submit_resume(
    state: web::Data<AppState>,
    actor: Actor,
    form: web::Json<NewResume>,
) -> impl Responder {
    match state.resume_handler.submit(&actor.0, form.into_inner()).await {
        Ok(resume) => HttpResponse::Created().json(serde_json::json!({
            "resume": resume,
            "next": "/joblist"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("/resumes/{id}")]
pub async fn resume_detail(
    state: web::Data<AppState>,
    _actor: HrActor,
    id: web::Path<i32>,
) -> impl Responder {
    match state.resume_handler.detail(id.into_inner()).await {
        Ok(resume) => HttpResponse::Ok().json(resume),
        Err(e) => e.to_http_response(),
    }
}
