use actix_web::{get, patch, put, web, HttpResponse, Responder};
use serde_json::{Map, Value};

use crate::entities::candidate::{AssignInterviewers, CandidateFilters};
use crate::use_cases::extractors::{Actor, HrActor};
use crate::AppState;

#[get("/candidates")]
pub async fn list_candidates(
    state: web::Data<AppState>,
    actor: Actor,
    filters: web::Query<CandidateFilters>,
) -> impl Responder {
    match state.candidate_handler.list(&actor.0, &filters.into_inner()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => e.to_http_response(),
    }
}

#[get("/candidates/{id}")]
pub async fn candidate_detail(
    state: web::Data<AppState>,
    actor: Actor,
    id: web::Path<i32>,
) -> impl Responder {
    match state.candidate_handler.detail(&actor.0, id.into_inner()).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => e.to_http_response(),
    }
}

#[put("/candidates/{id}")]
pub async fn update_candidate(
    state: web::Data<AppState>,
    actor: Actor,
    id: web::Path<i32>,
    changes: web::Json<Map<String, Value>>,
) -> impl Responder {
    match state
        .candidate_handler
        .update(&actor.0, id.into_inner(), changes.into_inner())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => e.to_http_response(),
    }
}

/// Inline reassignment of the round interviewers from the list view.
#[patch("/candidates/{id}/interviewers")]
pub async fn assign_interviewers(
    state: web::Data<AppState>,
    actor: HrActor,
    id: web::Path<i32>,
    assignment: web::Json<AssignInterviewers>,
) -> impl Responder {
    match state
        .candidate_handler
        .assign_interviewers(&actor.0, id.into_inner(), assignment.into_inner())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => e.to_http_response(),
    }
}
