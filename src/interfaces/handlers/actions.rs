use actix_web::{http::header, post, web, HttpResponse, Responder};

use crate::entities::candidate::{SelectedCandidates, SelectedResumes};
use crate::use_cases::extractors::{Actor, HrActor};
use crate::AppState;

/// Moves the selected resumes into the interview pipeline.
#[post("/candidates/promote")]
pub async fn promote_resumes(
    state: web::Data<AppState>,
    actor: HrActor,
    selection: web::Json<SelectedResumes>,
) -> impl Responder {
    match state
        .candidate_handler
        .promote(&actor.0, &selection.resume_ids)
        .await
    {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

/// Streams the selected candidates back as a CSV download.
#[post("/candidates/export")]
pub async fn export_candidates(
    state: web::Data<AppState>,
    actor: Actor,
    selection: web::Json<SelectedCandidates>,
) -> impl Responder {
    match state
        .candidate_handler
        .export(&actor.0, &selection.candidate_ids)
        .await
    {
        Ok((filename, bytes)) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ))
            .body(bytes),
        Err(e) => e.to_http_response(),
    }
}

/// Announces the selected candidates to the interviewer group webhook.
#[post("/candidates/notify")]
pub async fn notify_interviewers(
    state: web::Data<AppState>,
    actor: Actor,
    selection: web::Json<SelectedCandidates>,
) -> impl Responder {
    match state
        .notify_handler
        .notify(&actor.0, &selection.candidate_ids)
        .await
    {
        Ok(message) => HttpResponse::Ok().json(serde_json::json!({ "message": message })),
        Err(e) => e.to_http_response(),
    }
}
