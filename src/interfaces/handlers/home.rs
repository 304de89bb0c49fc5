use actix_web::{get, web, HttpResponse, Responder};

use crate::AppState;

/// The landing page is the job board itself.
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    match state.job_handler.list().await {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => e.to_http_response(),
    }
}
