use actix_web::{get, web, HttpResponse, Responder};

use crate::entities::user::{PublicUser, GROUP_INTERVIEWER};
use crate::repositories::user::UserRepository;
use crate::use_cases::extractors::HrActor;
use crate::AppState;

/// Interviewer roster for the assignment dropdowns.
#[get("/interviewers")]
pub async fn list_interviewers(state: web::Data<AppState>, _actor: HrActor) -> impl Responder {
    match state
        .auth_handler
        .user_repo
        .list_by_group(GROUP_INTERVIEWER)
        .await
    {
        Ok(users) => HttpResponse::Ok().json(
            users
                .into_iter()
                .map(PublicUser::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => e.to_http_response(),
    }
}
