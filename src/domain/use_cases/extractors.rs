use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::entities::token::Claims;
use crate::domain::visibility::ActorContext;
use crate::errors::AuthError;

/// Extractor for the authenticated actor. Returns 401 when the request
/// carries no decoded claims.
/// Usage: add `actor: Actor` as a parameter to your handler function.
#[derive(Debug)]
pub struct Actor(pub ActorContext);

impl FromRequest for Actor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(actor_from_request(req).map(Actor))
    }
}

/// Extractor for actors with full candidate visibility (HR or superuser).
/// Returns 403 for other staff, 401 when unauthenticated.
#[derive(Debug)]
pub struct HrActor(pub ActorContext);

impl FromRequest for HrActor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = actor_from_request(req).and_then(|actor| {
            if actor.roles.sees_all_candidates() {
                Ok(HrActor(actor))
            } else {
                Err(AuthError::Forbidden("HR access required".into()).into())
            }
        });
        ready(result)
    }
}

fn actor_from_request(req: &HttpRequest) -> Result<ActorContext, actix_web::Error> {
    match req.extensions().get::<Claims>() {
        Some(claims) => ActorContext::from_claims(claims).map_err(Into::into),
        None => Err(AuthError::MissingCredentials.into()),
    }
}
