use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{
    domain::visibility::RoleSet, entities::token::Claims, errors::AuthError,
    interfaces::repositories::token::TokenService, AppState,
};

pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path();
            let method = req.method().as_str();

            if is_public_route(path, method) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingCredentials) => {
                    tracing::warn!(path, "Missing or invalid credentials");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Missing or invalid credentials"
                        })),
                    ));
                }
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Token has expired"
                        })),
                    ));
                }
                Err(_) => {
                    tracing::warn!(path, "Failed to decode JWT");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Invalid token"
                        })),
                    ));
                }
            };

            if let Err(forbidden_response) = enforce_staff_access(path, &claims) {
                return Ok(custom_error_response(req, forbidden_response));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

/// The job board and the auth endpoints are the only anonymous surface.
fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if method == "GET" && (path == "/" || path == "/joblist" || path.starts_with("/job/")) {
        return true;
    }

    matches!(
        (path, method),
        ("/auth/register", "POST") | ("/auth/login", "POST") | ("/auth/refresh-token", "POST")
    )
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

/// The admin surface requires a staff relation: superuser or membership in
/// one of the staff groups. Finer checks (row scope, field policy, action
/// grants) happen in the workflow layer.
fn enforce_staff_access(path: &str, claims: &Claims) -> Result<(), HttpResponse> {
    if !path.starts_with("/admin") {
        return Ok(());
    }

    let roles = RoleSet::resolve(&claims.groups, claims.superuser, &claims.permissions);
    if roles.is_staff() {
        return Ok(());
    }

    tracing::warn!(path, username = %claims.username, "Staff access required");
    Err(HttpResponse::Forbidden().json(serde_json::json!({
        "error": "Staff access required"
    })))
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::is_public_route;

    #[test]
    fn board_and_auth_routes_are_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/joblist", "GET"));
        assert!(is_public_route("/job/3", "GET"));
        assert!(is_public_route("/auth/login", "POST"));
        assert!(is_public_route("/auth/register", "POST"));
        assert!(is_public_route("/auth/refresh-token", "POST"));
    }

    #[test]
    fn admin_and_resume_routes_are_not_public() {
        assert!(!is_public_route("/admin/candidates", "GET"));
        assert!(!is_public_route("/resumes", "POST"));
        assert!(!is_public_route("/joblist", "POST"));
    }
}
