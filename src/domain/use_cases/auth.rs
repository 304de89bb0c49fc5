use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::token::AuthResponse;
use crate::domain::entities::user::{LoginUser, NewUser, NewUserResponse, User};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::token::TokenService;
use crate::interfaces::repositories::user::UserRepository;
use crate::infrastructure::auth::password::{hash_password, verify_password};

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub user_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub fn new(user_repo: R, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service,
        }
    }

    /// Registers a new user after validating the payload.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let id = self.user_repo.create_user(&user_insert).await?;
        Ok(NewUserResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs.
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(username = %user.username, "User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token.
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::infrastructure::auth::jwt::JwtService;
    use crate::interfaces::repositories::user::MockUserRepository;
    use crate::settings::{AppConfig, AppEnvironment};

    fn test_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            notify_webhook_url: None,
            allowed_hosts: vec!["127.0.0.1".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
            jwt_expiration_minutes: 15,
            refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".into(),
            refresh_token_exp_days: 7,
        }
    }

    fn stored_user(password: &str) -> User {
        let now = Utc::now();
        User {
            id: uuid::Uuid::new_v4(),
            email: "hr@example.com".into(),
            username: "hr_person".into(),
            password_hash: hash_password(password).unwrap(),
            groups: vec!["hr".into()],
            is_superuser: false,
            permissions: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn register_hashes_the_password_before_storing() {
        let mut repo = MockUserRepository::new();
        repo.expect_create_user()
            .withf(|insert| {
                insert.password_hash != "Sup3r$ecret" && insert.password_hash.starts_with("$argon2")
            })
            .returning(|_| Ok(uuid::Uuid::new_v4()));

        let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
        let response = handler
            .register(NewUser {
                email: "hr@example.com".into(),
                username: "hr_person".into(),
                password: "Sup3r$ecret".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "User created successfully");
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_email()
            .withf(|email| email == "hr@example.com")
            .returning(|_| Ok(Some(stored_user("Sup3r$ecret"))));

        let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
        let err = handler
            .login(LoginUser {
                email: "hr@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongCredentials));
    }

    #[tokio::test]
    async fn login_issues_tokens_carrying_the_role_claims() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("Sup3r$ecret"))));

        let jwt = JwtService::new(&test_config());
        let handler = AuthHandler::new(repo, jwt);
        let response = handler
            .login(LoginUser {
                email: "hr@example.com".into(),
                password: "Sup3r$ecret".into(),
            })
            .await
            .unwrap();

        let decoded = handler.token_service.decode_jwt(&response.access_token).unwrap();
        assert_eq!(decoded.claims.groups, vec!["hr".to_string()]);
        assert_eq!(response.token_type, "Bearer");
    }
}
