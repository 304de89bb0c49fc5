use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshClaims};
use crate::domain::entities::user::User;
use crate::interfaces::repositories::token::TokenService;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
        }
    }
}

impl TokenService for JwtService {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            groups: user.groups.clone(),
            superuser: user.is_superuser,
            permissions: user.permissions.clone(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.refresh_expiration).timestamp() as usize;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.refresh_encoding).map_err(AuthError::from)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<RefreshClaims>(token, &self.keys.refresh_decoding, &validation)
            .map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

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

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "hr@example.com".into(),
            username: "hr_person".into(),
            password_hash: String::new(),
            groups: vec!["hr".into()],
            is_superuser: false,
            permissions: vec!["export_candidates".into()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn access_token_carries_groups_and_permissions() {
        let service = JwtService::new(&test_config());
        let user = test_user();

        let token = service.create_jwt(&user).unwrap();
        let decoded = service.decode_jwt(&token).unwrap();

        assert_eq!(decoded.claims.sub, user.id.to_string());
        assert_eq!(decoded.claims.groups, vec!["hr".to_string()]);
        assert_eq!(decoded.claims.permissions, vec!["export_candidates".to_string()]);
        assert!(!decoded.claims.superuser);
    }

    #[test]
    fn refresh_token_roundtrip() {
        let service = JwtService::new(&test_config());
        let id = Uuid::new_v4();

        let token = service.create_refresh_jwt(&id).unwrap();
        let decoded = service.decode_refresh_jwt(&token).unwrap();
        assert_eq!(decoded.claims.sub, id.to_string());
    }
}
