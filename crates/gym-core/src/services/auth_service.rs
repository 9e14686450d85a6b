// ============================================================================
// Gym Core - Authentication Service
// File: crates/gym-core/src/services/auth_service.rs
// ============================================================================
//! Admin registration, login and bearer token authentication

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use gym_security::{JwtService, PasswordService};
use gym_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, TOKEN_TYPE_BEARER};

use crate::domain::{Admin, NewAdmin};
use crate::error::DomainError;
use crate::repositories::AdminRepository;
use crate::time::Clock;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;

/// Authentication service for admin accounts
pub struct AuthService {
    admin_repo: Arc<dyn AdminRepository>,
    jwt: Arc<JwtService>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, jwt: Arc<JwtService>, clock: Arc<dyn Clock>) -> Self {
        Self { admin_repo, jwt, clock }
    }

    /// Register a new admin
    pub async fn register_admin(&self, username: &str, password: &str) -> Result<Admin, DomainError> {
        let username = username.trim();
        info!("Admin registration attempt for: {}", username);

        // 1. Validate input
        let username_len = username.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username_len) {
            return Err(DomainError::ValidationError(format!(
                "Username must be between {} and {} characters",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            )));
        }
        let password_len = password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password_len) {
            return Err(DomainError::ValidationError(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        // 2. Check if username already exists
        if self.admin_repo.find_by_username(username).await?.is_some() {
            warn!("Registration failed: username already exists: {}", username);
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }

        // 3. Hash password
        let hashed_password =
            PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 4. Save
        let admin = self
            .admin_repo
            .create(&NewAdmin {
                username: username.to_string(),
                hashed_password,
                created_at: self.clock.now(),
            })
            .await?;

        info!("Admin registered: {}", admin.username);
        Ok(admin)
    }

    /// Login with username and password. Unknown users and wrong passwords
    /// fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        let username = username.trim();
        info!("Login attempt for: {}", username);

        let Some(admin) = self.admin_repo.find_by_username(username).await? else {
            PasswordService::verify_absent(password);
            warn!("Login failed: unknown username: {}", username);
            return Err(DomainError::InvalidCredentials);
        };

        let password_valid = PasswordService::verify(password, &admin.hashed_password).map_err(|e| {
            error!("Stored password hash unreadable for {}: {}", admin.username, e);
            DomainError::InvalidCredentials
        })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        let now = self.clock.now();
        let issued = self
            .jwt
            .issue(&admin.username, now)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        if let Err(e) = self.admin_repo.record_login(admin.id, now).await {
            error!("Failed to update last login: {}", e);
        }

        info!("Login successful for: {}", admin.username);

        Ok(LoginResult {
            access_token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.access_token_expiry().num_seconds(),
        })
    }

    /// Resolve a bearer token to the admin it was issued to.
    pub async fn authenticate(&self, token: &str) -> Result<Admin, DomainError> {
        let claims = self.jwt.validate(token, self.clock.now()).map_err(|e| {
            warn!("Token rejected: {}", e);
            DomainError::InvalidToken
        })?;

        self.admin_repo
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!("Token rejected: subject {} no longer exists", claims.sub);
                DomainError::InvalidToken
            })
    }

    /// Create the configured bootstrap admin unless the username is taken.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, DomainError> {
        if self.admin_repo.find_by_username(username.trim()).await?.is_some() {
            info!("Bootstrap admin {} already present", username.trim());
            return Ok(false);
        }

        match self.register_admin(username, password).await {
            Ok(_) => Ok(true),
            // Another instance seeded it first
            Err(DomainError::UsernameAlreadyExists(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Token response in the OAuth2 password-flow shape
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::repositories::MockAdminRepository;
    use crate::time::FixedClock;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap()
    }

    fn service_at(repo: MockAdminRepository, at: DateTime<Utc>) -> AuthService {
        let jwt = JwtService::new(SECRET, "HS256", 30).unwrap();
        AuthService::new(Arc::new(repo), Arc::new(jwt), Arc::new(FixedClock(at)))
    }

    fn service(repo: MockAdminRepository) -> AuthService {
        service_at(repo, now())
    }

    fn stored_admin(password: &str) -> Admin {
        Admin {
            id: 1,
            username: "owner".to_string(),
            hashed_password: PasswordService::hash(password).unwrap(),
            created_at: now(),
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.username == "owner" && new.hashed_password.starts_with("$argon2id$"))
            .times(1)
            .returning(|new| {
                Ok(Admin {
                    id: 1,
                    username: new.username.clone(),
                    hashed_password: new.hashed_password.clone(),
                    created_at: new.created_at,
                    last_login: None,
                })
            });

        let admin = service(repo).register_admin(" owner ", "correct horse").await.unwrap();

        assert_eq!(admin.username, "owner");
        assert!(PasswordService::verify("correct horse", &admin.hashed_password).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_admin("correct horse"))));
        repo.expect_create().never();

        let err = service(repo).register_admin("owner", "another pass").await.unwrap_err();

        assert!(matches!(err, DomainError::UsernameAlreadyExists(name) if name == "owner"));
    }

    #[tokio::test]
    async fn test_register_rejects_short_input() {
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().never();

        let svc = service(repo);
        assert!(matches!(
            svc.register_admin("ab", "correct horse").await,
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            svc.register_admin("owner", "short").await,
            Err(DomainError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_issues_bearer_token_and_records_login() {
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username()
            .withf(|name| name == "owner")
            .returning(move |_| Ok(Some(admin.clone())));
        repo.expect_record_login()
            .withf(|id, at| *id == 1 && *at == now())
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(repo).login("owner", "correct horse").await.unwrap();

        assert_eq!(result.token_type, "bearer");
        assert_eq!(result.expires_in, 1800);
        let claims = JwtService::new(SECRET, "HS256", 30)
            .unwrap()
            .validate(&result.access_token, now())
            .unwrap();
        assert_eq!(claims.sub, "owner");
    }

    #[tokio::test]
    async fn test_login_survives_last_login_failure() {
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().returning(move |_| Ok(Some(admin.clone())));
        repo.expect_record_login()
            .returning(|_, _| Err(DomainError::DatabaseError("connection reset".into())));

        assert!(service(repo).login("owner", "correct horse").await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username()
            .withf(|name| name == "owner")
            .returning(move |_| Ok(Some(admin.clone())));
        repo.expect_find_by_username()
            .withf(|name| name == "ghost")
            .returning(|_| Ok(None));
        repo.expect_record_login().never();

        let svc = service(repo);
        let wrong = svc.login("owner", "wrong horse").await.unwrap_err();
        let unknown = svc.login("ghost", "correct horse").await.unwrap_err();

        assert!(matches!(wrong, DomainError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_unknown_user_still_pays_for_argon2() {
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username()
            .withf(|name| name == "owner")
            .returning(move |_| Ok(Some(admin.clone())));
        repo.expect_find_by_username()
            .withf(|name| name == "ghost")
            .returning(|_| Ok(None));

        let svc = service(repo);
        // warm the placeholder hash
        let _ = svc.login("ghost", "warm up").await;

        let started = std::time::Instant::now();
        let _ = svc.login("owner", "wrong horse").await;
        let wrong_password = started.elapsed();

        let started = std::time::Instant::now();
        let _ = svc.login("ghost", "wrong horse").await;
        let unknown_user = started.elapsed();

        assert!(unknown_user * 4 >= wrong_password, "{unknown_user:?} vs {wrong_password:?}");
    }

    #[tokio::test]
    async fn test_authenticate_resolves_subject() {
        let token = JwtService::new(SECRET, "HS256", 30)
            .unwrap()
            .issue("owner", now())
            .unwrap()
            .token;
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().returning(move |_| Ok(Some(admin.clone())));

        let resolved = service_at(repo, now() + Duration::minutes(10))
            .authenticate(&token)
            .await
            .unwrap();

        assert_eq!(resolved.username, "owner");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_expired_token() {
        let token = JwtService::new(SECRET, "HS256", 30)
            .unwrap()
            .issue("owner", now())
            .unwrap()
            .token;
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().never();

        let err = service_at(repo, now() + Duration::minutes(31))
            .authenticate(&token)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deleted_subject() {
        let token = JwtService::new(SECRET, "HS256", 30)
            .unwrap()
            .issue("former", now())
            .unwrap()
            .token;
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let err = service(repo).authenticate(&token).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let admin = stored_admin("correct horse");
        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_username().returning(move |_| Ok(Some(admin.clone())));
        repo.expect_create().never();

        let created = service(repo).ensure_admin("owner", "correct horse").await.unwrap();

        assert!(!created);
    }
}
