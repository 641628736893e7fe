//! Authentication service.
//!
//! Stateless JWT auth: register/login issue an HS256 access token whose
//! claims carry the user id, email and role. Password-reset and
//! email-verification flows use short-lived single-purpose tokens; the
//! reset token is additionally stored SHA-256-hashed on the user row so
//! it can only be redeemed once.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator, config::AuthConfig};
use wayfare_db::{entities::user, repositories::UserRepository};

use super::mailer::Mailer;

/// Access-token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

/// Single-purpose token claims (password reset, email verification).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurposeClaims {
    /// User id.
    pub sub: String,
    /// `reset` or `verify`.
    pub purpose: String,
    pub exp: i64,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 256))]
    pub full_name: String,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    /// Requested role; defaults to `user`. `admin` cannot be requested.
    pub role: Option<String>,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Input for the forgot-password flow.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordInput {
    #[validate(email)]
    pub email: String,
}

/// Input for redeeming a reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordInput {
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub email_verified: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            phone_number: u.phone_number,
            avatar_url: u.avatar_url,
            role: u.role,
            email_verified: u.email_verified,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// A user plus a freshly issued token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    mailer: Option<Mailer>,
    config: AuthConfig,
    id_gen: IdGenerator,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, mailer: Option<Mailer>, config: AuthConfig) -> Self {
        Self {
            user_repo,
            mailer,
            config,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account and issue an access token.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let role = match input.role.as_deref() {
            None | Some("user") => "user",
            Some(role @ ("guide" | "agency")) => role,
            Some(other) => {
                return Err(AppError::Validation(format!("Unknown role: {other}")));
            }
        };

        if self.user_repo.email_taken(&input.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let now = chrono::Utc::now();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            full_name: Set(input.full_name),
            phone_number: Set(input.phone_number),
            avatar_url: Set(None),
            role: Set(role.to_string()),
            email_verified: Set(false),
            reset_token_hash: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(model).await?;

        if let Some(mailer) = &self.mailer {
            let token = self.issue_purpose_token(&user.id, "verify")?;
            // Verification mail failure must not fail registration.
            if let Err(e) = mailer.send_verification(&user.email, &token).await {
                tracing::warn!(error = %e, "Failed to send verification mail");
            }
        }

        let token = self.issue_token(&user)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Authenticate by email and password, issuing an access token.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Issue a fresh access token for an already-authenticated user.
    pub async fn refresh(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        self.issue_token(&user)
    }

    /// Get the profile behind a set of claims.
    pub async fn me(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self.user_repo.get_by_id(user_id).await?;
        Ok(user.into())
    }

    /// Start the password-reset flow. Always succeeds from the caller's
    /// point of view so the endpoint does not leak which emails exist;
    /// the error comes back only when the account is genuinely missing.
    pub async fn forgot_password(&self, input: ForgotPasswordInput) -> AppResult<()> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::UserNotFound(input.email.clone()))?;

        let token = self.issue_purpose_token(&user.id, "reset")?;

        let mut active: user::ActiveModel = user.clone().into();
        active.reset_token_hash = Set(Some(hash_token(&token)));
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.user_repo.update(active).await?;

        if let Some(mailer) = &self.mailer {
            mailer.send_password_reset(&user.email, &token).await?;
        }

        Ok(())
    }

    /// Redeem a reset token and set a new password.
    pub async fn reset_password(&self, input: ResetPasswordInput) -> AppResult<()> {
        input.validate()?;

        let claims = self.verify_purpose_token(&input.token, "reset")?;
        let user = self.user_repo.get_by_id(&claims.sub).await?;

        // The stored hash ties the token to its single outstanding issue.
        let stored = user.reset_token_hash.clone().ok_or(AppError::Unauthorized)?;
        if stored != hash_token(&input.token) {
            return Err(AppError::Unauthorized);
        }

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(hash_password(&input.new_password)?);
        active.reset_token_hash = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Redeem an email-verification token.
    pub async fn verify_email(&self, token: &str) -> AppResult<()> {
        let claims = self.verify_purpose_token(token, "verify")?;
        let user = self.user_repo.get_by_id(&claims.sub).await?;

        let mut active: user::ActiveModel = user.into();
        active.email_verified = Set(true);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Decode and validate an access token.
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    fn issue_token(&self, user: &user::Model) -> AppResult<String> {
        let exp = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::seconds(self.config.token_expiry_secs))
            .unwrap_or_else(chrono::Utc::now)
            .timestamp();

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp,
        };

        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    fn issue_purpose_token(&self, user_id: &str, purpose: &str) -> AppResult<String> {
        let exp = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::seconds(self.config.reset_expiry_secs))
            .unwrap_or_else(chrono::Utc::now)
            .timestamp();

        let claims = PurposeClaims {
            sub: user_id.to_string(),
            purpose: purpose.to_string(),
            exp,
        };

        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    fn verify_purpose_token(&self, token: &str, purpose: &str) -> AppResult<PurposeClaims> {
        let key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let claims = decode::<PurposeClaims>(token, &key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)?;

        if claims.purpose != purpose {
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// SHA-256 a token for at-rest storage.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
            token_expiry_secs: 3600,
            reset_expiry_secs: 600,
        }
    }

    fn test_user(id: &str, email: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: hash_password("correct horse").unwrap(),
            full_name: "Test User".to_string(),
            phone_number: None,
            avatar_url: None,
            role: "user".to_string(),
            email_verified: false,
            reset_token_hash: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> AuthService {
        AuthService::new(UserRepository::new(db), None, test_auth_config())
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_token_roundtrip() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);
        let user = test_user("u1", "a@example.com");

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_expired_token_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let mut config = test_auth_config();
        config.token_expiry_secs = -120;
        let service = AuthService::new(UserRepository::new(db), None, config);

        let token = service.issue_token(&test_user("u1", "a@example.com")).unwrap();
        assert!(matches!(
            service.verify_token(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_purpose_token_rejects_wrong_purpose() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let token = service.issue_purpose_token("u1", "verify").unwrap();
        assert!(service.verify_purpose_token(&token, "reset").is_err());
        assert!(service.verify_purpose_token(&token, "verify").is_ok());
    }

    #[test]
    fn test_hash_token_stable() {
        assert_eq!(hash_token("abc"), hash_token("abc"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
        assert_eq!(hash_token("abc").len(), 64);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        let result = service
            .login(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "whatever1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let user = test_user("u1", "a@example.com");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = service_with(db);

        let result = service
            .login(LoginInput {
                email: "a@example.com".to_string(),
                password: "wrong password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        // email_taken -> count query returning 1
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::from(1_i64),
                }]])
                .into_connection(),
        );
        let service = service_with(db);

        let result = service
            .register(RegisterInput {
                email: "a@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "A".to_string(),
                phone_number: None,
                role: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_register_input_validation() {
        let input = RegisterInput {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            full_name: "A".to_string(),
            phone_number: None,
            role: None,
        };
        assert!(input.validate().is_err());

        let input = RegisterInput {
            email: "a@example.com".to_string(),
            password: "short".to_string(),
            full_name: "A".to_string(),
            phone_number: None,
            role: None,
        };
        assert!(input.validate().is_err());
    }
}
