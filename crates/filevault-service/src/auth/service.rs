//! Registration, login, and token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use filevault_auth::{JwtDecoder, JwtEncoder, PasswordHasher, TokenPair};
use filevault_core::error::AppError;
use filevault_database::repositories::UserRepository;
use filevault_entity::user::{CreateUser, User};

/// Handles account creation and credential exchange.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

/// Data for creating an account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub username: String,
    /// Login email, unique across the system.
    pub email: String,
    /// Plaintext password; hashed before it is stored.
    pub password: String,
}

/// Login credentials.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: User,
    /// Fresh access + refresh token pair.
    pub tokens: TokenPair,
}

/// Successful refresh result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RefreshResponse {
    /// New short-lived access token.
    pub access_token: String,
    /// Its expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Registers a new account. Duplicate emails are a conflict.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        let email = req.email.trim().to_lowercase();
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// An unknown email and a wrong password produce the same error; the
    /// response never reveals which half was wrong.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(req.email.trim())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let valid = self.hasher.verify_password(&req.password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse { user, tokens })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Access tokens are rejected here; only refresh-typed claims pass.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        // The account may have been deleted since the token was issued.
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        let (access_token, access_expires_at) =
            self.encoder.generate_access_token(user.id, &user.username)?;

        Ok(RefreshResponse {
            access_token,
            access_expires_at,
        })
    }
}
