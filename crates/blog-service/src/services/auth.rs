//! Authentication service
//!
//! Handles account registration and login. Login issues the bearer token
//! that the auth gate later verifies.

use blog_common::auth::validate_password_strength;
use blog_core::entities::{normalize_email, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        validate_password_strength(&request.password)?;

        let user = User::new(request.email);
        if self.ctx.user_repo().email_exists(&user.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self.ctx.passwords().hash(&request.password)?;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(UserResponse::from(user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(self.ctx.passwords().verify_absent(&request.password))
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(self.ctx.passwords().verify_absent(&request.password))
            })?;

        if let Err(e) = self
            .ctx
            .passwords()
            .verify_or_error(&request.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        let access_token = self.ctx.token_codec().issue(user.id)?;
        info!(user_id = %user.id, "User logged in successfully");

        Ok(AuthResponse::new(
            access_token,
            self.ctx.token_codec().expires_in(),
            UserResponse::from(user),
        ))
    }
}
