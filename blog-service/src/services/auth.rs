use std::sync::Arc;

use crate::{
    dtos::auth::{AuthData, LoginRequest, RegisterRequest, UserResponse},
    models::User,
    services::{JwtService, ServiceError, store::UserStore},
    utils::password::{Password, hash_password, verify_against_reference, verify_password},
};
use service_core::error::AppError;

/// Credential store and token issuance: registration, login, profile fetch.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthData, ServiceError> {
        if self
            .users
            .find_by_email(&req.email)
            .await
            .map_err(ServiceError::Store)?
            .is_some()
        {
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&Password::new(req.password))
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Password hashing error: {}", e)))?;

        let user = User::new(req.name, req.email, password_hash);

        // The unique email index closes the window left by the lookup above;
        // a concurrent duplicate surfaces here as a conflict.
        self.users.insert(&user).await.map_err(|e| match e {
            AppError::Conflict(_) => ServiceError::EmailAlreadyRegistered,
            other => ServiceError::Store(other),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        let token = self.jwt.issue(&user.id).map_err(ServiceError::Internal)?;

        Ok(AuthData {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthData, ServiceError> {
        let password = Password::new(req.password);

        let user = match self
            .users
            .find_by_email(&req.email)
            .await
            .map_err(ServiceError::Store)?
        {
            Some(user) => user,
            None => {
                // Unknown email burns a hash verification so this branch is
                // not cheaper than a wrong password.
                verify_against_reference(&password);
                return Err(ServiceError::InvalidCredentials);
            }
        };

        verify_password(&password, &user.password_hash)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        let token = self.jwt.issue(&user.id).map_err(ServiceError::Internal)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthData {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }

    pub async fn current_user(&self, user_id: &str) -> Result<UserResponse, ServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::Store)?
            .ok_or(ServiceError::UserNotFound)?;

        Ok(UserResponse::from(user))
    }
}
