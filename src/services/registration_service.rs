//! Registration service - Turns a registration request into a stored user.
//!
//! Steps run in a fixed order and stop at the first failure:
//! presence, email format, password length, declarative rules,
//! hashing, persistence.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_EMAIL_TAKEN;
use crate::domain::{Credentials, NewUser, PasswordHasher, RegistrationRequest, User, UserValidator};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new user
    async fn register(&self, request: RegistrationRequest) -> AppResult<User>;
}

/// Concrete implementation of RegistrationService.
pub struct Registrar {
    validator: Arc<dyn UserValidator>,
    hasher: Arc<dyn PasswordHasher>,
    users: Arc<dyn UserRepository>,
}

impl Registrar {
    /// Create new registration service with its collaborators
    pub fn new(
        validator: Arc<dyn UserValidator>,
        hasher: Arc<dyn PasswordHasher>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            validator,
            hasher,
            users,
        }
    }
}

#[async_trait]
impl RegistrationService for Registrar {
    async fn register(&self, request: RegistrationRequest) -> AppResult<User> {
        let credentials = request
            .into_credentials()
            .inspect_err(|_| tracing::debug!("Registration rejected: missing credentials"))?;
        credentials.ensure_valid_email().inspect_err(|_| {
            tracing::debug!(email = %credentials.email, "Registration rejected: invalid email")
        })?;
        credentials.ensure_password_length().inspect_err(|_| {
            tracing::debug!(email = %credentials.email, "Registration rejected: password too short")
        })?;

        let violations = self.validator.validate(&credentials);
        if !violations.is_empty() {
            tracing::debug!(
                email = %credentials.email,
                count = violations.len(),
                "Registration rejected by validator"
            );
            return Err(AppError::Validation(violations));
        }

        let Credentials { email, password } = credentials;
        let password_hash = self.hash_off_runtime(password).await?;
        let new_user = NewUser::new(email, password_hash);

        match self.users.persist(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "User registered");
                Ok(user)
            }
            // The storage detail can echo the email back, so it is not logged
            Err(AppError::UniqueViolation(_)) => {
                tracing::warn!("Registration rejected: email already registered");
                Err(AppError::conflict(MSG_EMAIL_TAKEN))
            }
            Err(e) => Err(e),
        }
    }
}

impl Registrar {
    /// Hash on the blocking pool; Argon2 is CPU and memory bound.
    async fn hash_off_runtime(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hash task failed: {}", e)))?
    }
}
