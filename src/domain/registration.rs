//! Registration input types.
//!
//! `RegistrationRequest` is what arrives on the wire; `Credentials` is the
//! same data once both fields are known to be present.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail};

use crate::config::{
    password_too_short_message, MIN_PASSWORD_LENGTH, MSG_CREDENTIALS_REQUIRED, MSG_INVALID_EMAIL,
};
use crate::errors::{AppError, AppResult};

/// User registration request
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// User password (minimum 6 characters)
    #[schema(example = "validpassword", min_length = 6)]
    pub password: Option<String>,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RegistrationRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Require both fields to be present and non-empty.
    pub fn into_credentials(self) -> AppResult<Credentials> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok(Credentials { email, password })
            }
            _ => Err(AppError::bad_request(MSG_CREDENTIALS_REQUIRED)),
        }
    }
}

/// Email and password, both present.
///
/// The `validate` attributes are the declarative rules applied after the
/// structural checks; see `ConstraintValidator`.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(
        email(message = "This value is not a valid email address."),
        length(max = 180, message = "This value is too long. It should have 180 characters or less.")
    )]
    pub email: String,
    #[validate(length(
        max = 4096,
        message = "This value is too long. It should have 4096 characters or less."
    ))]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Structural email check.
    pub fn ensure_valid_email(&self) -> AppResult<()> {
        if self.email.validate_email() {
            Ok(())
        } else {
            Err(AppError::bad_request(MSG_INVALID_EMAIL))
        }
    }

    /// Password length check, counted in characters rather than bytes.
    pub fn ensure_password_length(&self) -> AppResult<()> {
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(password_too_short_message()));
        }
        Ok(())
    }
}
