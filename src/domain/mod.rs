//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod registration;
pub mod user;
pub mod validation;

pub use password::{Argon2Hasher, PasswordHasher};
pub use registration::{Credentials, RegistrationRequest};
pub use user::{NewUser, User};
pub use validation::{ConstraintValidator, UserValidator, Violation};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordHasher;
#[cfg(any(test, feature = "test-utils"))]
pub use validation::MockUserValidator;
