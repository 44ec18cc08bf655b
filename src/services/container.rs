//! Service Container - Centralized service access.
//!
//! Wires each service to its collaborators once at startup so handlers
//! only ever see trait objects.

use std::sync::Arc;

use super::{RegistrationService, Registrar};
use crate::domain::{Argon2Hasher, ConstraintValidator};
use crate::infra::UserStore;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get registration service
    fn registration(&self) -> Arc<dyn RegistrationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    registration_service: Arc<dyn RegistrationService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(registration_service: Arc<dyn RegistrationService>) -> Self {
        Self {
            registration_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let users = Arc::new(UserStore::new(db));
        let registration_service = Arc::new(Registrar::new(
            Arc::new(ConstraintValidator::new()),
            Arc::new(Argon2Hasher::new()),
            users,
        ));

        Self::new(registration_service)
    }
}

impl ServiceContainer for Services {
    fn registration(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }
}
