//! Application state - Dependency injection container.
//!
//! Handlers receive collaborators through this state rather than
//! reaching for globals.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{RegistrationService, ServiceContainer, Services};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration service
    pub registration_service: Arc<dyn RegistrationService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database.
    ///
    /// Services are wired through `Services::from_connection`.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());

        Self {
            registration_service: container.registration(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(registration_service: Arc<dyn RegistrationService>, database: Arc<Database>) -> Self {
        Self {
            registration_service,
            database,
        }
    }
}
