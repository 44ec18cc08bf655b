//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::registration_handler;
use crate::domain::{RegistrationRequest, Violation};
use crate::types::MessageResponse;

/// OpenAPI documentation for the registration service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registration",
        version = "0.1.0",
        description = "Registers users by email and password",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(registration_handler::register),
    components(schemas(RegistrationRequest, MessageResponse, Violation)),
    tags(
        (name = "Registration", description = "User registration")
    )
)]
pub struct ApiDoc;
