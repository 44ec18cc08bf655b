//! Registration handler.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::api::extractors::LenientJson;
use crate::api::AppState;
use crate::config::user_created_message;
use crate::domain::RegistrationRequest;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create registration routes
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Registration",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing fields, invalid email, short password or rule violation"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let user = state.registration_service.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(user_created_message(&user.email))),
    ))
}
