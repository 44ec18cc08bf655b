//! Integration tests for the registration endpoint.
//!
//! The router is driven in-process with `oneshot`; persistence is an
//! in-memory fake and the database handle is a SeaORM mock connection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use user_registration::api::{create_router, AppState};
use user_registration::domain::{
    Argon2Hasher, ConstraintValidator, NewUser, PasswordHasher, User, UserValidator,
};
use user_registration::errors::{AppError, AppResult};
use user_registration::infra::{Database, UserRepository};
use user_registration::services::Registrar;

// =============================================================================
// Fakes
// =============================================================================

/// In-memory user store enforcing email uniqueness like the unique index does
#[derive(Default)]
struct InMemoryUsers {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUsers {
    fn stored_hash(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .map(|u| u.password_hash.clone())
    }

    fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn persist(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(AppError::UniqueViolation("uniq_users_email".to_string()));
        }
        let stored = User::new(Uuid::new_v4(), user.email.clone(), user.password_hash);
        users.insert(user.email, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }
}

/// Repository that always reports a duplicate email on insert
struct DuplicateEmailUsers;

#[async_trait]
impl UserRepository for DuplicateEmailUsers {
    async fn persist(&self, _user: NewUser) -> AppResult<User> {
        Err(AppError::UniqueViolation(
            "duplicate key value violates unique constraint \"uniq_users_email\"".to_string(),
        ))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Ok(None)
    }
}

/// Fast deterministic hasher so tests don't pay for Argon2 on every request
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        Ok(format!("hashed:{}", plain_text.len()))
    }

    fn verify(&self, plain_text: &str, hash: &str) -> bool {
        hash == format!("hashed:{}", plain_text.len())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn mock_database() -> Arc<Database> {
    Arc::new(Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
    ))
}

fn app_with(
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    validator: Arc<dyn UserValidator>,
) -> Router {
    let registrar = Registrar::new(validator, hasher, users);
    create_router(AppState::new(Arc::new(registrar), mock_database()))
}

fn app(users: Arc<dyn UserRepository>) -> Router {
    app_with(users, Arc::new(PrefixHasher), Arc::new(ConstraintValidator::new()))
}

async fn post_register(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    post_register(app, serde_json::to_vec(&body).unwrap()).await
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

// =============================================================================
// Validation Failures
// =============================================================================

#[tokio::test]
async fn test_register_with_missing_data() {
    let users = Arc::new(InMemoryUsers::default());
    let (status, body) = post_json(app(users.clone()), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(error_message(&body), "email and password are required");
    assert_eq!(users.len(), 0);
}

#[tokio::test]
async fn test_register_with_empty_array_body() {
    let (status, body) = post_register(app(Arc::new(InMemoryUsers::default())), "[]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "email and password are required");
}

#[tokio::test]
async fn test_register_with_malformed_json() {
    let (status, body) =
        post_register(app(Arc::new(InMemoryUsers::default())), "{\"email\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "email and password are required");
}

#[tokio::test]
async fn test_register_with_missing_password() {
    let (status, body) = post_json(
        app(Arc::new(InMemoryUsers::default())),
        json!({"email": "valid@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "email and password are required");
}

#[tokio::test]
async fn test_register_with_invalid_email() {
    let (status, body) = post_json(
        app(Arc::new(InMemoryUsers::default())),
        json!({"email": "invalid", "password": "valid"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "invalid email address");
}

#[tokio::test]
async fn test_register_with_short_password() {
    let (status, body) = post_json(
        app(Arc::new(InMemoryUsers::default())),
        json!({"email": "valid@example.com", "password": "short"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "password must be at least 6 characters long"
    );
}

#[tokio::test]
async fn test_register_with_rule_violation() {
    let users = Arc::new(InMemoryUsers::default());
    let (status, body) = post_json(
        app(users.clone()),
        json!({"email": "valid@example.com", "password": "p".repeat(4097)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["violations"][0]["field"], "password");
    assert_eq!(users.len(), 0);
}

// =============================================================================
// Success and Conflict
// =============================================================================

#[tokio::test]
async fn test_register_with_valid_data() {
    let users = Arc::new(InMemoryUsers::default());
    let (status, body) = post_json(
        app(users.clone()),
        json!({"email": "valid@example.com", "password": "validpassword"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"message": "the user valid@example.com as created successfully"})
    );
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_register_with_unique_constraint_violation() {
    let (status, body) = post_json(
        app(Arc::new(DuplicateEmailUsers)),
        json!({"email": "test@example.com", "password": "password"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(
        error_message(&body),
        "This email is already registered. Please use a different email address."
    );
}

#[tokio::test]
async fn test_register_twice_yields_conflict() {
    let app = app(Arc::new(InMemoryUsers::default()));
    let payload = json!({"email": "test@example.com", "password": "password"});

    let (first, _) = post_json(app.clone(), payload.clone()).await;
    let (second, body) = post_json(app, payload).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(
        error_message(&body),
        "This email is already registered. Please use a different email address."
    );
}

#[tokio::test]
async fn test_register_stores_argon2_hash_not_password() {
    let users = Arc::new(InMemoryUsers::default());
    let hasher = Arc::new(Argon2Hasher::new());
    let app = app_with(
        users.clone(),
        hasher.clone(),
        Arc::new(ConstraintValidator::new()),
    );

    let (status, _) = post_json(
        app,
        json!({"email": "valid@example.com", "password": "validpassword"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let hash = users.stored_hash("valid@example.com").unwrap();
    assert_ne!(hash, "validpassword");
    assert!(hasher.verify("validpassword", &hash));
}

// =============================================================================
// Ambient Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_reports_database_status() {
    let healthy = Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection(),
    );
    let registrar = Registrar::new(
        Arc::new(ConstraintValidator::new()),
        Arc::new(PrefixHasher),
        Arc::new(InMemoryUsers::default()),
    );
    let app = create_router(AppState::new(Arc::new(registrar), Arc::new(healthy)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let broken = Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Conn(RuntimeErr::Internal("refused".to_string()))])
            .into_connection(),
    );
    let registrar = Registrar::new(
        Arc::new(ConstraintValidator::new()),
        Arc::new(PrefixHasher),
        Arc::new(InMemoryUsers::default()),
    );
    let app = create_router(AppState::new(Arc::new(registrar), Arc::new(broken)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_openapi_document_lists_register() {
    let app = app(Arc::new(InMemoryUsers::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/register"]["post"].is_object());
}
