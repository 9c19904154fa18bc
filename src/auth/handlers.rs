// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
};
use crate::AppState;

/// Handler for POST /api/auth/register
/// Registers a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input or username already exists", body = String, example = json!({"message": "Username already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    tracing::debug!("Received registration request for username: {}", request.username);

    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .register(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Handler for POST /api/auth/login
/// Authenticates a user and returns a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = String, example = json!({"message": "Invalid username or password"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::debug!("Received login request for username: {}", request.username);

    let response = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    tracing::info!("Login successful for username: {}", response.username);
    Ok(Json(response))
}
