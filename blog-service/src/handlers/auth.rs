use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use service_core::error::AppError;

use crate::{
    dtos::{
        ApiResponse, ErrorResponse,
        auth::{AuthData, LoginRequest, RegisterRequest, UserResponse},
    },
    middleware::AuthUser,
    startup::AppState,
    utils::ValidatedJson,
};

/// Register a new user and issue a bearer token.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthData),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
}

/// Login with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthData),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.auth.login(req).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(data))))
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let data = state
        .auth
        .current_user(&user.user_id)
        .await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(data))))
}
