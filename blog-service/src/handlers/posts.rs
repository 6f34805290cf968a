use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::{
    dtos::{
        ApiResponse, ErrorResponse,
        posts::{CreatePostRequest, PostResponse, UpdatePostRequest},
    },
    middleware::AuthUser,
    startup::AppState,
    utils::ValidatedJson,
};

/// All posts, newest first. Public.
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "Posts, newest first")
    ),
    tag = "Posts"
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.list().await?;
    let data: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok((StatusCode::OK, Json(ApiResponse::ok(data))))
}

/// A single post by id. Public.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.posts.get(&id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(PostResponse::from(post)))))
}

/// Create a post owned by the authenticated caller.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .posts
        .create(req.title, req.content, user.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PostResponse::from(post))),
    ))
}

/// Update a post's title and content. Owner only.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the post", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .posts
        .update(&id, req.title, req.content, &user.user_id)
        .await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(PostResponse::from(post)))))
}

/// Delete a post. Owner only.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the post", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .posts
        .delete(&id, &user.user_id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<PostResponse>::message("Post deleted")),
    ))
}
