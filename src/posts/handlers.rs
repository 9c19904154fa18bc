// HTTP handlers for post and comment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::posts::{
    error::PostError,
    models::{
        CommentCreatedResponse, CreateCommentRequest, CreatePostRequest, CreatePostResponse,
        PostResponse,
    },
};
use crate::AppState;

/// Handler for GET /api/posts
/// Retrieves all posts with their comments, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "List of all posts", body = Vec<PostResponse>),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    tag = "posts"
)]
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, PostError> {
    tracing::debug!("Fetching all posts");

    let posts = state.post_service.list_posts().await?;

    tracing::debug!("Retrieved {} posts", posts.len());
    Ok(Json(posts))
}

/// Handler for POST /api/posts
/// Creates a new post authored by the authenticated user
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = CreatePostResponse),
        (status = 400, description = "Invalid input data", body = String, example = json!({"message": "Title must be between 1 and 200 characters"})),
        (status = 401, description = "Missing or invalid token", body = String, example = json!({"message": "Missing authentication token"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), PostError> {
    request
        .validate()
        .map_err(|e| PostError::ValidationError(e.to_string()))?;

    let post = state.post_service.create_post(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post published successfully".to_string(),
            post_id: post.id,
        }),
    ))
}

/// Handler for POST /api/posts/:post_id/comments
/// Adds a comment to an existing post
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    params(
        ("post_id" = Uuid, Path, description = "Post ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created successfully", body = CommentCreatedResponse),
        (status = 400, description = "Invalid input data", body = String, example = json!({"message": "Content must not be empty"})),
        (status = 401, description = "Missing or invalid token", body = String, example = json!({"message": "Missing authentication token"})),
        (status = 404, description = "Post not found", body = String, example = json!({"message": "Post not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_comment_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), PostError> {
    request
        .validate()
        .map_err(|e| PostError::ValidationError(e.to_string()))?;

    state
        .post_service
        .add_comment(post_id, user.user_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            message: "Comment published successfully".to_string(),
        }),
    ))
}
