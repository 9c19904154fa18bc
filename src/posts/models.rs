use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Domain model representing a blog post
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Domain model representing a comment on a post
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i32,
    pub post_id: Uuid,
    pub author_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post row joined with its author's username
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with its author's username
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub post_id: Uuid,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

/// Request DTO for creating a comment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

/// Response DTO for a comment with its author resolved to a username
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            content: comment.content,
            author: comment.author,
            created_at: comment.created_at,
        }
    }
}

/// Response DTO for a post with its comments
#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
}

/// Response DTO acknowledging post creation
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePostResponse {
    pub message: String,
    pub post_id: Uuid,
}

/// Response DTO acknowledging comment creation
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentCreatedResponse {
    pub message: String,
}
