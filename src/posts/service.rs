use std::collections::HashMap;

use uuid::Uuid;

use crate::posts::{
    error::PostError,
    models::{CommentResponse, CreateCommentRequest, CreatePostRequest, Post, PostResponse},
    repository::{CommentsRepository, PostsRepository},
};

/// Service for post and comment business logic
#[derive(Clone)]
pub struct PostService {
    posts_repo: PostsRepository,
    comments_repo: CommentsRepository,
}

impl PostService {
    /// Create a new PostService
    pub fn new(posts_repo: PostsRepository, comments_repo: CommentsRepository) -> Self {
        Self {
            posts_repo,
            comments_repo,
        }
    }

    /// Create a new post authored by the given user
    pub async fn create_post(
        &self,
        author_id: i32,
        request: CreatePostRequest,
    ) -> Result<Post, PostError> {
        let post = self
            .posts_repo
            .create(author_id, &request.title, &request.content)
            .await?;

        tracing::info!("User {} published post {}", author_id, post.id);
        Ok(post)
    }

    /// All posts with their comments, newest post first.
    /// Author ids are resolved to usernames for both posts and comments.
    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, PostError> {
        let posts = self.posts_repo.find_all_with_authors().await?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();
        let comments = self.comments_repo.find_for_posts(&post_ids).await?;

        // Group comments by post, preserving their oldest-first order
        let mut comments_by_post: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
        for comment in comments {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(comment.into());
        }

        let responses = posts
            .into_iter()
            .map(|post| {
                let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                PostResponse {
                    id: post.id,
                    title: post.title,
                    content: post.content,
                    author: post.author,
                    created_at: post.created_at,
                    comments,
                }
            })
            .collect();

        Ok(responses)
    }

    /// Add a comment to an existing post
    ///
    /// # Validation
    /// - The post must exist; commenting on an unknown post is a 404
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: i32,
        request: CreateCommentRequest,
    ) -> Result<(), PostError> {
        if !self.posts_repo.exists(post_id).await? {
            return Err(PostError::NotFound);
        }

        self.comments_repo
            .create(post_id, author_id, &request.content)
            .await?;

        tracing::info!("User {} commented on post {}", author_id, post_id);
        Ok(())
    }
}
