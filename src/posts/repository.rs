use sqlx::PgPool;
use uuid::Uuid;

use crate::posts::error::PostError;
use crate::posts::models::{Comment, CommentWithAuthor, Post, PostWithAuthor};

/// Repository for post operations
#[derive(Clone)]
pub struct PostsRepository {
    pool: PgPool,
}

impl PostsRepository {
    /// Create a new PostsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new post for the given author
    pub async fn create(
        &self,
        author_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Post, PostError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, title, content, created_at
            "#,
        )
        .bind(author_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// All posts joined with their author usernames, newest first
    pub async fn find_all_with_authors(&self) -> Result<Vec<PostWithAuthor>, PostError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.title, p.content, u.username AS author, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Check whether a post exists
    pub async fn exists(&self, post_id: Uuid) -> Result<bool, PostError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }
}

/// Repository for comment operations
#[derive(Clone)]
pub struct CommentsRepository {
    pool: PgPool,
}

impl CommentsRepository {
    /// Create a new CommentsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment on a post
    pub async fn create(
        &self,
        post_id: Uuid,
        author_id: i32,
        content: &str,
    ) -> Result<Comment, PostError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// All comments for the given posts, joined with author usernames,
    /// oldest first within each post
    pub async fn find_for_posts(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<CommentWithAuthor>, PostError> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.post_id, c.content, u.username AS author, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = ANY($1)
            ORDER BY c.created_at
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
