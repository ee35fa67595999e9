//! Post model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE posts (
//!     id SERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     content TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
//! );
//! ```
//!
//! Creating or editing a post writes the post row and its tag links in one
//! transaction. The owning user never changes after creation.
//!
//! # Example
//!
//! ```no_run
//! use blogly_shared::models::post::{CreatePost, Post};
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool, user_id: i32) -> Result<(), sqlx::Error> {
//! let post = Post::create(&pool, CreatePost {
//!     user_id,
//!     title: "First post".to_string(),
//!     content: "Hello!".to_string(),
//!     tag_ids: vec![],
//! }).await?;
//!
//! let posts = Post::list_for_user(&pool, user_id).await?;
//! assert!(posts.iter().any(|p| p.id == post.id));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::post_tag::PostTag;

/// A blog post owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,

    pub title: String,

    pub content: String,

    /// When the post was created
    pub created_at: DateTime<Utc>,

    /// Owning user
    pub user_id: i32,
}

impl Post {
    /// Human-readable creation time, e.g. "Mon Jan 6 2025, 3:04 PM"
    pub fn friendly_date(&self) -> String {
        self.created_at.format("%a %b %-d %Y, %-I:%M %p").to_string()
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Owner; must reference an existing user
    pub user_id: i32,

    pub title: String,

    pub content: String,

    /// Tags to attach; unknown ids are ignored
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Input for editing a post
///
/// `tag_ids` replaces the post's whole tag set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePost {
    pub title: String,

    pub content: String,

    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

impl Post {
    /// Inserts a post and links its tags
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if `user_id` names no user. Nothing is
    /// written when any statement fails.
    pub async fn create(pool: &PgPool, data: CreatePost) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, created_at, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await?;

        PostTag::link_all(&mut tx, post.id, &data.tag_ids).await?;

        tx.commit().await?;

        Ok(post)
    }

    /// Finds a post by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, user_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Lists a user's posts, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, user_id
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Lists the posts carrying a tag, newest first
    pub async fn list_for_tag(pool: &PgPool, tag_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, p.user_id
            FROM posts p
            JOIN posts_tags pt ON pt.post_id = p.id
            WHERE pt.tag_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Replaces a post's title, content and tags; `user_id` is left alone
    ///
    /// # Returns
    ///
    /// The updated post, or None if no post has this id
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdatePost,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            RETURNING id, title, content, created_at, user_id
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.content)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(post) = post else {
            return Ok(None);
        };

        PostTag::replace_for_post(&mut tx, post.id, &data.tag_ids).await?;

        tx.commit().await?;

        Ok(Some(post))
    }

    /// Deletes a post and its tag links
    ///
    /// # Returns
    ///
    /// True if a row was deleted
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
