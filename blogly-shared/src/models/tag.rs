//! Tag model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tags (
//!     id SERIAL PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     CONSTRAINT tags_name_key UNIQUE (name)
//! );
//! ```
//!
//! Inserting or renaming to an existing name fails with a unique violation
//! on `tags_name_key`.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A label that can be attached to any number of posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i32,

    /// Unique tag name
    pub name: String,
}

/// Input for creating or renaming a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInput {
    pub name: String,
}

impl Tag {
    /// Inserts a new tag
    ///
    /// # Errors
    ///
    /// Returns a database error if the name is already taken
    pub async fn create(pool: &PgPool, data: TagInput) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
        )
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(tag)
    }

    /// Lists every tag by name
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(pool)
            .await?;

        Ok(tags)
    }

    /// Lists the tags attached to a post
    pub async fn list_for_post(pool: &PgPool, post_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN posts_tags pt ON pt.tag_id = t.id
            WHERE pt.post_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Renames a tag
    ///
    /// # Returns
    ///
    /// The updated tag, or None if no tag has this id
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: TagInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(data.name)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Deletes a tag; its post links go with it
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
