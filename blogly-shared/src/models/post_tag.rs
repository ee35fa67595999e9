//! Post/tag join table
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE posts_tags (
//!     post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
//!     tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
//!     PRIMARY KEY (post_id, tag_id)
//! );
//! ```
//!
//! These helpers take a `PgConnection` so the post model can run them in the
//! same transaction as the post insert or update.

use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

/// One post/tag association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

impl PostTag {
    /// Links `post_id` to every tag in `tag_ids`
    ///
    /// Ids that name no tag are skipped, as are links that already exist.
    ///
    /// # Returns
    ///
    /// Number of links inserted
    pub async fn link_all(
        conn: &mut PgConnection,
        post_id: i32,
        tag_ids: &[i32],
    ) -> Result<u64, sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO posts_tags (post_id, tag_id)
            SELECT $1, id FROM tags WHERE id = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(tag_ids)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Makes `tag_ids` the complete tag set of `post_id`
    pub async fn replace_for_post(
        conn: &mut PgConnection,
        post_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM posts_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *conn)
            .await?;

        Self::link_all(conn, post_id, tag_ids).await?;

        Ok(())
    }

    /// Lists the associations of one post
    pub async fn list_for_post(pool: &PgPool, post_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let links = sqlx::query_as::<_, PostTag>(
            "SELECT post_id, tag_id FROM posts_tags WHERE post_id = $1 ORDER BY tag_id",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;

        Ok(links)
    }
}
