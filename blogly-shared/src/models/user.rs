//! User model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id SERIAL PRIMARY KEY,
//!     first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL,
//!     image_url TEXT NOT NULL
//! );
//! ```
//!
//! A user owns zero or more posts. Deleting a user cascades to their posts.
//!
//! # Example
//!
//! ```no_run
//! use blogly_shared::models::user::{CreateUser, User, DEFAULT_IMAGE_URL};
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! let user = User::create(&pool, CreateUser {
//!     first_name: "Ada".to_string(),
//!     last_name: "Lovelace".to_string(),
//!     image_url: None,
//! }).await?;
//!
//! assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Placeholder avatar stored when a user has no image
pub const DEFAULT_IMAGE_URL: &str =
    "https://icon-library.com/images/default-user-icon/default-user-icon-8.jpg";

/// A blog author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Auto-increment primary key
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Avatar URL, never empty
    pub image_url: String,
}

impl User {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub first_name: String,

    pub last_name: String,

    /// Avatar URL; `None` or blank stores `DEFAULT_IMAGE_URL`
    pub image_url: Option<String>,
}

/// Input for editing a user
///
/// Every field is replaced. A blank `image_url` resets to the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub first_name: String,

    pub last_name: String,

    pub image_url: Option<String>,
}

/// Substitutes `DEFAULT_IMAGE_URL` for a missing or blank image URL
pub fn image_url_or_default(image_url: Option<String>) -> String {
    match image_url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => DEFAULT_IMAGE_URL.to_string(),
    }
}

impl User {
    /// Inserts a new user and returns it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, image_url
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(image_url_or_default(data.image_url))
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, image_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists every user, ordered by last name then first name
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, image_url
            FROM users
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Replaces a user's editable fields
    ///
    /// # Returns
    ///
    /// The updated user, or None if no user has this id
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, image_url = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, image_url
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(image_url_or_default(data.image_url))
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user and, through the foreign key cascade, their posts
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the user didn't exist
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_image_url_defaults_when_missing() {
        assert_eq!(image_url_or_default(None), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_image_url_defaults_when_blank() {
        assert_eq!(image_url_or_default(Some(String::new())), DEFAULT_IMAGE_URL);
        assert_eq!(image_url_or_default(Some("   ".to_string())), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_image_url_kept_when_present() {
        let url = "https://example.com/ada.png".to_string();
        assert_eq!(image_url_or_default(Some(url.clone())), url);
    }
}
