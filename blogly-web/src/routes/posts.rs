//! Post pages
//!
//! # Endpoints
//!
//! - `GET /users/:id/posts/new` - New post form for a user
//! - `POST /users/:id/posts/new` - Create post, redirect to `/users/:id`
//! - `GET /posts/:id` - Post detail
//! - `GET /posts/:id/edit` - Edit form
//! - `POST /posts/:id/edit` - Apply edit, redirect to the owner's page
//! - `POST /posts/:id/delete` - Delete post, redirect to the owner's page
//!
//! The post forms submit one `tag_ids` field per checked tag, so they are
//! parsed with `axum_extra`'s form extractor, which collects repeated keys.

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    extract::EntityId,
    render::HtmlTemplate,
    routes::{redirect_found, users::load_user},
};
use askama::Template;
use axum::{extract::State, response::Response};
use axum_extra::extract::{Form, WithRejection};
use blogly_shared::models::{
    post::{CreatePost, Post, UpdatePost},
    tag::Tag,
    user::User,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Fields posted by the new and edit post forms
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    /// Checked tags
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

impl PostForm {
    /// Strips surrounding whitespace, so a blank title or body fails validation
    fn trimmed(self) -> Self {
        PostForm {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            tag_ids: self.tag_ids,
        }
    }
}

/// A tag checkbox on the post forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

impl TagOption {
    /// One option per tag, checked when its id is in `selected`
    pub fn from_tags(tags: Vec<Tag>, selected: &[Tag]) -> Vec<Self> {
        tags.into_iter()
            .map(|tag| TagOption {
                checked: selected.iter().any(|s| s.id == tag.id),
                id: tag.id,
                name: tag.name,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "posts/new.html")]
pub struct NewPostTemplate {
    pub user: User,
    pub tags: Vec<TagOption>,
}

#[derive(Template)]
#[template(path = "posts/detail.html")]
pub struct PostDetailTemplate {
    pub post: Post,
    pub author: User,
    pub tags: Vec<Tag>,
}

#[derive(Template)]
#[template(path = "posts/edit.html")]
pub struct EditPostTemplate {
    pub post: Post,
    pub tags: Vec<TagOption>,
}

/// Loads a post or fails with 404
async fn load_post(pool: &PgPool, id: i32) -> AppResult<Post> {
    Post::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
}

/// Renders the new post form for a user, with every tag unchecked
///
/// # Errors
///
/// - `404 Not Found`: No user with this id
/// - `500 Internal Server Error`: Database error
pub async fn new_post_form(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> AppResult<HtmlTemplate<NewPostTemplate>> {
    let user = load_user(&state.db, user_id).await?;
    let tags = TagOption::from_tags(Tag::list(&state.db).await?, &[]);

    Ok(HtmlTemplate(NewPostTemplate { user, tags }))
}

/// Creates a post under a user, links the checked tags, and redirects to the
/// user's page
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form or a `tag_ids` value is not an integer
/// - `404 Not Found`: No user with this id
/// - `422 Unprocessable Entity`: Title or content is blank
/// - `500 Internal Server Error`: Database error
pub async fn create_post(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    WithRejection(Form(form), _): WithRejection<Form<PostForm>, AppError>,
) -> AppResult<Response> {
    let user = load_user(&state.db, user_id).await?;
    let form = form.trimmed();
    form.validate()?;

    let post = Post::create(
        &state.db,
        CreatePost {
            user_id: user.id,
            title: form.title,
            content: form.content,
            tag_ids: form.tag_ids,
        },
    )
    .await?;
    info!(post_id = post.id, user_id = user.id, "Post created");

    Ok(redirect_found(format!("/users/{}", user.id)))
}

/// Shows a post with its author and tags
///
/// # Errors
///
/// - `404 Not Found`: No post with this id
/// - `500 Internal Server Error`: Database error
pub async fn show_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<PostDetailTemplate>> {
    let post = load_post(&state.db, id).await?;
    let author = load_user(&state.db, post.user_id).await?;
    let tags = Tag::list_for_post(&state.db, post.id).await?;

    Ok(HtmlTemplate(PostDetailTemplate { post, author, tags }))
}

/// Renders the edit form with the post's current tags checked
///
/// # Errors
///
/// - `404 Not Found`: No post with this id
/// - `500 Internal Server Error`: Database error
pub async fn edit_post_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<EditPostTemplate>> {
    let post = load_post(&state.db, id).await?;
    let current = Tag::list_for_post(&state.db, post.id).await?;
    let tags = TagOption::from_tags(Tag::list(&state.db).await?, &current);

    Ok(HtmlTemplate(EditPostTemplate { post, tags }))
}

/// Replaces a post's title, content and tag set, then redirects to the
/// owner's page. The owner and creation time never change.
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form or a `tag_ids` value is not an integer
/// - `404 Not Found`: No post with this id
/// - `422 Unprocessable Entity`: Title or content is blank
/// - `500 Internal Server Error`: Database error
pub async fn update_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    WithRejection(Form(form), _): WithRejection<Form<PostForm>, AppError>,
) -> AppResult<Response> {
    load_post(&state.db, id).await?;
    let form = form.trimmed();
    form.validate()?;

    let post = Post::update(
        &state.db,
        id,
        UpdatePost {
            title: form.title,
            content: form.content,
            tag_ids: form.tag_ids,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
    info!(post_id = post.id, "Post updated");

    Ok(redirect_found(format!("/users/{}", post.user_id)))
}

/// Deletes a post and redirects to its owner's page
///
/// # Errors
///
/// - `404 Not Found`: No post with this id
/// - `500 Internal Server Error`: Database error
pub async fn delete_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    let post = load_post(&state.db, id).await?;

    Post::delete(&state.db, post.id).await?;
    info!(post_id = post.id, user_id = post.user_id, "Post deleted");

    Ok(redirect_found(format!("/users/{}", post.user_id)))
}
