//! Tag pages
//!
//! # Endpoints
//!
//! - `GET /tags` - List tags
//! - `GET /tags/new` - New tag form
//! - `POST /tags/new` - Create tag, redirect to `/tags` (409 on duplicate name)
//! - `GET /tags/:id` - Tag detail with its posts
//! - `GET /tags/:id/edit` - Edit form
//! - `POST /tags/:id/edit` - Rename tag, redirect to `/tags`
//! - `POST /tags/:id/delete` - Delete tag, redirect to `/tags`

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    extract::EntityId,
    render::HtmlTemplate,
    routes::redirect_found,
};
use askama::Template;
use axum::{extract::State, response::Response, Form};
use axum_extra::extract::WithRejection;
use blogly_shared::models::{
    post::Post,
    tag::{Tag, TagInput},
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Field posted by the new and edit tag forms
#[derive(Debug, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

impl TagForm {
    fn trimmed(self) -> Self {
        TagForm {
            name: self.name.trim().to_string(),
        }
    }
}

impl From<TagForm> for TagInput {
    fn from(form: TagForm) -> Self {
        TagInput { name: form.name }
    }
}

#[derive(Template)]
#[template(path = "tags/index.html")]
pub struct TagListTemplate {
    pub tags: Vec<Tag>,
}

#[derive(Template)]
#[template(path = "tags/new.html")]
pub struct NewTagTemplate;

#[derive(Template)]
#[template(path = "tags/detail.html")]
pub struct TagDetailTemplate {
    pub tag: Tag,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "tags/edit.html")]
pub struct EditTagTemplate {
    pub tag: Tag,
}

async fn load_tag(pool: &PgPool, id: i32) -> AppResult<Tag> {
    Tag::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", id)))
}

/// Lists every tag by name
///
/// # Errors
///
/// - `500 Internal Server Error`: Database error
pub async fn list_tags(State(state): State<AppState>) -> AppResult<HtmlTemplate<TagListTemplate>> {
    let tags = Tag::list(&state.db).await?;
    Ok(HtmlTemplate(TagListTemplate { tags }))
}

/// Renders the empty tag form
pub async fn new_tag_form() -> HtmlTemplate<NewTagTemplate> {
    HtmlTemplate(NewTagTemplate)
}

/// Creates a tag and redirects to `/tags`
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form
/// - `409 Conflict`: A tag with this name already exists
/// - `422 Unprocessable Entity`: Name is blank
/// - `500 Internal Server Error`: Database error
pub async fn create_tag(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<TagForm>, AppError>,
) -> AppResult<Response> {
    let form = form.trimmed();
    form.validate()?;

    let tag = Tag::create(&state.db, form.into()).await?;
    info!(tag_id = tag.id, name = %tag.name, "Tag created");

    Ok(redirect_found("/tags"))
}

/// Shows a tag with the posts carrying it
///
/// # Errors
///
/// - `404 Not Found`: No tag with this id
/// - `500 Internal Server Error`: Database error
pub async fn show_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<TagDetailTemplate>> {
    let tag = load_tag(&state.db, id).await?;
    let posts = Post::list_for_tag(&state.db, tag.id).await?;

    Ok(HtmlTemplate(TagDetailTemplate { tag, posts }))
}

/// Renders the rename form
///
/// # Errors
///
/// - `404 Not Found`: No tag with this id
/// - `500 Internal Server Error`: Database error
pub async fn edit_tag_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<EditTagTemplate>> {
    let tag = load_tag(&state.db, id).await?;
    Ok(HtmlTemplate(EditTagTemplate { tag }))
}

/// Renames a tag and redirects to `/tags`
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form
/// - `404 Not Found`: No tag with this id
/// - `409 Conflict`: Another tag already has this name
/// - `422 Unprocessable Entity`: Name is blank
/// - `500 Internal Server Error`: Database error
pub async fn update_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    WithRejection(Form(form), _): WithRejection<Form<TagForm>, AppError>,
) -> AppResult<Response> {
    load_tag(&state.db, id).await?;
    let form = form.trimmed();
    form.validate()?;

    Tag::update(&state.db, id, form.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", id)))?;
    info!(tag_id = id, "Tag updated");

    Ok(redirect_found("/tags"))
}

/// Deletes a tag, detaching it from its posts, and redirects to `/tags`
///
/// # Errors
///
/// - `404 Not Found`: No tag with this id
/// - `500 Internal Server Error`: Database error
pub async fn delete_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    load_tag(&state.db, id).await?;

    Tag::delete(&state.db, id).await?;
    info!(tag_id = id, "Tag deleted");

    Ok(redirect_found("/tags"))
}
