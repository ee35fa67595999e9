//! User pages
//!
//! # Endpoints
//!
//! - `GET /` - Redirect to the user list
//! - `GET /users` - List users
//! - `GET /users/new` - New user form
//! - `POST /users/new` - Create user, redirect to `/users`
//! - `GET /users/:id` - User detail with their posts
//! - `GET /users/:id/edit` - Edit form
//! - `POST /users/:id/edit` - Apply edit, redirect to `/`
//! - `POST /users/:id/delete` - Delete user and their posts, redirect to `/`

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
    user::{CreateUser, UpdateUser, User},
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Fields posted by the new and edit user forms
#[derive(Debug, Deserialize, Validate)]
pub struct UserForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    /// Blank or missing falls back to the default avatar
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserForm {
    /// Strips surrounding whitespace from the names, so blank names fail validation
    fn trimmed(self) -> Self {
        UserForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            image_url: self.image_url,
        }
    }
}

impl From<UserForm> for CreateUser {
    fn from(form: UserForm) -> Self {
        CreateUser {
            first_name: form.first_name,
            last_name: form.last_name,
            image_url: form.image_url,
        }
    }
}

impl From<UserForm> for UpdateUser {
    fn from(form: UserForm) -> Self {
        UpdateUser {
            first_name: form.first_name,
            last_name: form.last_name,
            image_url: form.image_url,
        }
    }
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UserListTemplate {
    pub users: Vec<User>,
}

#[derive(Template)]
#[template(path = "users/new.html")]
pub struct NewUserTemplate;

#[derive(Template)]
#[template(path = "users/detail.html")]
pub struct UserDetailTemplate {
    pub user: User,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "users/edit.html")]
pub struct EditUserTemplate {
    pub user: User,
}

/// Loads a user or fails with 404
pub(crate) async fn load_user(pool: &PgPool, id: i32) -> AppResult<User> {
    User::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

/// `GET /` sends visitors to the user list
pub async fn root() -> Response {
    redirect_found("/users")
}

/// Lists every user by last name
///
/// # Errors
///
/// - `500 Internal Server Error`: Database error
pub async fn list_users(State(state): State<AppState>) -> AppResult<HtmlTemplate<UserListTemplate>> {
    let users = User::list(&state.db).await?;
    Ok(HtmlTemplate(UserListTemplate { users }))
}

/// Renders the empty user form
pub async fn new_user_form() -> HtmlTemplate<NewUserTemplate> {
    HtmlTemplate(NewUserTemplate)
}

/// Creates a user from the submitted form and redirects to `/users`
///
/// A blank `image_url` stores the default avatar.
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form
/// - `422 Unprocessable Entity`: First or last name is blank
/// - `500 Internal Server Error`: Database error
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<UserForm>, AppError>,
) -> AppResult<Response> {
    let form = form.trimmed();
    form.validate()?;

    let user = User::create(&state.db, form.into()).await?;
    info!(user_id = user.id, "User created");

    Ok(redirect_found("/users"))
}

/// Shows a user with their posts, newest first
///
/// # Errors
///
/// - `404 Not Found`: No user with this id
/// - `500 Internal Server Error`: Database error
pub async fn show_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<UserDetailTemplate>> {
    let user = load_user(&state.db, id).await?;
    let posts = Post::list_for_user(&state.db, user.id).await?;

    Ok(HtmlTemplate(UserDetailTemplate { user, posts }))
}

/// Renders the edit form filled with the user's current values
///
/// # Errors
///
/// - `404 Not Found`: No user with this id
/// - `500 Internal Server Error`: Database error
pub async fn edit_user_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<HtmlTemplate<EditUserTemplate>> {
    let user = load_user(&state.db, id).await?;
    Ok(HtmlTemplate(EditUserTemplate { user }))
}

/// Replaces a user's names and avatar, then redirects to `/`
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form
/// - `404 Not Found`: No user with this id
/// - `422 Unprocessable Entity`: First or last name is blank
/// - `500 Internal Server Error`: Database error
pub async fn update_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    WithRejection(Form(form), _): WithRejection<Form<UserForm>, AppError>,
) -> AppResult<Response> {
    load_user(&state.db, id).await?;
    let form = form.trimmed();
    form.validate()?;

    User::update(&state.db, id, form.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    info!(user_id = id, "User updated");

    Ok(redirect_found("/"))
}

/// Deletes a user and all of their posts, then redirects to `/`
///
/// # Errors
///
/// - `404 Not Found`: No user with this id
/// - `500 Internal Server Error`: Database error
pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    load_user(&state.db, id).await?;

    User::delete(&state.db, id).await?;
    info!(user_id = id, "User deleted");

    Ok(redirect_found("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header, Request},
    };
    use blogly_shared::models::user::DEFAULT_IMAGE_URL;

    async fn parse_form(body: &'static str) -> UserForm {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        let Form(form) = Form::<UserForm>::from_request(request, &()).await.unwrap();
        form
    }

    #[tokio::test]
    async fn test_user_form_requires_names() {
        let form = parse_form("image_url=").await;
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[tokio::test]
    async fn test_whitespace_names_fail_validation() {
        let form = parse_form("first_name=+++&last_name=%09Lovelace+").await.trimmed();
        assert_eq!(form.last_name, "Lovelace");

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(!fields.contains_key("last_name"));
    }

    #[tokio::test]
    async fn test_user_form_valid() {
        let form = parse_form("first_name=Ada&last_name=Lovelace&image_url=").await;
        assert!(form.validate().is_ok());
        assert_eq!(form.image_url.as_deref(), Some(""));
    }

    #[test]
    fn test_user_list_renders_names_and_links() {
        let html = UserListTemplate {
            users: vec![User {
                id: 12,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                image_url: DEFAULT_IMAGE_URL.to_string(),
            }],
        }
        .render()
        .unwrap();

        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("href=\"/users/12\""));
    }

    #[test]
    fn test_new_user_form_heading() {
        let html = NewUserTemplate.render().unwrap();
        assert!(html.contains("<h1>CREATE A USER"));
    }

    #[test]
    fn test_names_are_html_escaped() {
        let html = UserListTemplate {
            users: vec![User {
                id: 1,
                first_name: "<script>".to_string(),
                last_name: "x".to_string(),
                image_url: DEFAULT_IMAGE_URL.to_string(),
            }],
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
    }
}
