//! Route handlers
//!
//! Organized by resource:
//!
//! - `health`: Health check endpoint
//! - `users`: User list, detail, create/edit/delete
//! - `posts`: Posts under a user, detail, edit/delete
//! - `tags`: Tag list, detail, create/edit/delete
//!
//! GET handlers render one template each. POST handlers redirect with
//! `302 Found` so that refreshing the follow-up page never resubmits a form.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub mod health;
pub mod posts;
pub mod tags;
pub mod users;

/// `302 Found` pointing at `location`
pub fn redirect_found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_found() {
        let response = redirect_found("/users/3");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/users/3");
    }
}
