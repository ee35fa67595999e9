//! Askama template responses
//!
//! Handlers return `HtmlTemplate(SomeTemplate { .. })`; a template that fails
//! to render becomes a 500 through `AppError`.

use crate::error::AppError;
use askama::Template;
use axum::response::{Html, IntoResponse, Response};

pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                AppError::InternalError(format!("Failed to render template: {}", err)).into_response()
            }
        }
    }
}
