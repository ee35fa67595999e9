//! Error handling for the web server
//!
//! Every handler returns `AppResult<T>`. `AppError` maps each failure to an
//! HTTP status and renders a small HTML error page.
//!
//! # Example
//!
//! ```no_run
//! use blogly_web::error::{AppError, AppResult};
//! use blogly_shared::models::user::User;
//! use sqlx::PgPool;
//!
//! async fn load(pool: &PgPool, id: i32) -> AppResult<User> {
//!     User::find_by_id(pool, id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
//! }
//! ```

use askama::Template;
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified handler error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (409), e.g. duplicate tag name
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unprocessable entity (422): a form failed validation
    #[error("Validation failed: {} errors", .0.len())]
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// One failed form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
    details: &'a [ValidationErrorDetail],
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, details): (&str, &[ValidationErrorDetail]) = match &self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                (msg.as_str(), &[][..])
            }
            AppError::ValidationError(errors) => ("Please fill in every required field.", &errors[..]),
            AppError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ("An internal error occurred", &[][..])
            }
        };

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message,
            details,
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render error page");
                (status, message.to_string()).into_response()
            }
        }
    }
}

/// Convert sqlx errors to handler errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("tags_name_key") {
                        return AppError::Conflict("A tag with that name already exists".to_string());
                    }
                    return AppError::Conflict(format!(
                        "Constraint violation: {}",
                        db_err.constraint().unwrap_or("unique")
                    ));
                }

                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Referenced record not found".to_string());
                }

                AppError::InternalError(format!("Database error: {}", db_err))
            }
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert form validation failures, sorted by field name
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(details)
    }
}

/// Undecodable form bodies and wrong content types
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Same as above for the repeated-key form extractor
impl From<axum_extra::extract::FormRejection> for AppError {
    fn from(rejection: axum_extra::extract::FormRejection) -> Self {
        use axum_extra::extract::FormRejection as ExtraFormRejection;
        let text = match rejection {
            ExtraFormRejection::RawFormRejection(inner) => inner.body_text(),
            ExtraFormRejection::FailedToDeserializeForm(inner) => {
                format!("Failed to deserialize form: {inner}")
            }
            other => other.to_string(),
        };
        AppError::BadRequest(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header, Request},
    };
    use validator::Validate;

    #[derive(Debug, Deserialize)]
    struct Count {
        #[allow(dead_code)]
        n: i32,
    }

    fn form_request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_error_display() {
        let err = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = AppError::NotFound("User 7 not found".to_string());
        assert_eq!(err.to_string(), "Not found: User 7 not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound(String::new()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict(String::new()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::ValidationError(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InternalError(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_validation_errors_convert() {
        let errors = Named { name: String::new() }.validate().unwrap_err();
        let err: AppError = errors.into();

        match err {
            AppError::ValidationError(details) => {
                assert_eq!(
                    details,
                    vec![ValidationErrorDetail {
                        field: "name".to_string(),
                        message: "Name is required".to_string(),
                    }]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_renders_html_page() {
        let response = AppError::NotFound("User 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("404"));
        assert!(html.contains("User 7 not found"));
    }

    #[tokio::test]
    async fn test_undecodable_form_maps_to_bad_request() {
        let request = form_request(Some("application/x-www-form-urlencoded"), "n=abc");
        let rejection = axum_extra::extract::Form::<Count>::from_request(request, &())
            .await
            .unwrap_err();

        let err: AppError = rejection.into();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_form_content_type_maps_to_bad_request() {
        let request = form_request(None, "n=1");
        let rejection = axum::Form::<Count>::from_request(request, &())
            .await
            .unwrap_err();

        let response = AppError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }
}
