/// Error types for quill
///
/// Errors are converted to browser-appropriate HTTP responses: unknown
/// resources become 404 pages, a missing session becomes a redirect to the
/// login page with the original destination preserved, and everything else
/// surfaces as a generic 500.
use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use std::fmt;

/// Result type for quill operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Database operation failed
    Database(String),

    /// Page cache (Redis) operation failed
    Cache(String),

    /// Template rendering failed
    Template(String),

    /// Resource (slug, username, post id) does not resolve
    NotFound(String),

    /// No valid session; browser is sent to the login page
    Unauthenticated { login_url: String, next: String },

    /// Internal server error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Cache(msg) => write!(f, "Cache error: {}", msg),
            AppError::Template(msg) => write!(f, "Template error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthenticated { next, .. } => {
                write!(f, "Authentication required for {}", next)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Login redirect carrying the original destination in `next`.
    pub fn login_redirect(&self) -> Option<String> {
        match self {
            AppError::Unauthenticated { login_url, next } => Some(format!(
                "{}?next={}",
                login_url,
                urlencoding::encode(next)
            )),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated { .. } => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(location) = self.login_redirect() {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish();
        }

        let status = self.status_code();
        let body = match self {
            AppError::NotFound(what) => format!("404 Not Found: {}", what),
            _ => {
                tracing::error!("request failed: {}", self);
                "500 Internal Server Error".to_string()
            }
        };

        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_becomes_login_redirect() {
        let err = AppError::Unauthenticated {
            login_url: "/auth/login".to_string(),
            next: "/posts/1/edit".to_string(),
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(location, "/auth/login?next=%2Fposts%2F1%2Fedit");
    }

    #[test]
    fn not_found_is_404() {
        let err = AppError::NotFound("group 'rust'".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.login_redirect().is_none());
    }

    #[test]
    fn database_errors_are_500() {
        let err = AppError::Database("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
