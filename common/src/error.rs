use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    // === DATA ACCESS ERRORS ===
    #[error("{0}")]
    Access(String),

    // === APPLICATION ERRORS ===
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Replaces the message of an `Access` error with a caller-facing one,
    /// leaving the other kinds untouched.
    pub fn with_context(self, message: &str) -> Self {
        match self {
            AppError::Access(cause) => {
                log::error!("{}: {}", message, cause);
                AppError::Access(message.to_string())
            }
            other => other,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let body = serde_json::json!({ "success": false, "error": self.to_string() });

        match self {
            AppError::Access(error) => {
                log::error!("Data access error: {}", error);
                HttpResponse::ServiceUnavailable().json(body)
            }
            AppError::NotFound(_) => HttpResponse::NotFound().json(body),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("API key".to_string()),
            other => AppError::Access(other.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
