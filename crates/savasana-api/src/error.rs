//! Translation of session-layer errors into HTTP status codes.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use savasana_sessions::SessionError;
use serde_json::json;
use thiserror::Error;

/// Wrapper giving `SessionError` an HTTP rendering. Handlers return
/// `Result<_, ApiError>` and let actix build the response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] SessionError);

impl ApiError {
    pub fn inner(&self) -> &SessionError {
        &self.0
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SessionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status)
            .content_type("application/json")
            .json(json!({
                "status": status.as_u16(),
                "error": status.canonical_reason().unwrap_or("Error"),
                "message": self.0.to_string(),
            }))
    }
}
