use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

// Errors a request can end in. Every variant maps to a bare status code; the
// message only ever reaches the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed request: {0}")]
    BadRequest(&'static str),
    #[error("credentials missing")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("todo {0} not found")]
    NotFound(u64),
    #[error("no such route")]
    RouteNotFound,
    #[error("user {0} already exists")]
    Conflict(String),
    #[error("body of {0} bytes exceeds the JSON limit")]
    PayloadTooLarge(usize),
    #[error("system random source failed")]
    Random,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Random => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_unprocessable_entity() {
        let response = AppError::Conflict("alice".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn taxonomy_status_codes() {
        assert_eq!(
            AppError::BadRequest("title").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("token").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::NotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::PayloadTooLarge(1).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Random.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
