use axum::http::StatusCode;

/// Failure that cannot be shown as a page, answered with a bare status and message.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn keeps_status_code() {
        assert_eq!(AppError::bad_request("bad id").into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("gone").into_response().status(), StatusCode::NOT_FOUND);
    }
}
