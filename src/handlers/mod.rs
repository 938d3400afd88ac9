pub mod admin;
pub mod booking;

use crate::admin::Listing;
use crate::api::BackendClient;
use crate::errors::AppError;
use crate::i18n::Messages;
use crate::models::Service;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found() -> AppError {
    AppError::not_found("not found")
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request(format!("invalid id {raw:?}")))
}

async fn load_services(api: &BackendClient, messages: &Messages) -> Listing<Service> {
    Listing::from_result(api.list_services().await, messages.services_failed, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("0").unwrap_err().status, StatusCode::BAD_REQUEST);
        assert_eq!(parse_id("abc").unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
