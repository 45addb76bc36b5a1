use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failures surfaced by the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data access error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Handler-side mapping: not-found is 404, everything else is a 500.
pub(crate) fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        _ => {
            error!(error = %e, "store call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub(crate) fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, msg) = store_error(StoreError::NotFound("recipe"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "recipe not found");
    }

    #[test]
    fn database_errors_map_to_500_with_message() {
        let (status, msg) = store_error(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(msg.starts_with("data access error"));
    }
}
