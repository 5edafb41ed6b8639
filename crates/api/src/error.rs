use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use valuables_core::error::CoreError;
use valuables_db::store::StoreError;

use crate::response::ErrorResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `valuables_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure. `action` is the only text the client sees,
    /// e.g. `"failed to update item"`.
    #[error("{action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a `map_err` adapter that tags a storage failure with the
    /// client-facing message of the running operation.
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { action, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(format!("{entity} not found")),
                ),
                CoreError::InvalidIdentifier(raw) => {
                    tracing::debug!(id = %raw, "Rejected invalid identifier");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::new("invalid item ID"),
                    )
                }
                CoreError::InvalidFormat(reason) => {
                    tracing::debug!(%reason, "Rejected malformed request body");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::new("invalid request format"),
                    )
                }
                CoreError::Validation(details) => {
                    tracing::debug!(?details, "Rejected request failing validation");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::with_details("validation failed", details),
                    )
                }
            },

            // --- Storage errors ---
            AppError::Store { action, source } => {
                tracing::error!(error = %source, action, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(action),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
