use axum::extract::State;

use crate::error::{ApiError, ErrorVerbosityProvider, NotFoundError};

/// Fallback for requests that match no route.
pub async fn not_found<S: ErrorVerbosityProvider>(State(state): State<S>) -> ApiError {
    tracing::debug!("No route matched");

    NotFoundError::new(state.error_verbosity()).into()
}
