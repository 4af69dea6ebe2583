use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use crate::error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError};

/// Middleware to map axum's bare `405` responses to our [`ApiError`].
///
/// Routes only answer `405` when the path matched but the method did not.
pub async fn method_not_allowed<S: ErrorVerbosityProvider>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let method = req.method().clone();
    let resp = next.run(req).await;

    match resp.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            tracing::debug!(%method, "Method not allowed");

            Err(MethodNotAllowedError::new(state.error_verbosity()).into())
        }
        _ => Ok(resp),
    }
}
