use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns an empty response with [`StatusCode::NO_CONTENT`] for all errors.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(
            self,
            ErrorVerbosity::Message | ErrorVerbosity::Type | ErrorVerbosity::Full
        )
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    /// Returns the error verbosity.
    fn error_verbosity(&self) -> ErrorVerbosity;
}

/// Maps any error into an [`ApiError::InternalServerError`] using the verbosity of `$state`.
///
/// Requires [`ErrorVerbosityProvider`] to be in scope.
#[macro_export]
macro_rules! server_error {
    ($state:expr) => {
        |err| {
            $crate::error::ApiError::from($crate::error::InternalServerError::from_generic_error(
                $state.error_verbosity(),
                err,
            ))
        }
    };
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl From<ApiErrorResponse> for ApiErrorMessage {
    fn from(response: ApiErrorResponse) -> Self {
        ApiErrorMessage {
            message: response.message,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => {
                (status_code, Json(ApiErrorMessage::from(self))).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Query error
    ///
    /// This error is returned when the query parameters are not as expected.
    Query(QueryError),
    /// Body error
    ///
    /// This error is returned when the body is not valid JSON.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Validation error
    ///
    /// This error is returned when the body does not conform to the expected schema.
    Validation(ValidationError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Query(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Query(_) => "Failed to parse query parameters",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::Validation(_) => "Request body failed validation",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Query(_) | ApiError::Body(_) | ApiError::Path(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity().should_generate_message() {
            true => error.message(),
            false => "",
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    query_error_reason: Option<String>,
    query_expected_schema: Option<String>,
}

impl QueryError {
    pub fn new(
        verbosity: ErrorVerbosity,
        query_error_reason: String,
        query_expected_schema: String,
    ) -> Self {
        let (query_error_reason, query_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(query_error_reason), Some(query_expected_schema)),
                false => (None, None),
            };

        QueryError {
            verbosity,
            query_error_reason,
            query_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(body_error_reason), Some(body_expected_schema)),
                false => (None, None),
            };

        BodyError {
            verbosity,
            body_error_reason,
            body_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(path_error_reason);

        PathError {
            verbosity,
            path_error_reason,
        }
    }

    pub fn from_path_rejection(verbosity: ErrorVerbosity, rejection: PathRejection) -> Self {
        Self::new(verbosity, rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    validation_errors: Option<String>,
}

impl ValidationError {
    /// Joins all `reasons` into a single comma separated reason.
    pub fn new<I, R>(verbosity: ErrorVerbosity, reasons: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        let validation_errors = verbosity.should_generate_error_reason().then(|| {
            reasons
                .into_iter()
                .map(|reason| reason.as_ref().to_owned())
                .collect::<Vec<_>>()
                .join(", ")
        });

        ValidationError {
            verbosity,
            validation_errors,
        }
    }

    pub fn from_validation_errors(
        verbosity: ErrorVerbosity,
        errors: validator::ValidationErrors,
    ) -> Self {
        let mut reasons = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("instance.{field} {message}"),
                    None => format!("instance.{field} does not satisfy `{}`", error.code),
                })
            })
            .collect::<Vec<_>>();

        // field_errors is a HashMap
        reasons.sort();

        Self::new(verbosity, reasons)
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_found_reason: Option<String>,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError {
            verbosity,
            not_found_reason: None,
        }
    }

    pub fn with_reason(verbosity: ErrorVerbosity, not_found_reason: String) -> Self {
        let not_found_reason = verbosity
            .should_generate_error_reason()
            .then_some(not_found_reason);

        NotFoundError {
            verbosity,
            not_found_reason,
        }
    }
}
