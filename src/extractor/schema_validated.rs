use axum::{
    async_trait,
    extract::{FromRequest, Json as AxumJson, Request},
};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use validator::Validate;

use crate::{
    error::{ApiError, BodyError, ErrorVerbosityProvider, InternalServerError, ValidationError},
    schema::validate_instance,
};

/// Extracts a JSON body that conforms to the JSON schema of `T`.
///
/// The body is checked structurally against `schema_for!(T)` before it is
/// deserialized, so that every missing property and type mismatch is reported
/// in one [`ValidationError`]. The deserialized value must then pass its
/// [`Validate`] rules.
pub struct SchemaValidated<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for SchemaValidated<T>
where
    T: DeserializeOwned + JsonSchema + Validate + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "schema_validated_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();
        let schema = schema_for!(T);

        let value = match AxumJson::<Value>::from_request(req, state).await {
            Ok(AxumJson(value)) => value,
            Err(json_rejection) => {
                tracing::warn!(rejection=?json_rejection, "Rejection");

                let body_error_reason = json_rejection.body_text();

                let body_expected_schema = serde_yaml::to_string(&schema)
                    .map_err(|err| InternalServerError::from_generic_error(verbosity, err))?;

                return Err(
                    BodyError::new(verbosity, body_error_reason, body_expected_schema).into(),
                );
            }
        };

        let errors = validate_instance(&schema, &value);

        if !errors.is_empty() {
            tracing::warn!(?errors, "Schema violations");

            return Err(ValidationError::new(verbosity, errors).into());
        }

        let extracted = serde_json::from_value::<T>(value).map_err(|err| {
            tracing::warn!(%err, "Deserialization failed");

            ValidationError::new(verbosity, [err.to_string()])
        })?;

        if let Err(errors) = extracted.validate() {
            tracing::warn!(?errors, "Validation errors");

            return Err(ValidationError::from_validation_errors(verbosity, errors).into());
        }

        tracing::trace!(?extracted, "Validated");

        Ok(SchemaValidated(extracted))
    }
}
