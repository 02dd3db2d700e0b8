use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body that has passed its `garde` rules.
///
/// Malformed bodies and failed rules both become `ApiError::BadRequest`, so a
/// handler taking `ValidJson<T>` only ever sees valid input.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate<Context = ()> + 'static,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(describe_rejection)?;

        value.validate().map_err(|report| {
            let message = report
                .iter()
                .map(|(path, error)| format!("{path}: {error}"))
                .collect::<Vec<_>>()
                .join("; ");
            ApiError::BadRequest(message)
        })?;

        Ok(ValidJson(value))
    }
}

fn describe_rejection(rejection: JsonRejection) -> ApiError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => format!("Malformed JSON: {}", rejection.body_text()),
        _ => rejection.body_text(),
    };
    ApiError::BadRequest(message)
}
