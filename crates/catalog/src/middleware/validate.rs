use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use shared::errors::HttpError;

/// JSON body decoded through `TryFrom<Value>`, so the target can inspect the
/// raw payload before deserializing. Any rejection becomes a 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: TryFrom<Value, Error = serde_json::Error> + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| invalid_json(rejection.body_text()))?;

        let decoded = T::try_from(value).map_err(|e| invalid_json(e.to_string()))?;

        Ok(Self(decoded))
    }
}

fn invalid_json(detail: String) -> HttpError {
    HttpError::BadRequest {
        message: "Invalid JSON".into(),
        detail: Some(detail),
    }
}
