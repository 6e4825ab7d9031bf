use crate::errors::{error::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest {
        message: String,
        detail: Option<String>,
    },
    Validation {
        message: String,
        required: Vec<String>,
        received: Vec<String>,
    },
    NotFound {
        path: String,
        method: String,
    },
    ServiceUnavailable(String),
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl HttpError {
    /// Translates a service failure into a response. Underlying error text is
    /// only attached to 500s when `expose_detail` is set.
    pub fn from_service(err: ServiceError, expose_detail: bool) -> Self {
        match err {
            ServiceError::Validation {
                errors,
                required,
                received,
            } => HttpError::Validation {
                message: format!("Missing or invalid required fields: {}", errors.join("; ")),
                required,
                received,
            },

            ServiceError::Unavailable(msg) => {
                error!("❌ Store unavailable: {msg}");
                HttpError::ServiceUnavailable("Database not available".into())
            }

            ServiceError::Repo(repo_err) => {
                error!("❌ Repository failure: {repo_err}");
                HttpError::Internal {
                    message: "Internal server error".into(),
                    detail: expose_detail.then(|| repo_err.to_string()),
                }
            }

            ServiceError::Internal(msg) => {
                error!("❌ Internal failure: {msg}");
                HttpError::Internal {
                    message: "Internal server error".into(),
                    detail: expose_detail.then_some(msg),
                }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest { .. } | HttpError::Validation { .. } => StatusCode::BAD_REQUEST,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        HttpError::from_service(err, false)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            HttpError::BadRequest { message, detail } => ErrorResponse {
                detail,
                ..ErrorResponse::new(message)
            },
            HttpError::Validation {
                message,
                required,
                received,
            } => ErrorResponse {
                required: Some(required),
                received: Some(received),
                ..ErrorResponse::new(message)
            },
            HttpError::NotFound { path, method } => ErrorResponse {
                path: Some(path),
                method: Some(method),
                ..ErrorResponse::new("Route not found")
            },
            HttpError::ServiceUnavailable(message) => ErrorResponse {
                hint: Some("Check /api/health for details".into()),
                ..ErrorResponse::new(message)
            },
            HttpError::Internal { message, detail } => ErrorResponse {
                detail,
                ..ErrorResponse::new(message)
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::repository::RepositoryError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = HttpError::from(ServiceError::Validation {
            errors: vec!["price is required".into()],
            required: vec!["price".into()],
            received: vec!["name".into()],
        });

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            HttpError::Validation { received, .. } => assert_eq!(received, vec!["name"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = HttpError::from(ServiceError::Unavailable("down".into()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn internal_detail_is_hidden_unless_exposed() {
        let hidden = HttpError::from_service(
            ServiceError::Repo(RepositoryError::Custom("secret".into())),
            false,
        );
        assert!(matches!(hidden, HttpError::Internal { detail: None, .. }));

        let exposed = HttpError::from_service(
            ServiceError::Repo(RepositoryError::Custom("secret".into())),
            true,
        );
        match exposed {
            HttpError::Internal { detail: Some(detail), .. } => assert!(detail.contains("secret")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
