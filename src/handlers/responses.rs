use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::enhance::EnhanceError;
use crate::options::OptionsError;

/// Error half of every handler result, rendered as `{ "error", "kind" }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Options(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Options(_) => "options",
            ApiError::Generation(_) => "generation",
            ApiError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Options(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EnhanceError> for ApiError {
    fn from(err: EnhanceError) -> Self {
        match err {
            EnhanceError::Validation(err) => ApiError::Validation(err.to_string()),
            EnhanceError::Options(err) => err.into(),
            EnhanceError::Generation(err) => ApiError::Generation(err.0),
        }
    }
}

impl From<OptionsError> for ApiError {
    fn from(err: OptionsError) -> Self {
        ApiError::Options(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let message = match self {
            ApiError::Validation(message) | ApiError::Options(message) => {
                warn!(kind, "Rejected request: {message}");
                message
            }
            ApiError::Generation(detail) => {
                error!("Image generation failed: {detail}");
                format!("Enhancement failed: {detail}")
            }
            ApiError::Internal(detail) => {
                error!("Internal error: {detail}");
                "Internal server error".to_string()
            }
        };
        (status, Json(json!({ "error": message, "kind": kind }))).into_response()
    }
}

pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::ImageValidationError;
    use crate::llm::ImageGenerationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_client_errors() {
        let err: ApiError = EnhanceError::from(ImageValidationError::MissingFile).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["kind"], "validation");
        assert_eq!(body["error"], "No image file provided");
    }

    #[tokio::test]
    async fn generation_errors_are_bad_gateway_with_detail() {
        let err: ApiError = EnhanceError::from(ImageGenerationError("No image data".into())).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Enhancement failed: No image data");
        assert_eq!(body["kind"], "generation");
    }

    #[tokio::test]
    async fn internal_detail_is_not_exposed() {
        let response = handle_panic(Box::new("index out of bounds")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["kind"], "internal");
    }
}
