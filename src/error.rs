// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{llm_client::LlmError, slide_converter::ConvertError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    /// A required credential is missing; raised before any upstream call.
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Upstream(String),
    /// The provider answered but no slide data could be found in the reply.
    #[error("{0}")]
    Extraction(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    kind: &'static str,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Configuration(_) => "configuration",
            AppError::Upstream(_) => "upstream",
            AppError::Extraction(_) => "extraction",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{}", self);
        }
        let body = ErrorBody {
            detail: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => {
                AppError::Configuration("ANTHROPIC_API_KEY is not set.".to_string())
            }
            other => AppError::Upstream(format!("LLM call failed: {other}")),
        }
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::MissingCredential => {
                AppError::Configuration("ANTHROPIC_API_KEY is not set.".to_string())
            }
            ConvertError::Generation(source) => {
                AppError::Upstream(format!("Slide generation failed: {source}"))
            }
            ConvertError::NoSlides => AppError::Extraction(
                "Could not extract slide data from the model response. Try again with simpler content."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_errors_map_to_distinct_kinds() {
        assert_eq!(AppError::from(ConvertError::MissingCredential).kind(), "configuration");
        assert_eq!(AppError::from(ConvertError::NoSlides).kind(), "extraction");
        let upstream = AppError::from(ConvertError::Generation(LlmError::EmptyResponse));
        assert_eq!(upstream.kind(), "upstream");
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }
}
