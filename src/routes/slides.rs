use axum::{
    extract::{State, rejection::JsonRejection},
    Json,
};
use tracing::info;

use crate::{
    error::AppError,
    message::{GenerateRequest, GenerateResponse},
    state::SharedState,
};

pub async fn generate_ppt_handler(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(payload) = payload?;
    let report = payload.report_content.trim();
    if report.is_empty() {
        return Err(AppError::BadRequest("Report content cannot be empty".to_string()));
    }

    info!(chars = report.chars().count(), "generating slides");
    let set = state.converter.convert(report).await?;

    Ok(Json(GenerateResponse {
        slides: set.slides,
        message: set.message,
    }))
}
