// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Deserialize, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
}

#[derive(Deserialize, Serialize)]
pub struct GenerateRequest {
    pub report_content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Slide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub svg: String,
}

#[derive(Deserialize, Serialize)]
pub struct GenerateResponse {
    pub slides: Vec<Slide>,
    pub message: String,
}

#[derive(Deserialize, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
