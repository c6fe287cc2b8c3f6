// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::chatbot::Chatbot;
use crate::services::llm_client::LlmClient;
use crate::services::session_manager::SessionManager;
use crate::services::slide_converter::SlideConverter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub chatbot: Chatbot,
    pub converter: SlideConverter,
}

impl AppState {
    pub fn new(config: &AppConfig, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            sessions: SessionManager::new(config.session_ttl)
                .with_system_prompt(config.chat_system_prompt.clone()),
            chatbot: Chatbot::new(llm.clone()).with_max_tokens(config.chat_max_tokens),
            converter: SlideConverter::new(llm).with_max_tokens(config.slides_max_tokens),
        }
    }
}
