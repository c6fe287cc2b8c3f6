#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use slidegen_backend::config::AppConfig;
use slidegen_backend::services::llm_client::{CompletionRequest, LlmClient, LlmError};
use slidegen_backend::state::AppState;

/// Plays back canned replies in order and records every request it receives.
pub struct ScriptedClient {
    configured: bool,
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(replies: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every call fails with a provider error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::Api {
                status: StatusCode::TOO_MANY_REQUESTS,
                message,
            }),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

pub fn test_state(llm: Arc<ScriptedClient>) -> Arc<AppState> {
    let config = AppConfig {
        chat_system_prompt: "Write a report.".to_string(),
        ..AppConfig::default()
    };
    Arc::new(AppState::new(&config, llm))
}

pub const Q4_REPLY: &str = "```json\n{\"slides\":[{\"title\":\"Q4\",\"svg\":\"<svg width=\\\"1920\\\" height=\\\"1080\\\"><text>Revenue +15%</text></svg>\"}]}\n```";
