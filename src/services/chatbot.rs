use std::sync::Arc;

use tracing::{debug, warn};

use super::llm_client::{CompletionRequest, LlmClient, LlmError};
use super::session_manager::{Message, SessionManager};

pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 1024;

/// Forwards a session's full transcript to the LLM for each turn.
pub struct Chatbot {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl Chatbot {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm, max_tokens: DEFAULT_CHAT_MAX_TOKENS }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Run one turn. The user message and the reply are only recorded once
    /// the provider has answered, so a failed turn leaves the transcript untouched.
    pub async fn reply(
        &self,
        sessions: &SessionManager,
        session_id: &str,
        user_msg: &str,
    ) -> Result<String, LlmError> {
        if !self.llm.is_configured() {
            return Err(LlmError::MissingApiKey);
        }

        let mut transcript = sessions.get_history(session_id).await.unwrap_or_default();
        transcript.push(Message::user(user_msg));
        debug!(session_id, turns = transcript.len(), "forwarding transcript");

        let request = CompletionRequest::from_transcript(transcript, self.max_tokens);
        let answer = self.llm.complete(request).await.inspect_err(|e| {
            warn!(session_id, error = %e, "chat completion failed");
        })?;

        sessions.append_turn(session_id, user_msg, answer.as_str()).await;
        Ok(answer)
    }
}
