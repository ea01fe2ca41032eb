//! Study-outline helper backed by a chat-completion HTTP API.
//!
//! One blocking request per call, no retry. Whatever the remote service returns as
//! the first choice is handed back verbatim.

use crate::core::config::CompletionConfig;
use crate::core::error::RosterError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const STUDY_SYSTEM_PROMPT: &str = "Faça um roteiro, incluindo 3 perguntas para um estudo bíblico de adolescentes de acordo com o tema apresentado";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Clone)]
pub struct StudyClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for StudyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key_set", &!self.api_key.trim().is_empty())
            .finish()
    }
}

impl StudyClient {
    pub fn new(config: &CompletionConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new()
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            agent: builder.build(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Ask the completion service for a study outline on `topic`.
    pub fn generate(&self, topic: &str) -> Result<String, RosterError> {
        if self.api_key.trim().is_empty() {
            return Err(RosterError::CompletionError(
                "no API key configured for the completion service".to_string(),
            ));
        }

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: STUDY_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: topic,
                },
            ],
        };

        let response: ChatResponse = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
            .send_json(&request)?
            .into_json()
            .map_err(|e| RosterError::CompletionError(format!("malformed response: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RosterError::CompletionError("response carried no choices".to_string()))
    }
}

/// Split generated text into display lines. Empty lines are kept.
pub fn outline_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
