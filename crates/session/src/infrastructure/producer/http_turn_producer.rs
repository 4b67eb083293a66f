//! HTTP turn producer (OpenAI-compatible chat API).
//!
//! Keeps the whole conversation client-side: the system prompt, every
//! player action, and every raw producer reply are replayed on each call,
//! so the producer itself stays stateless between turns.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use netrift_domain::SessionConfig;

use crate::ports::outbound::{ProducerError, TurnPayload, TurnProducerPort};

use super::prompt::{system_prompt, BEGIN_MESSAGE};
use super::wire::parse_turn;

/// Default producer base URL.
pub const DEFAULT_PRODUCER_BASE_URL: &str = "http://localhost:11434";

/// Default producer model.
pub const DEFAULT_PRODUCER_MODEL: &str = "llama3.2";

pub struct HttpTurnProducer {
    client: Client,
    base_url: String,
    model: String,
    conversation: Mutex<Option<Vec<ChatMessage>>>,
}

impl HttpTurnProducer {
    pub fn new(base_url: &str, model: &str) -> Self {
        // Turn generation can be slow; match the controller's turn timeout.
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            conversation: Mutex::new(None),
        }
    }

    /// Create a producer from `NETRIFT_PRODUCER_URL` / `NETRIFT_PRODUCER_MODEL`,
    /// falling back to defaults if unset.
    pub fn from_env() -> Self {
        let base_url = std::env::var("NETRIFT_PRODUCER_URL")
            .unwrap_or_else(|_| DEFAULT_PRODUCER_BASE_URL.to_string());
        let model = std::env::var("NETRIFT_PRODUCER_MODEL")
            .unwrap_or_else(|_| DEFAULT_PRODUCER_MODEL.to_string());
        Self::new(&base_url, &model)
    }

    async fn exchange(&self, messages: Vec<ChatMessage>) -> Result<String, ProducerError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            response_format: ResponseFormat {
                r#type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProducerError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProducerError::RequestFailed(format!("{status}: {body}")));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProducerError::InvalidPayload(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProducerError::InvalidPayload("empty reply".to_string()))
    }

    async fn run_turn(&self, user_text: &str) -> Result<TurnPayload, ProducerError> {
        let mut messages = self
            .conversation
            .lock()
            .clone()
            .ok_or(ProducerError::NotStarted)?;
        messages.push(ChatMessage::user(user_text));

        let raw = self.exchange(messages.clone()).await?;
        let payload = parse_turn(&raw)?;

        // Only a turn that parsed cleanly extends the conversation.
        messages.push(ChatMessage::assistant(&raw));
        *self.conversation.lock() = Some(messages);
        Ok(payload)
    }
}

#[async_trait]
impl TurnProducerPort for HttpTurnProducer {
    async fn begin_session(&self, config: &SessionConfig) -> Result<TurnPayload, ProducerError> {
        *self.conversation.lock() = Some(vec![ChatMessage::system(&system_prompt(config))]);
        tracing::info!(model = %self.model, theme = %config.theme, "opening producer session");
        self.run_turn(BEGIN_MESSAGE).await
    }

    async fn submit_turn(&self, action: &str) -> Result<TurnPayload, ProducerError> {
        self.run_turn(action).await
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    fn assistant(content: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}
