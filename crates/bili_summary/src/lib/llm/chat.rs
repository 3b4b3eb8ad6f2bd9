use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::Summarizer;

/// A single role/content entry in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("input is empty")]
    EmptyInput,
    #[error("no content in completion response")]
    MalformedResponse,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    default_prompt: String,
}

impl ChatClient {
    const DEFAULT_PROMPT: &'static str = include_str!("./prompts/system_0.txt");
    const FRAMING_PHRASE: &'static str = "Here is the content to summarize:";

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            default_prompt: Self::DEFAULT_PROMPT.trim().to_string(),
        })
    }

    /// Replaces the built-in summarization persona.
    pub fn with_default_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.default_prompt = prompt.into();
        self
    }

    /// Builds the two-role conversation for a summarization request.
    ///
    /// The system message shapes the output structure; the user message
    /// carries an optional caller instruction followed by the fixed framing
    /// phrase and the text itself, so callers can change *how* to summarize
    /// without touching *what* is summarized.
    fn build_messages(
        &self,
        text: &str,
        custom_prompt: Option<&str>,
        system_message: Option<&str>,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);

        let sys = system_message.unwrap_or(&self.default_prompt);
        if !sys.is_empty() {
            messages.push(ChatMessage::system(sys));
        }

        let mut user_content = String::new();
        if let Some(prompt) = custom_prompt {
            user_content.push_str(prompt);
            user_content.push_str("\n\n");
        }
        user_content.push_str(Self::FRAMING_PHRASE);
        user_content.push_str("\n\n");
        user_content.push_str(text);
        messages.push(ChatMessage::user(user_content));

        messages
    }

    /// Summarizes `text`, optionally overriding the system message entirely.
    pub async fn summarize_with_system(
        &self,
        text: &str,
        custom_prompt: Option<&str>,
        system_message: Option<&str>,
    ) -> Result<String, ChatError> {
        if text.trim().is_empty() {
            tracing::error!("Input text is empty");
            return Err(ChatError::EmptyInput);
        }

        tracing::info!(chars = text.len(), "Requesting summary");

        let messages = self.build_messages(text, custom_prompt, system_message);
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        self.send_completion_request(&body).await
    }

    /// General chat entry point: caller-built conversation plus sampling
    /// parameters, same response-shape contract as summarization.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
        });
        if let Some(max_tokens) = max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        self.send_completion_request(&body).await
    }

    async fn send_completion_request(
        &self,
        body: &serde_json::Value,
    ) -> Result<String, ChatError> {
        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ChatError::Api { status, message });
        }

        let response = resp.json::<CompletionResponse>().await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ChatError::MalformedResponse)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl Summarizer for ChatClient {
    type Error = ChatError;

    async fn summarize(
        &self,
        text: &str,
        custom_prompt: Option<&str>,
    ) -> Result<String, Self::Error> {
        self.summarize_with_system(text, custom_prompt, None).await
    }
}
