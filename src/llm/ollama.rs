use crate::llm::client::{LanguageModel, RawModelOutput};
use crate::types::{AppError, Message, MessageRole, Result, ToolSpec};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};

/// Role prefixes small local models tend to echo at the start of a reply.
const ROLE_PREFIXES: &[&str] = &["assistant:", "Assistant:", "ASSISTANT:"];

pub struct OllamaModel {
    client: Ollama,
    model: String,
}

impl OllamaModel {
    pub fn new(base_url: String, model: String) -> Self {
        let url_parts: Vec<&str> = base_url.split("://").collect();
        let (host, port) = if url_parts.len() == 2 {
            let host_port: Vec<&str> = url_parts[1].split(':').collect();
            let host = host_port[0].to_string();
            let port = if host_port.len() == 2 {
                host_port[1].parse().unwrap_or(11434)
            } else {
                11434
            };
            (host, port)
        } else {
            ("localhost".to_string(), 11434)
        };

        let client = Ollama::new(host, port);

        Self { client, model }
    }

    fn strip_role_prefix(output: &str) -> &str {
        let trimmed = output.trim();
        for prefix in ROLE_PREFIXES {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return rest.trim_start();
            }
        }
        trimmed
    }
}

#[async_trait]
impl LanguageModel for OllamaModel {
    async fn infer(
        &self,
        utterance: &str,
        history: &[Message],
        _tool_specs: &[ToolSpec],
        system_directives: &str,
    ) -> Result<RawModelOutput> {
        // Tool specs are already rendered into the directives; Ollama gets
        // them as the system message and answers in plain text. The textual
        // tool-call shape is recognized downstream by the decision procedure.
        let mut messages = vec![ChatMessage::system(system_directives.to_string())];

        for msg in history {
            messages.push(match msg.role {
                MessageRole::System => ChatMessage::system(msg.content.clone()),
                MessageRole::User => ChatMessage::user(msg.content.clone()),
                MessageRole::Assistant => ChatMessage::assistant(msg.content.clone()),
            });
        }

        messages.push(ChatMessage::user(utterance.to_string()));

        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::ModelUnavailable(format!("Ollama error: {}", e)))?;

        let content = Self::strip_role_prefix(&response.message.content).to_string();

        Ok(RawModelOutput::Text(content))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
