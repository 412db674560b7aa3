use crate::config::Config;
use domain::generator::TextGenerator;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::error::SemanticMapError;
use shared::types::Result;
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SemanticMapError::config("OPENAI_API_KEY is not set"));
        }
        Ok(Self {
            client: Arc::new(Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_response(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };
        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "sending chat completion");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SemanticMapError::service(format!("request to {} failed: {}", url, e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SemanticMapError::service(format!("failed reading response body: {}", e)))?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        parse_completion(&text)
    }
}

impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_response(prompt).await
    }
}

fn status_error(status: StatusCode, body: &str) -> SemanticMapError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SemanticMapError::config(format!("API key rejected ({}): {}", status, detail))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            SemanticMapError::service(format!("rate limited ({}): {}", status, detail))
        }
        _ => SemanticMapError::service(format!("API error ({}): {}", status, detail)),
    }
}

/// Pulls the first choice's text out of a chat-completions body.
fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SemanticMapError::service(format!("malformed completion response: {}", e)))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| SemanticMapError::service("completion response contained no choices"))?;
    if content.trim().is_empty() {
        return Err(SemanticMapError::service("completion response was empty"));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"A soul is the self."}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "A soul is the self.");
    }

    #[test]
    fn test_parse_completion_rejects_empty_and_malformed() {
        assert!(parse_completion(r#"{"choices":[]}"#).unwrap_err().is_service());
        assert!(parse_completion(r#"{"choices":[{"message":{"content":"  "}}]}"#)
            .unwrap_err()
            .is_service());
        assert!(parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#)
            .unwrap_err()
            .is_service());
        assert!(parse_completion("<html>bad gateway</html>").unwrap_err().is_service());
    }

    #[test]
    fn test_status_errors() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        let err = status_error(StatusCode::UNAUTHORIZED, body);
        assert!(err.is_config());
        assert!(err.to_string().contains("Incorrect API key provided"));

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(err.is_service());
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(OpenAiClient::new(&config).is_err());

        let config = Config::from_lookup(|k| {
            (k == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();
        let client = OpenAiClient::new(&config).unwrap();
        assert_eq!(client.model(), "gpt-4o");
    }
}
