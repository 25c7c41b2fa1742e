// Gemini client - Google AI Studio API integration.
//
// Implements the `AiProvider` trait against the generateContent endpoint
// (https://ai.google.dev/api/generate-content).
//
// API quirks worth knowing:
// - The API key travels as a query parameter (`?key=...`), not an
//   Authorization header.
// - Requests use `contents[]` with nested `parts`, and the system instruction
//   is a separate top-level field rather than a message with role "system".
// - Gemini says "model" where everyone else says "assistant".
// - The reply text lives at `candidates[0].content.parts[].text`.

use crate::core::ai::{AiConfig, AiMessage, AiProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// A single part of content. Gemini uses a "parts" array so a message can
/// carry more than text; we only ever send and read the text field.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// One message in Gemini's wire format.
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// Generation parameters. See
/// https://ai.google.dev/api/generate-content#generationconfig
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// The request body sent to the generateContent endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A candidate response from the model. `content` can be absent when the
/// model produced nothing (safety filters, empty completions).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,

    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

/// Client for Google's Gemini API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client with the given API key
    /// (from https://aistudio.google.com/apikey).
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    fn text_part(text: String) -> Part {
        Part { text: Some(text) }
    }

    /// Converts our generic `AiMessage` to Gemini's `Content` format.
    /// "assistant" becomes "model"; system messages are handled separately.
    fn convert_message(msg: &AiMessage) -> Content {
        let role = match msg.role.as_str() {
            "assistant" => "model".to_string(),
            other => other.to_string(),
        };

        Content {
            role,
            parts: vec![Self::text_part(msg.content.clone())],
        }
    }

    /// Builds the request body: system messages are lifted into the
    /// top-level `systemInstruction` field, everything else becomes
    /// conversation content.
    fn build_request(messages: &[AiMessage], config: &AiConfig) -> GenerateContentRequest {
        let system_instruction = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| Content {
                // The instruction itself uses the "user" role on the wire.
                role: "user".to_string(),
                parts: vec![Self::text_part(m.content.clone())],
            });

        let contents = messages
            .iter()
            .filter(|m| m.role != "system")
            .map(Self::convert_message)
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: Some(config.temperature),
                max_output_tokens: config.max_output_tokens,
                top_p: config.top_p,
            }),
        }
    }

    /// Pulls the generated text out of a response. A response without
    /// candidates, content, or text parts yields an empty string; the relay
    /// service treats that as the empty-response anomaly, not an error.
    fn extract_text(response: &GenerateContentResponse) -> String {
        response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    async fn generate_text(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            config.model, self.api_key
        );

        let request = Self::build_request(messages, config);

        // Careful not to log the URL here - it carries the API key.
        tracing::debug!(
            "Gemini request to model {}: {} messages",
            config.model,
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            // Prefer the structured error message when the body parses.
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(format!(
                    "Gemini API error ({}): {}",
                    status, error_response.error.message
                )
                .into());
            }

            return Err(format!("Gemini API error: {} - {}", status, error_text).into());
        }

        let response_json: GenerateContentResponse = response.json().await?;
        let text = Self::extract_text(&response_json);

        tracing::debug!("Gemini response received: {} chars", text.len());

        Ok(text)
    }
}
