use std::time::Duration;

use anyhow::Result;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::InferenceSettings;
use crate::models::LogAnalysisResponse;
use crate::services::parser::parse_analysis;
use crate::utils::prompts;

const MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("API call failed: {0}")]
    UpstreamStatus(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Client for the remote text-generation endpoint. Stateless apart from
/// the immutable settings; one instance is shared across all requests.
#[derive(Clone)]
pub struct AIService {
    client: reqwest::Client,
    settings: InferenceSettings,
}

impl AIService {
    pub fn new(settings: InferenceSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self { client, settings })
    }

    pub async fn analyze_log_text(&self, log_content: &str) -> LogAnalysisResponse {
        match self.run_analysis(log_content).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("Error analyzing log text: {}", e);
                LogAnalysisResponse::degraded(format!("Error analyzing logs: {}", e))
            }
        }
    }

    pub async fn analyze_log_file(&self, content: &str) -> LogAnalysisResponse {
        match self.run_analysis(content).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("Error analyzing log file: {}", e);
                LogAnalysisResponse::degraded(format!("Error analyzing log file: {}", e))
            }
        }
    }

    async fn run_analysis(&self, log_content: &str) -> Result<LogAnalysisResponse, InferenceError> {
        let reply = self.call_inference_api(log_content).await?;
        Ok(parse_analysis(&reply))
    }

    async fn call_inference_api(&self, log_content: &str) -> Result<String, InferenceError> {
        debug!("Using model: {}", self.settings.model);

        let payload = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "system", "content": prompts::LOG_ANALYST_PERSONA},
                {"role": "user", "content": prompts::generate_log_analysis_prompt(log_content)},
            ],
            "max_tokens": MAX_OUTPUT_TOKENS,
        });

        let mut request = self.client.post(&self.settings.base_url).json(&payload);
        if let Some(auth) = bearer_header_value(&self.settings.api_key) {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(InferenceError::UpstreamStatus(body));
        }

        Ok(reply_from_body(&body))
    }
}

/// Normalizes a configured API key into an `Authorization` header value.
/// Blank keys produce no header; a key already carrying the `Bearer `
/// prefix is passed through unchanged.
fn bearer_header_value(api_key: &str) -> Option<String> {
    if api_key.trim().is_empty() {
        return None;
    }

    if api_key.starts_with("Bearer ") {
        Some(api_key.to_string())
    } else {
        Some(format!("Bearer {}", api_key))
    }
}

/// Picks the reply text out of an upstream HTTP body. Bodies that are not
/// JSON, match no known shape, or extract to a blank string are returned
/// verbatim rather than dropped.
fn reply_from_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => match extract_text_from_response(&parsed) {
            Some(text) if !text.trim().is_empty() => text,
            _ => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

/// Inference servers disagree on the response envelope. Each known shape
/// gets one extractor; the first that matches wins.
fn extract_text_from_response(json: &Value) -> Option<String> {
    const EXTRACTORS: &[fn(&Value) -> Option<String>] = &[
        extract_outputs_content,
        extract_choices_text,
        extract_choices_message_content,
        extract_top_level_fields,
        extract_first_string_value,
    ];

    EXTRACTORS.iter().find_map(|extract| extract(json))
}

fn extract_outputs_content(json: &Value) -> Option<String> {
    let content = json.get("outputs")?.get(0)?.get("content")?;

    match content {
        Value::String(text) => Some(text.clone()),
        Value::Array(fragments) => {
            let mut combined = String::new();
            for fragment in fragments {
                match fragment.get("text").and_then(Value::as_str) {
                    Some(text) => combined.push_str(text),
                    None => {
                        combined.push_str(&fragment_as_text(fragment));
                        combined.push('\n');
                    }
                }
            }
            Some(combined.trim().to_string())
        }
        _ => None,
    }
}

fn extract_choices_text(json: &Value) -> Option<String> {
    json.get("choices")?
        .get(0)?
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

// Array-shaped content is only destructured for the `outputs` envelope;
// chat-completion content must be a plain string here.
fn extract_choices_message_content(json: &Value) -> Option<String> {
    json.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

fn extract_top_level_fields(json: &Value) -> Option<String> {
    ["text", "output", "result"]
        .iter()
        .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
}

fn extract_first_string_value(json: &Value) -> Option<String> {
    json.as_object()?
        .values()
        .find_map(|value| value.as_str().map(str::to_string))
}

fn fragment_as_text(fragment: &Value) -> String {
    match fragment {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
