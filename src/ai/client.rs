//! Inference endpoint clients.
//!
//! Both backends speak the Anthropic messages envelope used by Bedrock and
//! return the generated text. Any transport, service, or decoding failure is
//! reported as [`SecureFlowError::ModelInvocation`].

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::errors::SecureFlowError;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const MAX_OUTPUT_TOKENS: u32 = 800;
/// Kept low to bias the model toward deterministic, structured output.
pub const TEMPERATURE: f64 = 0.2;

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends one system instruction plus one user message and returns the
    /// generated text.
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String, SecureFlowError>;
}

#[must_use]
pub fn build_request_envelope(system: &str, prompt: &str) -> Value {
    json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": MAX_OUTPUT_TOKENS,
        "temperature": TEMPERATURE,
        "system": system,
        "messages": [
            {
                "role": "user",
                "content": [{ "type": "text", "text": prompt }]
            }
        ]
    })
}

/// Pulls the generated text out of a response envelope.
///
/// Expects `{"content": [{"type": "text", "text": "..."}]}`; any other shape
/// yields the whole envelope serialized as text.
#[must_use]
pub fn extract_text(envelope: &Value) -> String {
    let first_text = envelope
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|parts| parts.first())
        .and_then(|first| first.get("text"));

    match first_text {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => envelope.to_string(),
    }
}

/// Calls the model through Bedrock `InvokeModel`.
pub struct BedrockModelClient {
    client: BedrockClient,
    model_id: String,
}

impl BedrockModelClient {
    #[must_use]
    pub fn new(client: BedrockClient, model_id: String) -> Self {
        Self { client, model_id }
    }
}

#[async_trait]
impl ModelClient for BedrockModelClient {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String, SecureFlowError> {
        let body = serde_json::to_vec(&build_request_envelope(system, prompt))?;

        info!(model_id = %self.model_id, prompt_chars = prompt.chars().count(), "Invoking Bedrock model");

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                SecureFlowError::ModelInvocation(format!(
                    "Bedrock invoke failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let envelope: Value = serde_json::from_slice(output.body.as_ref()).map_err(|e| {
            SecureFlowError::ModelInvocation(format!("Unexpected Bedrock response: {e}"))
        })?;

        #[cfg(feature = "debug-logs")]
        debug!("Bedrock response envelope: {}", envelope);

        Ok(extract_text(&envelope))
    }
}

/// Calls a Bedrock-compatible HTTPS gateway with the same envelope.
pub struct HttpModelClient {
    http: Client,
    endpoint_url: String,
    api_key: Option<String>,
    model_id: String,
}

impl HttpModelClient {
    #[must_use]
    pub fn new(endpoint_url: String, api_key: Option<String>, model_id: String) -> Self {
        Self {
            http: Client::new(),
            endpoint_url,
            api_key,
            model_id,
        }
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String, SecureFlowError> {
        let mut body = build_request_envelope(system, prompt);
        if !self.model_id.is_empty() {
            body["model"] = json!(self.model_id);
        }

        info!(endpoint = %self.endpoint_url, prompt_chars = prompt.chars().count(), "Invoking model endpoint");

        let mut request = self.http.post(&self.endpoint_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            SecureFlowError::ModelInvocation(format!("Model endpoint request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SecureFlowError::ModelInvocation(format!(
                "Model endpoint returned {status}: {error_text}"
            )));
        }

        let envelope: Value = response.json().await.map_err(|e| {
            SecureFlowError::ModelInvocation(format!("Unexpected model endpoint response: {e}"))
        })?;

        debug!("Model endpoint responded with status {}", status);

        Ok(extract_text(&envelope))
    }
}
