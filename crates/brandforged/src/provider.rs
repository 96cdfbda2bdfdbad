//! Provider transport layer
//!
//! One low-level client that posts JSON to a generation endpoint under a
//! bounded timeout, and a `GenerationBackend` trait exposing the three
//! outbound call shapes the resolver consumes. No retries here: retry and
//! degradation policy belong to the fallback resolver.

use async_trait::async_trait;
use brandforge_common::{snippet, ProviderError};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Groq OpenAI-compatible chat completions endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// HuggingFace hosted sentiment classifier.
pub const HF_SENTIMENT_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Stability SDXL text-to-image endpoint.
pub const STABILITY_URL: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";

/// One message in an OpenAI-style chat payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// ============================================================================
// Provider client
// ============================================================================

/// Low-level transport: one POST to one endpoint, bearer credential,
/// per-call timeout.
pub struct ProviderClient {
    http: reqwest::Client,
}

impl ProviderClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Send `payload` to `endpoint` and decode the JSON response.
    ///
    /// An absent credential short-circuits before any network I/O so
    /// callers can select the simulation tier without paying latency.
    pub async fn invoke(
        &self,
        endpoint: &str,
        credential: Option<&str>,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Value, ProviderError> {
        let credential = credential.ok_or(ProviderError::MissingCredential)?;

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(credential)
            .header("Accept", "application/json")
            .json(payload)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(timeout)
                } else {
                    // Transport failed before any HTTP status; status 0
                    // marks the distinction in diagnostics.
                    ProviderError::rejected(0, &e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::rejected(status.as_u16(), &body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Malformed(snippet(&e.to_string())))
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Generation backend trait
// ============================================================================

/// The outbound call shapes the fallback resolver consumes.
///
/// Production code uses [`HttpBackend`]; tests use [`FakeBackend`] with
/// scripted results and a recorded call log.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Chat-completion text generation; returns the assistant message body.
    async fn chat_completion(
        &self,
        credential: Option<&str>,
        model: &str,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Result<String, ProviderError>;

    /// Label+confidence classification; returns the raw provider document.
    async fn classify(
        &self,
        credential: Option<&str>,
        input: &str,
        timeout: Duration,
    ) -> Result<Value, ProviderError>;

    /// Primary image generation; returns the base64 image payload.
    async fn text_to_image(
        &self,
        credential: Option<&str>,
        prompt: &str,
        seed: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError>;

    /// Secondary image generation tier; returns an image URL or payload.
    async fn text_to_image_secondary(
        &self,
        credential: Option<&str>,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, ProviderError>;
}

/// Production backend over [`ProviderClient`].
pub struct HttpBackend {
    client: ProviderClient,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: ProviderClient::new(),
        }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn chat_completion(
        &self,
        credential: Option<&str>,
        model: &str,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let mut payload = json!({
            "model": model,
            "messages": messages,
            "temperature": temperature,
        });
        if let Some(max) = max_tokens {
            payload["max_tokens"] = json!(max);
        }

        let document = self
            .client
            .invoke(GROQ_CHAT_URL, credential, &payload, timeout)
            .await?;

        document
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(ProviderError::Empty)
    }

    async fn classify(
        &self,
        credential: Option<&str>,
        input: &str,
        timeout: Duration,
    ) -> Result<Value, ProviderError> {
        self.client
            .invoke(HF_SENTIMENT_URL, credential, &json!({ "inputs": input }), timeout)
            .await
    }

    async fn text_to_image(
        &self,
        credential: Option<&str>,
        prompt: &str,
        seed: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let payload = json!({
            "text_prompts": [{ "text": prompt }],
            "cfg_scale": 8,
            "height": 1024,
            "width": 1024,
            "samples": 1,
            "steps": 40,
            "seed": seed,
        });

        let document = self
            .client
            .invoke(STABILITY_URL, credential, &payload, timeout)
            .await?;

        document
            .get("artifacts")
            .and_then(|a| a.get(0))
            .and_then(|a| a.get("base64"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(ProviderError::Empty)
    }

    async fn text_to_image_secondary(
        &self,
        credential: Option<&str>,
        _prompt: &str,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        credential.ok_or(ProviderError::MissingCredential)?;
        // Secondary tier holds its chain slot but has no live integration
        // yet; it defers to the next tier.
        debug!("secondary image tier deferring");
        Err(ProviderError::Empty)
    }
}

// ============================================================================
// Fake backend (testing)
// ============================================================================

/// Recorded call made against a [`FakeBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Chat { model: String, prompt: String },
    Classify { input: String },
    Image { prompt: String, seed: u32 },
    ImageSecondary { prompt: String },
}

/// Scripted backend for deterministic tests: no network, no credentials.
///
/// Chat responses are consumed in order; the last one repeats, mirroring
/// the fake-client convention used across the test suites.
pub struct FakeBackend {
    chat: Mutex<VecDeque<Result<String, ProviderError>>>,
    classify: Mutex<Result<Value, ProviderError>>,
    image: Mutex<Result<String, ProviderError>>,
    image_secondary: Mutex<Result<String, ProviderError>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl FakeBackend {
    /// Every call fails with a transport rejection.
    pub fn rejecting() -> Self {
        let rejected = || ProviderError::rejected(503, "backend unavailable");
        Self {
            chat: Mutex::new(VecDeque::from(vec![Err(rejected())])),
            classify: Mutex::new(Err(rejected())),
            image: Mutex::new(Err(rejected())),
            image_secondary: Mutex::new(Err(rejected())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the queue with a single always-returned chat response.
    pub fn with_chat_response(self, text: &str) -> Self {
        *self.chat.lock().unwrap() = VecDeque::from(vec![Ok(text.to_string())]);
        self
    }

    /// Script a sequence of chat results, consumed in call order.
    pub fn with_chat_sequence(self, results: Vec<Result<String, ProviderError>>) -> Self {
        *self.chat.lock().unwrap() = VecDeque::from(results);
        self
    }

    pub fn with_classify(self, result: Result<Value, ProviderError>) -> Self {
        *self.classify.lock().unwrap() = result;
        self
    }

    pub fn with_image(self, result: Result<String, ProviderError>) -> Self {
        *self.image.lock().unwrap() = result;
        self
    }

    pub fn with_image_secondary(self, result: Result<String, ProviderError>) -> Self {
        *self.image_secondary.lock().unwrap() = result;
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GenerationBackend for FakeBackend {
    async fn chat_completion(
        &self,
        credential: Option<&str>,
        model: &str,
        messages: &[ChatMessage],
        _temperature: f64,
        _max_tokens: Option<u32>,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        credential.ok_or(ProviderError::MissingCredential)?;
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.record(BackendCall::Chat {
            model: model.to_string(),
            prompt,
        });

        let mut queue = self.chat.lock().unwrap();
        match queue.len() {
            0 => Err(ProviderError::Empty),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap(),
        }
    }

    async fn classify(
        &self,
        credential: Option<&str>,
        input: &str,
        _timeout: Duration,
    ) -> Result<Value, ProviderError> {
        credential.ok_or(ProviderError::MissingCredential)?;
        self.record(BackendCall::Classify {
            input: input.to_string(),
        });
        self.classify.lock().unwrap().clone()
    }

    async fn text_to_image(
        &self,
        credential: Option<&str>,
        prompt: &str,
        seed: u32,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        credential.ok_or(ProviderError::MissingCredential)?;
        self.record(BackendCall::Image {
            prompt: prompt.to_string(),
            seed,
        });
        self.image.lock().unwrap().clone()
    }

    async fn text_to_image_secondary(
        &self,
        credential: Option<&str>,
        prompt: &str,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        credential.ok_or(ProviderError::MissingCredential)?;
        self.record(BackendCall::ImageSecondary {
            prompt: prompt.to_string(),
        });
        self.image_secondary.lock().unwrap().clone()
    }
}
