//! LLM API interaction with exponential backoff retry logic.
//!
//! This module is the only place that talks to the external text and image
//! generation services.
//!
//! # Architecture
//!
//! - [`LanguageModel`]: Core trait for chat completion and image generation
//! - [`OpenAiClient`]: `reqwest` implementation against an OpenAI-compatible API
//! - [`RetryAsk`]: Decorator that adds retry logic to any `LanguageModel`
//!
//! # Retry Strategy
//!
//! - Configurable number of retries
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

use crate::config::SiteConfig;
use crate::utils::truncate_for_log;

/// A single system + user prompt exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A banner image request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
}

/// Trait for async text and image generation.
///
/// Implementors send a prompt to a model and return its output. This
/// abstraction lets the generator run against the real API, a retrying
/// decorator or a scripted fake in tests.
pub trait LanguageModel {
    /// Run a chat completion and return the assistant message text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, Box<dyn Error>>;

    /// Generate an image and return its URL.
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, Box<dyn Error>>;

    /// Model name recorded as the article's author model.
    fn chat_model(&self) -> &str;

    /// Model name recorded on generated banner images.
    fn image_model(&self) -> &str;
}

/// Wrapper that adds exponential backoff retry logic to any [`LanguageModel`].
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryAsk<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: LanguageModel,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    /// Delay before retry number `attempt` (1-based), without jitter.
    ///
    /// Doubles from `base_delay` and never exceeds `max_delay`, however many
    /// retries are configured.
    fn backoff_delay(&self, attempt: usize) -> StdDuration {
        let exponent = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    async fn with_retries<R, F, Fut>(&self, op: &'static str, mut call: F) -> Result<R, Box<dyn Error>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, Box<dyn Error>>>,
    {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match call().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            op,
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis(),
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "request exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.backoff_delay(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        op,
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "request failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> LanguageModel for RetryAsk<T>
where
    T: LanguageModel,
{
    async fn complete(&self, request: &ChatRequest) -> Result<String, Box<dyn Error>> {
        self.with_retries("complete", || self.inner.complete(request)).await
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<String, Box<dyn Error>> {
        self.with_retries("generate_image", || self.inner.generate_image(request))
            .await
    }

    fn chat_model(&self) -> &str {
        self.inner.chat_model()
    }

    fn image_model(&self) -> &str {
        self.inner.image_model()
    }
}

/// Client for an OpenAI-compatible REST API.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(api_key: String, config: &SiteConfig) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(180))
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String, Box<dyn Error>> {
        let url = format!("{}{}", self.base_url, path);
        let t0 = Instant::now();
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!(%url, %status, elapsed_ms = t0.elapsed().as_millis(), "API response");

        if !status.is_success() {
            return Err(format!("{url} returned {status}: {}", truncate_for_log(&text, 300)).into());
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageBody<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Extract the first choice's message text from a chat completion body.
pub fn parse_chat_response(body: &str) -> Result<String, Box<dyn Error>> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| "chat completion returned no content".into())
}

/// Extract the first image URL from an image generation body.
pub fn parse_image_response(body: &str) -> Result<String, Box<dyn Error>> {
    let parsed: ImageResponse = serde_json::from_str(body)?;
    parsed
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or_else(|| "image generation returned no URL".into())
}

impl LanguageModel for OpenAiClient {
    #[instrument(level = "info", skip_all, fields(model = %self.chat_model, max_tokens = request.max_tokens))]
    async fn complete(&self, request: &ChatRequest) -> Result<String, Box<dyn Error>> {
        let body = ChatCompletionBody {
            model: &self.chat_model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        let text = self.post_json("/chat/completions", &body).await?;
        parse_chat_response(&text)
    }

    #[instrument(level = "info", skip_all, fields(model = %self.image_model))]
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, Box<dyn Error>> {
        let body = ImageBody {
            model: &self.image_model,
            prompt: &request.prompt,
            size: &request.size,
            n: 1,
        };
        let text = self.post_json("/images/generations", &body).await?;
        parse_image_response(&text)
    }

    fn chat_model(&self) -> &str {
        &self.chat_model
    }

    fn image_model(&self) -> &str {
        &self.image_model
    }
}
