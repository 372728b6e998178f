use reqwest::Client;
use std::sync::Mutex;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

use super::endpoints::{
    ApiErrorBody, GenerateContentRequest, GenerateContentResponse, DEFAULT_GEMINI_MODEL,
    GEMINI_BASE_URL,
};
use super::rate_limit::{RateLimitStats, RateLimiter};

const API_KEY_PREFIX: &str = "AIza";
const API_KEY_MIN_LEN: usize = 20;

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded, wait {wait_secs} seconds")]
    RateLimited { wait_secs: u64 },

    #[error("API quota exceeded, try again tomorrow")]
    QuotaExceeded,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error {status}: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("The model returned no content")]
    EmptyResponse,
}

/// Shape check only: the service rejects anything else before it costs a
/// request.
pub fn validate_api_key(api_key: &str) -> bool {
    api_key.len() >= API_KEY_MIN_LEN && api_key.starts_with(API_KEY_PREFIX)
}

/// Text-generation client for the remote recipe service.
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    limiter: Mutex<RateLimiter>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiConnectionError> {
        let api_key = api_key.into();
        if !validate_api_key(&api_key) {
            return Err(ApiConnectionError::InvalidApiKey);
        }
        Ok(Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            client: Client::new(),
            limiter: Mutex::new(RateLimiter::default()),
        })
    }

    /// Reads the key from `api_key_env_var` (after loading `.env`).
    pub fn from_env(api_key_env_var: &str) -> Result<Self, ApiConnectionError> {
        dotenv::dotenv().ok();
        let api_key = std::env::var(api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var.to_string()))?;
        Self::new(api_key)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_rate_limiter(self, limiter: RateLimiter) -> Self {
        Self {
            limiter: Mutex::new(limiter),
            ..self
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn rate_limit_stats(&self) -> RateLimitStats {
        let mut limiter = self.limiter.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter.stats(Instant::now())
    }

    fn acquire_slot(&self) -> Result<(), ApiConnectionError> {
        let mut limiter = self.limiter.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter
            .try_acquire(Instant::now())
            .map_err(|wait_secs| ApiConnectionError::RateLimited { wait_secs })
    }

    /// Sends `prompt` and returns the first candidate's text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ApiConnectionError> {
        self.acquire_slot()?;

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest::from_prompt(prompt);
        info!(model = %self.model, prompt_chars = prompt.len(), "Calling recipe generation service");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Recipe service request failed: {}", e);
                ApiConnectionError::NetworkError(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_api_error(status, &body);
            warn!(%status, "Recipe service returned an error: {}", err);
            return Err(err);
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse recipe service response: {}", e);
            ApiConnectionError::SerializationError(e)
        })?;

        parsed
            .first_text()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}

/// Maps a non-2xx body to an error, preferring the service's own message.
pub fn classify_api_error(status: reqwest::StatusCode, body: &str) -> ApiConnectionError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|detail| detail.message)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });

    let lowered = message.to_lowercase();
    if lowered.contains("quota") {
        ApiConnectionError::QuotaExceeded
    } else if lowered.contains("api key") {
        ApiConnectionError::InvalidApiKey
    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        ApiConnectionError::RateLimited { wait_secs: 60 }
    } else {
        ApiConnectionError::ApiError { status, message }
    }
}
