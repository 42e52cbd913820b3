// ABOUTME: Google Gemini generateContent REST client implementing GenerationBackend
// ABOUTME: Maps provider responses to text plus block reason; maps transport failures to provider errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Gemini API Client
//!
//! Talks to the `models/{model}:generateContent` endpoint. A single-shot call
//! sends one user turn; a chat call sends the seeded history followed by the
//! new message as a user turn, which is what a chat session does on the wire.
//!
//! # API Reference
//! <https://ai.google.dev/api/generate-content>
//!
//! # Example
//! ```rust,no_run
//! use pet_chat_relay::config::GeminiConfig;
//! use pet_chat_relay::llm::{GenerationBackend, GenerationConfig, GeminiProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::new(GeminiConfig {
//!     api_key: "your_api_key".to_owned(),
//!     model: "gemini-1.5-flash".to_owned(),
//!     base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
//!     timeout_secs: 60,
//! })?;
//! let output = provider
//!     .generate_content("Say hello to Biscuit", &GenerationConfig::relay_defaults())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GenerationBackend, GenerationConfig, GenerationOutput};
use crate::config::GeminiConfig;
use crate::constants::service_names::GEMINI;
use crate::errors::{AppError, AppResult};
use crate::models::ProviderMessage;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reasons that mean the candidate completed normally
const NORMAL_FINISH_REASONS: &[&str] = &["STOP", "MAX_TOKENS", "FINISH_REASON_UNSPECIFIED"];

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<ProviderMessage>,
    generation_config: &'a GenerationConfig,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates; the relay reads the first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback about the prompt, including a block reason when it was rejected
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One generated candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Why generation stopped (`STOP`, `SAFETY`, `RECITATION`, ...)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Content fragments
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One fragment of candidate content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    /// Text of the fragment; absent for non-text parts
    #[serde(default)]
    pub text: Option<String>,
}

/// Prompt-level feedback
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Why the prompt was blocked (e.g. `SAFETY`, `OTHER`)
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Convert the wire response into text plus block diagnostics
    ///
    /// A prompt-level block or a candidate that finished for a non-normal
    /// reason (such as `SAFETY`) yields no text and reports that reason.
    #[must_use]
    pub fn into_output(self) -> GenerationOutput {
        let prompt_block = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerationOutput {
                text: None,
                block_reason: prompt_block,
                finish_reason: None,
            };
        };

        let finish_reason = candidate.finish_reason;
        let abnormal_finish = finish_reason
            .as_deref()
            .filter(|reason| !NORMAL_FINISH_REASONS.contains(reason))
            .map(str::to_owned);

        if prompt_block.is_some() || abnormal_finish.is_some() {
            return GenerationOutput {
                text: None,
                block_reason: prompt_block.or(abnormal_finish),
                finish_reason,
            };
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        GenerationOutput {
            text: Some(text),
            block_reason: None,
            finish_reason,
        }
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini `generateContent` client
///
/// Created once at startup and shared read-only across requests.
pub struct GeminiProvider {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a new client with the configured timeout applied to every call
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is blank or the HTTP
    /// client cannot be built
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::config("Gemini API key must not be empty"));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Model id this client targets
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        let model = self.config.model.trim_start_matches("models/");
        format!("{}/models/{model}:generateContent", self.config.base_url)
    }

    async fn post_contents(
        &self,
        contents: Vec<ProviderMessage>,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput> {
        let body = GenerateContentRequest {
            contents,
            generation_config: config,
        };
        debug!(
            model = %self.config.model,
            turns = body.contents.len(),
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &raw));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(&e)
            } else {
                AppError::external_service(GEMINI, format!("JSON parse error: {e}"))
            }
        })?;

        Ok(parsed.into_output())
    }

    fn transport_error(&self, error: &reqwest::Error) -> AppError {
        if error.is_timeout() {
            warn!(timeout_secs = self.config.timeout_secs, "Gemini request timed out");
            AppError::external_timeout(GEMINI, self.config.timeout_secs)
        } else {
            warn!(error = %error, "Gemini request failed");
            AppError::external_service(GEMINI, error.to_string())
        }
    }

    fn status_error(status: StatusCode, raw_body: &str) -> AppError {
        let detail = serde_json::from_str::<ApiErrorResponse>(raw_body).map_or_else(
            |_| format!("HTTP {status}"),
            |parsed| match parsed.error.status {
                Some(api_status) => format!("HTTP {status} {api_status}: {}", parsed.error.message),
                None => format!("HTTP {status}: {}", parsed.error.message),
            },
        );
        warn!(status = %status, "Gemini returned an error status");
        AppError::external_service(GEMINI, detail)
    }
}

#[async_trait]
impl GenerationBackend for GeminiProvider {
    fn name(&self) -> &'static str {
        GEMINI
    }

    async fn generate_content(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput> {
        self.post_contents(vec![ProviderMessage::user(prompt)], config)
            .await
    }

    async fn send_chat_message(
        &self,
        history: &[ProviderMessage],
        message: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput> {
        let mut contents = Vec::with_capacity(history.len() + 1);
        contents.extend_from_slice(history);
        contents.push(ProviderMessage::user(message));
        self.post_contents(contents, config).await
    }
}
