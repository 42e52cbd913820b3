// ABOUTME: Generation backend abstraction plus prompt composition, normalization and dispatch
// ABOUTME: The GenerationBackend trait is the seam between request handling and the vendor API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Relay Core
//!
//! Per request the relay runs three steps, each in its own module:
//!
//! 1. [`prompt`] turns optional pet/sensor context into one instruction string
//! 2. [`conversation`] validates the client history and prepends the instruction
//! 3. [`dispatch`] sends the sequence through a [`GenerationBackend`] and extracts text
//!
//! [`gemini::GeminiProvider`] is the production backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::generation;
use crate::errors::AppResult;
use crate::models::ProviderMessage;

/// Conversation normalization and validation
pub mod conversation;
/// Single-shot / multi-turn dispatch and response text extraction
pub mod dispatch;
/// Google Gemini REST backend
pub mod gemini;
/// Instruction prompt composition from pet and sensor context
pub mod prompt;

pub use conversation::{
    ensure_leading_user, find_role_repeats, history_role_repeats, normalize, RoleRepeat,
};
pub use dispatch::{dispatch, extract_text, DispatchMode};
pub use gemini::GeminiProvider;
pub use prompt::{build_instruction, build_instruction_at};

/// Sampling parameters sent with a generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Top-k sampling cutoff
    pub top_k: u32,
}

impl GenerationConfig {
    /// The fixed parameters the relay uses for every request
    #[must_use]
    pub const fn relay_defaults() -> Self {
        Self {
            max_output_tokens: generation::MAX_OUTPUT_TOKENS,
            temperature: generation::TEMPERATURE,
            top_p: generation::TOP_P,
            top_k: generation::TOP_K,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::relay_defaults()
    }
}

/// Raw result of a generation call before text extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    /// Generated text, if the backend produced any
    pub text: Option<String>,
    /// Why the backend withheld content (e.g. `SAFETY`), when reported
    pub block_reason: Option<String>,
    /// Backend finish reason, when reported
    pub finish_reason: Option<String>,
}

impl GenerationOutput {
    /// Output carrying generated text
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Output with no text and a block reason
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            block_reason: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// Abstract generation capability the relay depends on
///
/// Implementations accept either one standalone prompt or a seeded chat
/// history plus one new turn. The handle is shared read-only across requests.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Single-shot generation from one text prompt, no chat session
    ///
    /// # Errors
    ///
    /// Returns an error on transport or protocol failure
    async fn generate_content(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput>;

    /// Chat generation seeded with `history`, sending `message` as the new turn
    ///
    /// # Errors
    ///
    /// Returns an error on transport or protocol failure
    async fn send_chat_message(
        &self,
        history: &[ProviderMessage],
        message: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput>;
}
