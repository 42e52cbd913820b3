// ABOUTME: Sends a normalized sequence to the generation backend and extracts the reply text
// ABOUTME: One turn goes out as a standalone prompt, longer sequences as a seeded chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use tracing::{info, warn};

use super::{ensure_leading_user, GenerationBackend, GenerationConfig, GenerationOutput};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::ProviderMessage;

/// Error message for a response that carried no usable text
pub const EMPTY_RESPONSE_ERROR: &str = "empty or blocked response";

/// Detail used when the backend gave no block reason
pub const GENERIC_EMPTY_REASON: &str = "model returned no text";

/// How a sequence is sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Instruction alone, sent as plain content without a chat session
    SingleShot,
    /// Chat seeded with every turn but the last, last turn sent as the new message
    MultiTurn,
}

impl DispatchMode {
    /// Mode for a sequence of `len` turns; `None` when the sequence is empty
    #[must_use]
    pub const fn for_len(len: usize) -> Option<Self> {
        match len {
            0 => None,
            1 => Some(Self::SingleShot),
            _ => Some(Self::MultiTurn),
        }
    }
}

/// Send `sequence` to `backend` and return the generated text
///
/// # Errors
///
/// Returns a validation error for an empty sequence or a multi-turn sequence
/// that does not start with a user turn, and a provider error when the
/// backend fails or returns no usable text
pub async fn dispatch(
    backend: &dyn GenerationBackend,
    sequence: &[ProviderMessage],
) -> AppResult<String> {
    let config = GenerationConfig::relay_defaults();
    let started = Instant::now();

    let (mode, output) = match sequence {
        [] => return Err(AppError::invalid_input("messages required")),
        [instruction] => (
            DispatchMode::SingleShot,
            backend
                .generate_content(&instruction.text(), &config)
                .await?,
        ),
        [history @ .., last] => {
            ensure_leading_user(sequence)?;
            (
                DispatchMode::MultiTurn,
                backend
                    .send_chat_message(history, &last.text(), &config)
                    .await?,
            )
        }
    };

    let text = extract_text(output)?;
    info!(
        backend = backend.name(),
        mode = ?mode,
        turns = sequence.len(),
        response_chars = text.chars().count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generation completed"
    );
    Ok(text)
}

/// Pull non-blank text out of a backend output
///
/// # Errors
///
/// Returns a provider error carrying the block reason (or a generic reason)
/// when the text is missing, empty or whitespace-only
pub fn extract_text(output: GenerationOutput) -> AppResult<String> {
    match output.text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => {
            let reason = output
                .block_reason
                .unwrap_or_else(|| GENERIC_EMPTY_REASON.to_owned());
            warn!(reason = %reason, "Generation returned no usable text");
            Err(
                AppError::new(ErrorCode::ExternalServiceError, EMPTY_RESPONSE_ERROR)
                    .with_details(reason),
            )
        }
    }
}
