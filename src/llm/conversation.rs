// ABOUTME: Normalizes a client chat history into a provider-valid turn sequence
// ABOUTME: Drops system turns, maps assistant to model, enforces a leading user turn
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conversation normalization
//!
//! The normalized sequence always starts with the synthetic instruction turn
//! (role `user`), followed by the client history in its original order with
//! `system` turns removed. Consecutive history turns with the same role are
//! reported as diagnostics but never rejected.

use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{ChatMessage, ProviderMessage, ProviderRole};

/// Two adjacent turns sharing a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRepeat {
    /// Index of the second turn of the pair
    pub index: usize,
    /// Role shared by both turns
    pub role: ProviderRole,
}

/// Build the provider sequence from an instruction and the client history
///
/// # Errors
///
/// Returns a validation error when `messages` is absent or empty, when no
/// non-system message survives filtering, or when the sequence does not start
/// with a user turn
pub fn normalize(
    instruction: &str,
    messages: Option<&[ChatMessage]>,
) -> AppResult<Vec<ProviderMessage>> {
    let messages = match messages {
        Some(messages) if !messages.is_empty() => messages,
        _ => return Err(AppError::invalid_input("messages required")),
    };

    let mut sequence = Vec::with_capacity(messages.len() + 1);
    sequence.push(ProviderMessage::user(instruction));
    sequence.extend(messages.iter().filter_map(|message| {
        ProviderRole::from_chat_role(message.role)
            .map(|role| ProviderMessage::new(role, message.content.as_str()))
    }));

    if sequence.len() == 1 {
        return Err(AppError::invalid_input("no usable messages").with_details(format!(
            "all {} message(s) had role 'system'",
            messages.len()
        )));
    }

    ensure_leading_user(&sequence)?;

    let repeats = history_role_repeats(&sequence);
    for repeat in &repeats {
        warn!(
            index = repeat.index,
            role = %repeat.role,
            turns = sequence.len(),
            "Consecutive turns share the same role"
        );
    }

    debug!(
        input_messages = messages.len(),
        turns = sequence.len(),
        dropped_system = messages.len() + 1 - sequence.len(),
        role_repeats = repeats.len(),
        "Conversation normalized"
    );

    Ok(sequence)
}

/// Require a multi-turn sequence to begin with a user turn
///
/// Sequences of zero or one turn are accepted as-is.
///
/// # Errors
///
/// Returns a validation error naming the offending role
pub fn ensure_leading_user(sequence: &[ProviderMessage]) -> AppResult<()> {
    match sequence {
        [first, _, ..] if first.role != ProviderRole::User => {
            Err(AppError::invalid_input("first message must be user")
                .with_details(format!("first message has role '{}'", first.role)))
        }
        _ => Ok(()),
    }
}

/// Role repeats inside the client history of a normalized sequence
///
/// The leading instruction turn is skipped, so a history that opens with a
/// user turn is not reported. Indices refer to positions in `sequence`.
#[must_use]
pub fn history_role_repeats(sequence: &[ProviderMessage]) -> Vec<RoleRepeat> {
    let Some(history) = sequence.get(1..) else {
        return Vec::new();
    };
    find_role_repeats(history)
        .into_iter()
        .map(|repeat| RoleRepeat {
            index: repeat.index + 1,
            ..repeat
        })
        .collect()
}

/// Find every adjacent pair of turns that share a role
#[must_use]
pub fn find_role_repeats(sequence: &[ProviderMessage]) -> Vec<RoleRepeat> {
    sequence
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].role == pair[1].role)
        .map(|(i, pair)| RoleRepeat {
            index: i + 1,
            role: pair[1].role,
        })
        .collect()
}
