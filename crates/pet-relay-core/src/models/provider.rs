// ABOUTME: Normalized conversation turns in the generation backend's chat format
// ABOUTME: Roles are user/model and each turn carries one or more text parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ChatRole;

/// Role of a normalized turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    /// Human (or synthetic instruction) turn
    User,
    /// Model reply
    Model,
}

impl ProviderRole {
    /// Map a client role onto the provider role set
    ///
    /// `system` has no provider counterpart and yields `None`; its content is
    /// carried by the leading instruction message instead.
    #[must_use]
    pub const fn from_chat_role(role: ChatRole) -> Option<Self> {
        match role {
            ChatRole::System => None,
            ChatRole::Assistant => Some(Self::Model),
            ChatRole::User => Some(Self::User),
        }
    }

    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text fragment of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Fragment text
    pub text: String,
}

/// One turn of the normalized conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// Turn author
    pub role: ProviderRole,
    /// Text fragments, in order
    pub parts: Vec<Part>,
}

impl ProviderMessage {
    /// Single-part turn with an explicit role
    #[must_use]
    pub fn new(role: ProviderRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Single-part user turn
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ProviderRole::User, text)
    }

    /// Single-part model turn
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ProviderRole::Model, text)
    }

    /// Concatenated text of all parts
    #[must_use]
    pub fn text(&self) -> String {
        self.parts.iter().map(|part| part.text.as_str()).collect()
    }
}
