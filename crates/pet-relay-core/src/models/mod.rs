// ABOUTME: Request-scoped data model for the relay
// ABOUTME: Client chat messages, pet/sensor context, and normalized provider turns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Client chat messages and roles
mod chat;
/// Pet and sensor context used for the instruction prompt
mod context;
/// Normalized turns in the format the generation backend expects
mod provider;

pub use chat::{ChatMessage, ChatRole};
pub use context::{PetContext, SensorSnapshot};
pub use provider::{Part, ProviderMessage, ProviderRole};
