// ABOUTME: Main library entry point for the pet chat relay
// ABOUTME: Relays chat history plus pet/sensor context to a Gemini model over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pet Chat Relay
//!
//! A small HTTP backend for a smart pet collar app. It accepts a chat history
//! together with the pet's profile and latest sensor reading, builds an
//! instruction prompt from that context, and forwards the conversation to a
//! Gemini model, returning the generated reply.
//!
//! ## Request flow
//!
//! 1. The body is decoded into the strict data model ([`models`])
//! 2. [`llm::prompt`] renders the pet/sensor context into one instruction
//! 3. [`llm::conversation`] validates the history and prepends the instruction
//! 4. [`llm::dispatch`] sends a single-shot or multi-turn call through the
//!    [`llm::GenerationBackend`] and extracts the reply text
//!
//! Every failure becomes a `{ "error": ..., "details"?: ... }` JSON body.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pet_chat_relay::config::ServerConfig;
//! use pet_chat_relay::errors::AppResult;
//! use pet_chat_relay::llm::GeminiProvider;
//! use pet_chat_relay::resources::ServerResources;
//! use pet_chat_relay::server::RelayServer;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let backend = Arc::new(GeminiProvider::new(config.gemini.clone())?);
//!     let resources = Arc::new(ServerResources::new(config, backend));
//!     RelayServer::new(resources).run().await
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Application constants and fixed generation parameters
pub mod constants;

/// Unified error handling with the JSON error envelope
pub mod errors;

/// Liveness health reporting
pub mod health;

/// Prompt composition, conversation normalization and backend dispatch
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Request-scoped data model
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Axum server orchestration
pub mod server;
