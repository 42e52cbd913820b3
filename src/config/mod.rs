// ABOUTME: Configuration module for the relay
// ABOUTME: Environment-only configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, GeminiConfig, LogFormat, LoggingConfig, ServerConfig};
