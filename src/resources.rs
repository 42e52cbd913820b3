// ABOUTME: Shared read-only server resources injected into every route handler
// ABOUTME: Holds the loaded configuration and the single generation backend handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::constants::service_names::PET_CHAT_RELAY;
use crate::health::HealthChecker;
use crate::llm::GenerationBackend;

/// Process-wide resources, created once at startup and shared through `Arc`
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Generation backend shared by all requests
    pub backend: Arc<dyn GenerationBackend>,
    /// Liveness reporting
    pub health: HealthChecker,
}

impl ServerResources {
    /// Bundle configuration and backend
    #[must_use]
    pub fn new(config: ServerConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            health: HealthChecker::new(PET_CHAT_RELAY),
        }
    }
}
