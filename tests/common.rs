// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted generation backend, test configuration and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pet_chat_relay`

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use pet_chat_relay::{
    config::ServerConfig,
    errors::{AppError, AppResult},
    llm::{GenerationBackend, GenerationConfig, GenerationOutput},
    models::ProviderMessage,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; default is WARN for quiet tests
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration with only the required credential set
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("test-api-key".to_owned()),
        "GEMINI_MODEL" => Some("test-model".to_owned()),
        _ => None,
    })
    .unwrap()
}

/// Server resources wired to the given backend
pub fn create_test_resources(backend: Arc<dyn GenerationBackend>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(), backend))
}

/// One call observed by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GenerateContent {
        prompt: String,
        config: GenerationConfig,
    },
    SendChatMessage {
        history: Vec<ProviderMessage>,
        message: String,
        config: GenerationConfig,
    },
}

/// Generation backend that replays scripted results and records every call
///
/// When the script runs out, calls answer with `"mock reply"`.
pub struct MockBackend {
    script: Mutex<VecDeque<AppResult<GenerationOutput>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_output(GenerationOutput::with_text(text))
    }

    pub fn with_output(output: GenerationOutput) -> Arc<Self> {
        let backend = Self::new();
        backend.push(Ok(output));
        backend
    }

    pub fn failing(error: AppError) -> Arc<Self> {
        let backend = Self::new();
        backend.push(Err(error));
        backend
    }

    pub fn push(&self, result: AppResult<GenerationOutput>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_result(&self) -> AppResult<GenerationOutput> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerationOutput::with_text("mock reply")))
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_content(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput> {
        self.calls.lock().unwrap().push(RecordedCall::GenerateContent {
            prompt: prompt.to_owned(),
            config: *config,
        });
        self.next_result()
    }

    async fn send_chat_message(
        &self,
        history: &[ProviderMessage],
        message: &str,
        config: &GenerationConfig,
    ) -> AppResult<GenerationOutput> {
        self.calls.lock().unwrap().push(RecordedCall::SendChatMessage {
            history: history.to_vec(),
            message: message.to_owned(),
            config: *config,
        });
        self.next_result()
    }
}
