// ABOUTME: Server binary for the pet chat relay
// ABOUTME: Loads configuration, initializes logging and the Gemini client, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pet Chat Relay Server
//!
//! ```bash
//! # Start with configuration from the environment
//! GEMINI_API_KEY=... cargo run --bin pet-chat-relay
//!
//! # Override bind address
//! cargo run --bin pet-chat-relay -- --host 0.0.0.0 --port 9000
//! ```
//!
//! A missing `GEMINI_API_KEY` aborts startup before any request is served.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pet_chat_relay::config::ServerConfig;
use pet_chat_relay::llm::GeminiProvider;
use pet_chat_relay::logging::init_logging;
use pet_chat_relay::resources::ServerResources;
use pet_chat_relay::server::RelayServer;

#[derive(Parser)]
#[command(
    name = "pet-chat-relay",
    about = "Pet chat relay server",
    long_about = "Relay chat history and pet/sensor context to a Gemini model over HTTP"
)]
struct Args {
    /// Bind host override (defaults to HOST or 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Bind port override (defaults to HTTP_PORT or 8081)
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.http_port = port;
    }

    init_logging(&config.logging).context("Failed to initialize logging")?;
    info!(
        bind = %config.bind_address(),
        environment = %config.environment,
        "Starting pet chat relay"
    );

    let backend =
        GeminiProvider::new(config.gemini.clone()).context("Failed to create Gemini client")?;
    info!(model = backend.model(), "Gemini client initialized");

    let resources = Arc::new(ServerResources::new(config, Arc::new(backend)));
    RelayServer::new(resources)
        .run()
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
